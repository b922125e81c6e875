//! # Identifier Generation
//!
//! Two kinds of identifiers are handed out:
//!
//! - **Record ids** ([`generate_numeric`]): uniformly random 10-digit integers,
//!   checked against the ids already present in the target collection file.
//!   The store calls this once per record that arrives without an id.
//! - **Tokens** ([`IdAllocator::token`]): short opaque strings such as
//!   `_k3j9x0q2m`, unique for the lifetime of the allocator. The API facade
//!   uses them to tag each operation in the logs.
//!
//! Both retry on collision, and both give up after a bounded number of
//! attempts with [`StoreError::IdSpaceExhausted`].
//!
//! The allocator keeps every token it ever issued. The set is never pruned, so
//! memory grows with the number of tokens issued.

use crate::error::{Result, StoreError};
use crate::model::RecordId;
use rand::Rng;
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LEN: usize = 9;

/// Draws a record id not contained in `used`.
pub fn generate_numeric<R: Rng>(
    rng: &mut R,
    used: &HashSet<RecordId>,
    max_attempts: usize,
) -> Result<RecordId> {
    generate_numeric_with(
        || rng.gen_range(RecordId::MIN..=RecordId::MAX),
        used,
        max_attempts,
    )
}

fn generate_numeric_with<F: FnMut() -> u64>(
    mut draw: F,
    used: &HashSet<RecordId>,
    max_attempts: usize,
) -> Result<RecordId> {
    for _ in 0..max_attempts {
        if let Some(id) = RecordId::new(draw()) {
            if !used.contains(&id) {
                return Ok(id);
            }
        }
    }
    Err(StoreError::IdSpaceExhausted {
        attempts: max_attempts,
    })
}

fn random_token<R: Rng>(rng: &mut R) -> String {
    let mut token = String::with_capacity(TOKEN_LEN + 1);
    token.push('_');
    for _ in 0..TOKEN_LEN {
        let idx = rng.gen_range(0..TOKEN_ALPHABET.len());
        token.push(TOKEN_ALPHABET[idx] as char);
    }
    token
}

/// Issues process-unique opaque tokens.
///
/// Construct one at startup and share it (e.g. behind an `Arc`); two
/// allocators do not know about each other's tokens.
#[derive(Debug)]
pub struct IdAllocator {
    used: Mutex<HashSet<String>>,
    max_attempts: usize,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::with_max_attempts(DEFAULT_MAX_ATTEMPTS)
    }

    /// A cap of zero is raised to one so tokens can still be issued.
    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self {
            used: Mutex::new(HashSet::new()),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn token(&self) -> Result<String> {
        let mut rng = rand::thread_rng();
        self.token_with(|| random_token(&mut rng))
    }

    fn token_with<F: FnMut() -> String>(&self, mut draw: F) -> Result<String> {
        let mut used = self.used.lock().unwrap_or_else(PoisonError::into_inner);
        for _ in 0..self.max_attempts {
            let candidate = draw();
            if used.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }
        Err(StoreError::IdSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Number of tokens issued so far.
    pub fn issued(&self) -> usize {
        self.used
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
