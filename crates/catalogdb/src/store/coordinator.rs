use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex, PoisonError};
use tracing::trace;

/// Grants exclusive access to collection files, one holder per path.
///
/// Paths are compared as given, so callers must use one spelling per file
/// (the API layer always hands out the same absolute path per collection).
#[derive(Debug, Default)]
pub struct FileCoordinator {
    held: Mutex<HashSet<PathBuf>>,
    released: Condvar,
}

/// Exclusive access to one path. Released on drop.
#[derive(Debug)]
pub struct PathGuard<'a> {
    coordinator: &'a FileCoordinator,
    path: PathBuf,
}

impl FileCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until no other guard holds `path`, then takes it.
    pub fn lock(&self, path: &Path) -> PathGuard<'_> {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        while held.contains(path) {
            trace!(path = %path.display(), "waiting for collection file");
            held = self
                .released
                .wait(held)
                .unwrap_or_else(PoisonError::into_inner);
        }
        held.insert(path.to_path_buf());
        PathGuard {
            coordinator: self,
            path: path.to_path_buf(),
        }
    }

    pub fn is_held(&self, path: &Path) -> bool {
        self.held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
    }
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        let mut held = self
            .coordinator
            .held
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        held.remove(&self.path);
        self.coordinator.released.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn guard_releases_on_drop() {
        let coordinator = FileCoordinator::new();
        let path = Path::new("/data/user.data.json");
        {
            let _guard = coordinator.lock(path);
            assert!(coordinator.is_held(path));
        }
        assert!(!coordinator.is_held(path));
    }

    #[test]
    fn different_paths_do_not_block() {
        let coordinator = FileCoordinator::new();
        let _a = coordinator.lock(Path::new("/data/a.json"));
        let _b = coordinator.lock(Path::new("/data/b.json"));
        assert!(coordinator.is_held(Path::new("/data/a.json")));
        assert!(coordinator.is_held(Path::new("/data/b.json")));
    }

    #[test]
    fn same_path_is_exclusive() {
        let coordinator = Arc::new(FileCoordinator::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let coordinator = Arc::clone(&coordinator);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    let _guard = coordinator.lock(Path::new("/data/shared.json"));
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_inside.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(2));
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn guard_released_when_holder_panics() {
        let coordinator = Arc::new(FileCoordinator::new());
        let path = PathBuf::from("/data/panic.json");

        let c = Arc::clone(&coordinator);
        let p = path.clone();
        let result = thread::spawn(move || {
            let _guard = c.lock(&p);
            panic!("boom");
        })
        .join();

        assert!(result.is_err());
        assert!(!coordinator.is_held(&path));
    }
}
