use catalogdb::commands::Outcome;

/// Pretty JSON, the same shape a web collaborator would send.
pub fn render_outcome(outcome: &Outcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}
