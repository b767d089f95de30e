use anyhow::{anyhow, Result};
use uuid::Uuid;

/// First eight characters, as shown in listings.
pub fn short_id(id: &Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

/// Accepts a full UUID or a prefix matching exactly one candidate.
pub fn resolve_id(input: &str, candidates: impl IntoIterator<Item = Uuid>) -> Result<Uuid> {
    let input = input.trim().to_lowercase();
    if let Ok(id) = Uuid::parse_str(&input) {
        return Ok(id);
    }
    if input.is_empty() {
        return Err(anyhow!("Empty ID"));
    }

    let matches: Vec<Uuid> = candidates
        .into_iter()
        .filter(|id| id.to_string().starts_with(&input))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(anyhow!("No record matches ID '{}'", input)),
        _ => Err(anyhow!("ID '{}' is ambiguous ({} matches)", input, matches.len())),
    }
}
