//! Loading config and JSON fixtures from disk.

use std::path::Path;

use enrollwise_config::EnrollConfig;
use enrollwise_core::{Passage, RawTurn, Turn, ingest_history};
use tracing::debug;

pub fn load_config(path: Option<&Path>) -> Result<EnrollConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => EnrollConfig::load_with_env(path)?,
        None => EnrollConfig::load()?,
    };
    Ok(config)
}

/// Read a JSON array of loosely-shaped turns. Malformed entries are skipped.
pub fn load_history(
    path: Option<&Path>,
    max_turns: usize,
) -> Result<Vec<Turn>, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read history file {}: {e}", path.display()))?;
    let raw: Vec<RawTurn> = serde_json::from_str(&content)
        .map_err(|e| format!("History file {} is not a JSON array: {e}", path.display()))?;
    let turns = ingest_history(&raw, max_turns);
    debug!(path = %path.display(), entries = raw.len(), turns = turns.len(), "History loaded");
    Ok(turns)
}

/// Read a JSON array of passages (`text`, `source_label`, optional `campus`).
pub fn load_passages(path: Option<&Path>) -> Result<Vec<Passage>, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read passages file {}: {e}", path.display()))?;
    let passages: Vec<Passage> = serde_json::from_str(&content)
        .map_err(|e| format!("Passages file {} is malformed: {e}", path.display()))?;
    debug!(path = %path.display(), passages = passages.len(), "Passages loaded");
    Ok(passages)
}
