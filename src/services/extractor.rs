use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::BroadcastError;
use crate::models::types::RecipientId;

/// Top-level arrays scanned for ids, in this order.
const ID_SOURCES: [&str; 2] = ["chats", "users"];

/// Extracts recipient ids from a Telegram data-export JSON document.
///
/// `chats[].id` come first, then `users[].id`. Elements whose `id` is missing
/// or falsy (`null`, `false`, `0`, `""`) are skipped. No deduplication.
pub fn extract_ids(content: &str) -> Result<Vec<RecipientId>, BroadcastError> {
    let data: Value = serde_json::from_str(content).map_err(BroadcastError::MalformedExport)?;

    let mut ids = Vec::new();
    for source in ID_SOURCES {
        let Some(Value::Array(entries)) = data.get(source) else {
            debug!(source, "export: section missing or not an array");
            continue;
        };
        let before = ids.len();
        ids.extend(
            entries
                .iter()
                .filter_map(|entry| entry.get("id"))
                .filter(|id| is_truthy(id))
                .map(RecipientId::from_json),
        );
        debug!(source, entries = entries.len(), extracted = ids.len() - before, "export: section scanned");
    }
    Ok(ids)
}

/// Raw content of an export file; the name must end in `.json`.
pub fn read_export_file(path: &Path) -> Result<String, BroadcastError> {
    let is_json = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".json"));
    if !is_json {
        return Err(BroadcastError::InvalidExportFile { path: path.to_path_buf() });
    }
    Ok(std::fs::read_to_string(path)?)
}

pub fn extract_ids_from_file(path: &Path) -> Result<Vec<RecipientId>, BroadcastError> {
    let content = read_export_file(path)?;
    let ids = extract_ids(&content)?;
    info!(path = %path.display(), count = ids.len(), "export: ids extracted");
    Ok(ids)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
