use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::BroadcastError;
use crate::models::run_state::RunState;

pub const DEFAULT_LOGS_FILE: &str = "broadcast_logs.json";

/// Downloadable record of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastLogs {
    #[serde(rename = "successIDs")]
    pub success_ids: Vec<String>,
    #[serde(rename = "failedIDs")]
    pub failed_ids: Vec<String>,
    #[serde(rename = "failedDetails")]
    pub failed_details: Vec<String>,
}

impl BroadcastLogs {
    pub fn from_state(state: &RunState) -> Self {
        Self {
            success_ids: state.success_ids.iter().map(|id| id.to_string()).collect(),
            failed_ids: state.failed_ids.iter().map(|id| id.to_string()).collect(),
            failed_details: state.failed_details.clone(),
        }
    }

    /// Pretty JSON, two-space indent.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub fn export_logs(state: &RunState) -> Result<String, BroadcastError> {
    BroadcastLogs::from_state(state)
        .to_json()
        .map_err(|e| BroadcastError::Config(format!("cannot serialize logs: {}", e)))
}

pub fn write_logs(path: &Path, state: &RunState) -> Result<(), BroadcastError> {
    let json = export_logs(state)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    info!(path = %path.display(), success = state.success, failure = state.failure, "logs exported");
    Ok(())
}
