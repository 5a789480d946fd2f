use std::path::PathBuf;

use thiserror::Error;

use crate::models::method::SendMethod;

/// Ошибки рассылки, которые видит оператор
///
/// Validation, import and authentication errors abort a run before any
/// recipient is contacted. Per-recipient delivery failures never show up here:
/// they are recorded in [`crate::models::run_state::RunState`].
#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("Please enter a valid bot token.")]
    MissingToken,

    #[error("Please enter or upload user IDs.")]
    MissingRecipients,

    #[error("Please upload a file for {method}.")]
    MissingFile { method: SendMethod },

    #[error("Please enter a message to broadcast.")]
    MissingMessage,

    #[error("Please enter a valid API endpoint.")]
    MissingEndpoint,

    #[error("Please upload a valid .json file (got {}).", path.display())]
    InvalidExportFile { path: PathBuf },

    #[error("Invalid JSON structure. Please check the file format: {0}")]
    MalformedExport(#[source] serde_json::Error),

    #[error("Bot token validation failed: {0}")]
    InvalidToken(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BroadcastError {
    /// Short title for the notification shown to the operator
    pub fn title(&self) -> &'static str {
        match self {
            BroadcastError::MissingToken => "Missing Bot Token",
            BroadcastError::MissingRecipients => "Missing User IDs",
            BroadcastError::MissingFile { .. } => "Missing File",
            BroadcastError::MissingMessage => "Missing Message",
            BroadcastError::MissingEndpoint => "Missing Endpoint",
            BroadcastError::InvalidExportFile { .. } => "Invalid File",
            BroadcastError::MalformedExport(_) => "JSON Parse Error",
            BroadcastError::InvalidToken(_) => "Invalid Bot Token",
            BroadcastError::Config(_) => "Configuration Error",
            BroadcastError::Http(_) => "HTTP Client Error",
            BroadcastError::Io(_) => "I/O Error",
        }
    }
}
