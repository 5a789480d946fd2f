use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::BroadcastError;
use crate::models::method::{ParseMode, SendMethod};
use crate::models::recipients::RecipientList;
use crate::models::types::{Attachment, BroadcastRequest, DEFAULT_BATCH_SIZE, Payload};
use crate::services::extractor::read_export_file;
use crate::services::logs::DEFAULT_LOGS_FILE;
use crate::services::telegram_client::DEFAULT_API_BASE_URL;

pub const DEFAULT_CONFIG_FILE: &str = "tgcast.yaml";
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub telegram: Option<TelegramConfig>,
    pub broadcast: Option<BroadcastConfig>,
    pub recipients: Option<RecipientsConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TelegramConfig {
    pub api_base_url: Option<String>,
    pub bot_token: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BroadcastConfig {
    pub method: Option<SendMethod>,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    pub file: Option<PathBuf>,        // upload for media methods
    pub batch_size: Option<usize>,    // 0 means default
    pub interval_ms: Option<u64>,
    pub schedule: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RecipientsConfig {
    pub ids: Option<Vec<String>>,
    pub ids_file: Option<PathBuf>,    // newline separated
    pub export_file: Option<PathBuf>, // Telegram export, replaces ids
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OutputConfig {
    pub logs_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub verbose: Option<bool>,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, BroadcastError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| BroadcastError::Config(format!("Failed to load {}: {}", path.display(), e)))?;
    let cfg: AppConfig = serde_yaml::from_str(&content)
        .map_err(|e| BroadcastError::Config(format!("Invalid YAML in {}: {}", path.display(), e)))?;
    Ok(cfg)
}

/// `TELEGRAM_BOT_TOKEN` and `TELEGRAM_API_BASE_URL` win over the file.
pub fn apply_env_overrides(cfg: &mut AppConfig) {
    let telegram = cfg.telegram.get_or_insert_with(TelegramConfig::default);
    if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
        if !token.trim().is_empty() {
            telegram.bot_token = Some(token);
        }
    }
    if let Ok(base_url) = std::env::var("TELEGRAM_API_BASE_URL") {
        if !base_url.trim().is_empty() {
            telegram.api_base_url = Some(base_url);
        }
    }
}

impl AppConfig {
    pub fn api_base_url(&self) -> String {
        self.telegram
            .as_ref()
            .and_then(|t| t.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.telegram
            .as_ref()
            .and_then(|t| t.request_timeout_secs)
            .map(Duration::from_secs)
    }

    /// Delivery log target, `broadcast_logs.json` in the working directory unless set.
    pub fn logs_path(&self) -> PathBuf {
        self.output
            .as_ref()
            .and_then(|o| o.logs_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOGS_FILE))
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.output.as_ref().and_then(|o| o.log_file.clone())
    }

    pub fn verbose(&self) -> bool {
        self.output.as_ref().and_then(|o| o.verbose).unwrap_or(false)
    }

    /// Builds the run request; reads the attachment from disk when configured.
    ///
    /// A missing token or file is not an error here, the dispatcher reports it.
    pub async fn build_request(&self) -> Result<BroadcastRequest, BroadcastError> {
        let token = self
            .telegram
            .as_ref()
            .and_then(|t| t.bot_token.clone())
            .unwrap_or_default();
        let b = self.broadcast.clone().unwrap_or_default();
        let method = b.method.unwrap_or_default();

        let attachment = match (method.is_text(), b.file.as_ref()) {
            (false, Some(path)) => Some(Attachment::from_path(path).await.map_err(|e| {
                BroadcastError::Config(format!("cannot read {}: {}", path.display(), e))
            })?),
            (true, Some(_)) => {
                warn!(method = %method, "file configured for a text method; ignored");
                None
            }
            _ => None,
        };

        let payload = Payload::builder()
            .maybe_text(b.text)
            .maybe_caption(b.caption)
            .maybe_parse_mode(b.parse_mode)
            .maybe_attachment(attachment)
            .build();

        Ok(BroadcastRequest::builder()
            .token(token)
            .method(method)
            .payload(payload)
            .batch_size(b.batch_size.unwrap_or(DEFAULT_BATCH_SIZE))
            .interval(Duration::from_millis(b.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS)))
            .maybe_schedule(b.schedule)
            .build())
    }

    /// Manual ids (inline, then `ids_file`); an export file replaces them.
    ///
    /// With an export file configured `ids_file` is never read.
    pub fn load_recipients(&self) -> Result<RecipientList, BroadcastError> {
        let Some(r) = self.recipients.as_ref() else {
            return Ok(RecipientList::default());
        };

        let mut lines: Vec<String> = r.ids.clone().unwrap_or_default();

        if let Some(path) = r.export_file.as_ref() {
            let mut list = RecipientList::from_ids(&lines);
            let content = read_export_file(path)?;
            let count = list.import_export(&content)?;
            info!(path = %path.display(), count, "recipients replaced from export file");
            return Ok(list);
        }

        if let Some(path) = r.ids_file.as_ref() {
            let content = fs::read_to_string(path)?;
            lines.extend(content.lines().map(str::to_string));
        }
        Ok(RecipientList::from_ids(&lines))
    }
}
