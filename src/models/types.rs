use std::path::Path;
use std::time::Duration;

use bon::Builder;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use derive_more::{Display, From, FromStr, Into};
use reqwest::multipart::Part;
use serde::{Deserialize, Serialize};

use crate::models::method::{ParseMode, SendMethod};

pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Идентификатор получателя (чат или пользователь)
///
/// Opaque: no numeric parsing, duplicates allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, From, Into, Display, FromStr)]
pub struct RecipientId(String);

impl RecipientId {
    /// Text form of a JSON `id` value: strings as-is, numbers the way JS prints them.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self(s.clone()),
            serde_json::Value::Number(n) => Self(number_literal(n)),
            other => Self(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// `1e3` and `1000.0` both print as `1000`; fractions keep their digits.
fn number_literal(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

impl From<&str> for RecipientId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Normalized Bot API envelope.
///
/// Either parsed from the remote body or synthesized by
/// [`ApiResponse::transport_failure`] when the call itself failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl ApiResponse {
    /// Sentinel error code for failures that never reached the API.
    pub const TRANSPORT_ERROR_CODE: i64 = 0;

    pub fn success(result: serde_json::Value) -> Self {
        Self { ok: true, description: None, error_code: None, result: Some(result) }
    }

    pub fn failure(error_code: i64, description: impl Into<String>) -> Self {
        Self { ok: false, description: Some(description.into()), error_code: Some(error_code), result: None }
    }

    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self::failure(Self::TRANSPORT_ERROR_CODE, message)
    }

    pub fn description_or_unknown(&self) -> &str {
        self.description.as_deref().filter(|d| !d.is_empty()).unwrap_or(UNKNOWN_ERROR)
    }
}

/// Файл, прикрепляемый к медиа-методам
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Bytes,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self { file_name: file_name.into(), bytes: bytes.into() }
    }

    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        Ok(Self::new(file_name, bytes))
    }

    /// Multipart part sharing the underlying buffer.
    pub fn to_part(&self) -> Part {
        Part::stream_with_length(reqwest::Body::from(self.bytes.clone()), self.bytes.len() as u64)
            .file_name(self.file_name.clone())
    }
}

/// Содержимое сообщения
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct Payload {
    #[builder(into)]
    pub text: Option<String>,
    #[builder(into)]
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    pub attachment: Option<Attachment>,
}

impl Payload {
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Immutable per-run configuration.
#[derive(Debug, Clone, Builder)]
pub struct BroadcastRequest {
    #[builder(into)]
    pub token: String,
    #[builder(default)]
    pub method: SendMethod,
    #[builder(default)]
    pub payload: Payload,
    #[builder(default = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
    #[builder(default = DEFAULT_INTERVAL)]
    pub interval: Duration,
    pub schedule: Option<DateTime<Utc>>,
}

impl BroadcastRequest {
    /// Zero is treated as "not set".
    pub fn effective_batch_size(&self) -> usize {
        if self.batch_size == 0 { DEFAULT_BATCH_SIZE } else { self.batch_size }
    }

    /// Remaining wait when the schedule lies in the future relative to `now`.
    pub fn delay_until_schedule(&self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, Duration)> {
        let at = self.schedule?;
        if at <= now {
            return None;
        }
        (at - now).to_std().ok().map(|delay| (at, delay))
    }
}
