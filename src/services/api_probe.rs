use reqwest::Client;
use tracing::{info, warn};
use url::Url;

use crate::error::BroadcastError;
use crate::models::types::ApiResponse;
use crate::traits::presenter::NoticeLevel;

/// Результат проверки произвольного URL Bot API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// `ok: true`; pretty-printed `result`
    Succeeded(String),
    /// `ok: false`; the description
    Failed(String),
    /// request or decoding failed
    Errored(String),
}

impl ProbeOutcome {
    /// Level, title and text for the notification.
    pub fn notice(&self) -> (NoticeLevel, &'static str, String) {
        match self {
            ProbeOutcome::Succeeded(result) => (NoticeLevel::Success, "API Test Successful", result.clone()),
            ProbeOutcome::Failed(description) => (NoticeLevel::Error, "API Test Failed", format!("Error: {}", description)),
            ProbeOutcome::Errored(message) => (NoticeLevel::Error, "API Test Error", format!("Error: {}", message)),
        }
    }
}

/// GETs `url` and reports whether the JSON body says `ok`.
pub async fn probe_endpoint(client: &Client, url: &str) -> Result<ProbeOutcome, BroadcastError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(BroadcastError::MissingEndpoint);
    }
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(e) => return Ok(ProbeOutcome::Errored(e.to_string())),
    };

    let result = async {
        let response = client.get(parsed).send().await?;
        response.json::<ApiResponse>().await
    }
    .await;

    let outcome = match result {
        Ok(body) if body.ok => {
            let result = body.result.unwrap_or(serde_json::Value::Null);
            let pretty = serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string());
            ProbeOutcome::Succeeded(pretty)
        }
        Ok(body) => ProbeOutcome::Failed(body.description_or_unknown().to_string()),
        Err(e) => {
            let message = e.without_url().to_string();
            warn!(error = %message, "probe: request failed");
            ProbeOutcome::Errored(message)
        }
    };
    info!(title = outcome.notice().1, "probe: finished");
    Ok(outcome)
}
