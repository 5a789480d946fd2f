use std::time::Duration;

use async_trait::async_trait;
use bon::Builder;
use reqwest::Client;
use reqwest::multipart::Form;
use tracing::{debug, warn};

use crate::error::BroadcastError;
use crate::models::method::SendMethod;
use crate::models::types::{ApiResponse, Payload, RecipientId};
use crate::traits::telegram_api::TelegramApi;

pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// A real implementation of the `TelegramApi` trait that sends HTTP requests to the Telegram Bot API.
#[derive(Builder, Clone)]
pub struct RealTelegramApi {
    #[builder(default)]
    pub client: Client,
    #[builder(into, default = DEFAULT_API_BASE_URL.to_string())]
    pub base_url: String,
}

impl RealTelegramApi {
    /// Creates a client with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BroadcastError> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self { client: builder.build()?, base_url: base_url.into() })
    }

    fn endpoint(&self, token: &str, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url.trim_end_matches('/'), token, method)
    }

    /// POSTs the form and decodes the envelope; never fails.
    async fn post(&self, token: &str, method: &str, form: Form) -> ApiResponse {
        let url = self.endpoint(token, method);
        let result = async {
            let response = self.client.post(&url).multipart(form).send().await?;
            let status = response.status();
            let body = response.json::<ApiResponse>().await?;
            Ok::<_, reqwest::Error>((status, body))
        }
        .await;

        match result {
            Ok((status, body)) => {
                debug!(method, %status, ok = body.ok, error_code = ?body.error_code, "telegram: response");
                body
            }
            Err(e) => {
                // reqwest errors carry the URL, which contains the token
                let message = e.without_url().to_string();
                warn!(method, error = %message, "telegram: transport failure");
                ApiResponse::transport_failure(message)
            }
        }
    }
}

/// Form body for one send call.
pub fn build_form(method: SendMethod, chat_id: &RecipientId, payload: &Payload) -> Form {
    let mut form = Form::new().text("chat_id", chat_id.to_string());
    match method.upload_field() {
        None => {
            form = form.text("text", payload.text.clone().unwrap_or_default());
        }
        Some(field) => {
            if let Some(attachment) = payload.attachment.as_ref() {
                form = form.part(field, attachment.to_part());
            }
            if let Some(caption) = payload.caption.as_ref().filter(|c| !c.is_empty()) {
                form = form.text("caption", caption.clone());
            }
        }
    }
    if let Some(mode) = payload.parse_mode {
        form = form.text("parse_mode", mode.as_str());
    }
    form
}

#[async_trait]
impl TelegramApi for RealTelegramApi {
    async fn get_me(&self, token: &str) -> ApiResponse {
        self.post(token, "getMe", Form::new()).await
    }

    /// Sends a message to a Telegram chat using the Telegram Bot API.
    ///
    /// # Arguments
    ///
    /// * `token` - Bot token.
    /// * `method` - Send method, decides the form layout.
    /// * `chat_id` - Telegram chat ID to send the message to.
    /// * `payload` - Text or caption, parse mode and the attached file.
    async fn send(
        &self,
        token: &str,
        method: SendMethod,
        chat_id: &RecipientId,
        payload: &Payload,
    ) -> ApiResponse {
        debug!(method = %method, chat_id = %chat_id, "telegram: send");
        self.post(token, method.as_str(), build_form(method, chat_id, payload)).await
    }
}
