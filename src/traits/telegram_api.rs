use async_trait::async_trait;

use crate::models::method::SendMethod;
use crate::models::types::{ApiResponse, Payload, RecipientId};

/// `TelegramApi` defines an interface for calling the Telegram Bot API.
///
/// This trait allows different implementations, including mock implementations for testing
/// and real ones that send actual HTTP requests.
///
/// Implementations always resolve to an [`ApiResponse`]: transport failures are
/// folded into `ok: false` responses so callers treat them like API errors.
#[async_trait]
pub trait TelegramApi: Send + Sync {
    /// Calls `getMe` to check that the token belongs to a bot.
    async fn get_me(&self, token: &str) -> ApiResponse;

    /// Sends `payload` to one chat with the given method.
    async fn send(
        &self,
        token: &str,
        method: SendMethod,
        chat_id: &RecipientId,
        payload: &Payload,
    ) -> ApiResponse;
}
