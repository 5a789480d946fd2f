use std::sync::Arc;

use bon::Builder;
use chrono::Utc;
use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use tracing::{debug, error, info, warn};

use crate::error::BroadcastError;
use crate::models::recipients::RecipientList;
use crate::models::run_state::RunState;
use crate::models::types::{BroadcastRequest, RecipientId};
use crate::traits::presenter::{NoticeLevel, Presenter};
use crate::traits::telegram_api::TelegramApi;

/// Итог завершённой рассылки
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub state: RunState,
    pub batches: usize,
}

/// Runs one broadcast end to end.
///
/// Batches are strictly sequential; sends inside a batch run concurrently and
/// their outcomes are folded into [`RunState`] one at a time as they resolve.
#[derive(Builder, Clone)]
pub struct Broadcaster {
    api: Arc<dyn TelegramApi>,
    presenter: Arc<dyn Presenter>,
}

impl Broadcaster {
    /// Validates, waits for the schedule if any, then sends to every recipient.
    ///
    /// Errors are also shown through the presenter before being returned.
    pub async fn start(
        &self,
        request: &BroadcastRequest,
        recipients: &RecipientList,
    ) -> Result<RunReport, BroadcastError> {
        let result = self.run(request, recipients).await;
        if let Err(e) = &result {
            error!(error = %e, "broadcast: aborted");
            self.presenter.notify(NoticeLevel::Error, e.title(), &e.to_string());
        }
        result
    }

    async fn run(
        &self,
        request: &BroadcastRequest,
        recipients: &RecipientList,
    ) -> Result<RunReport, BroadcastError> {
        let ids = validate(request, recipients)?;

        if let Some((at, delay)) = request.delay_until_schedule(Utc::now()) {
            info!(at = %at.to_rfc3339(), delay_ms = delay.as_millis() as u64, "broadcast: waiting for schedule");
            self.presenter.scheduled(at, delay);
            tokio::time::sleep(delay).await;
        }

        self.proceed(request, ids).await
    }

    async fn proceed(
        &self,
        request: &BroadcastRequest,
        ids: Vec<RecipientId>,
    ) -> Result<RunReport, BroadcastError> {
        if request.method.is_text() && !request.payload.has_text() {
            return Err(BroadcastError::MissingMessage);
        }

        let mut state = RunState::new(ids.len());
        self.presenter.started(state.total);

        let me = self.api.get_me(&request.token).await;
        if !me.ok {
            self.presenter.aborted();
            return Err(BroadcastError::InvalidToken(me.description_or_unknown().to_string()));
        }

        let batch_size = request.effective_batch_size();
        info!(
            method = %request.method,
            total = state.total,
            batch_size,
            interval_ms = request.interval.as_millis() as u64,
            "broadcast: started"
        );

        let mut batches = 0;
        for (index, batch) in ids.chunks(batch_size).enumerate() {
            debug!(batch = index + 1, size = batch.len(), "broadcast: dispatching batch");
            state = self.run_batch(request, batch, state).await;
            batches += 1;
            tokio::time::sleep(request.interval).await;
        }

        debug_assert!(state.is_finished(), "every recipient gets exactly one outcome");
        info!(success = state.success, failure = state.failure, batches, "broadcast: completed");
        self.presenter.finished(&state);
        self.presenter.notify(
            NoticeLevel::Success,
            "Broadcast Completed",
            &format!(
                "Successfully sent to {} users, failed for {} users.",
                state.success, state.failure
            ),
        );
        Ok(RunReport { state, batches })
    }

    /// Sends to every id in `batch` at once and folds results in completion order.
    async fn run_batch(
        &self,
        request: &BroadcastRequest,
        batch: &[RecipientId],
        mut state: RunState,
    ) -> RunState {
        let api = &self.api;
        let mut in_flight: FuturesUnordered<_> = batch
            .iter()
            .map(|id| async move {
                let response = api
                    .send(&request.token, request.method, id, &request.payload)
                    .await;
                (id, response)
            })
            .collect();

        while let Some((id, response)) = in_flight.next().await {
            if !response.ok {
                warn!(chat_id = %id, error_code = ?response.error_code, description = %response.description_or_unknown(), "broadcast: delivery failed");
            }
            state = state.apply_outcome(id.clone(), &response);
            self.presenter.progress(&state.progress());
        }
        state
    }
}

/// Checks everything that can be checked before the schedule gate.
pub fn validate(
    request: &BroadcastRequest,
    recipients: &RecipientList,
) -> Result<Vec<RecipientId>, BroadcastError> {
    if request.token.trim().is_empty() {
        return Err(BroadcastError::MissingToken);
    }
    let ids = recipients.ids();
    if ids.is_empty() {
        return Err(BroadcastError::MissingRecipients);
    }
    if !request.method.is_text() && request.payload.attachment.is_none() {
        return Err(BroadcastError::MissingFile { method: request.method });
    }
    Ok(ids)
}
