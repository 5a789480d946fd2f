use std::path::PathBuf;

use bon::Builder;
use tokio_graceful_shutdown::errors::CancelledByShutdown;
use tokio_graceful_shutdown::{FutureExt, SubsystemHandle};
use tracing::info;

use crate::error::BroadcastError;
use crate::models::recipients::RecipientList;
use crate::models::types::BroadcastRequest;
use crate::services::dispatcher::Broadcaster;
use crate::services::logs::write_logs;

/// Одна рассылка как подсистема: Ctrl-C отменяет ожидание расписания и саму отправку
#[derive(Builder)]
pub struct BroadcastSubsystem {
    pub(crate) broadcaster: Broadcaster,
    pub(crate) request: BroadcastRequest,
    pub(crate) recipients: RecipientList,
    pub(crate) logs_path: PathBuf,
}

impl BroadcastSubsystem {
    pub async fn run(self, subsys: SubsystemHandle) -> Result<(), BroadcastError> {
        info!("Starting broadcast subsystem");

        let fut = async {
            let report = self.broadcaster.start(&self.request, &self.recipients).await?;
            write_logs(&self.logs_path, &report.state)?;
            Ok::<_, BroadcastError>(report)
        };

        match fut.cancel_on_shutdown(&subsys).await {
            Ok(Ok(report)) => {
                info!(
                    success = report.state.success,
                    failure = report.state.failure,
                    batches = report.batches,
                    "Broadcast subsystem finished"
                );
                subsys.request_shutdown();
            }
            Ok(Err(e)) => return Err(e),
            Err(CancelledByShutdown) => info!("Broadcast subsystem cancelled by shutdown"),
        }

        Ok(())
    }
}
