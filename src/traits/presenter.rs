use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display as StrumDisplay;

use crate::models::run_state::{Progress, RunState};

/// Уровень уведомления
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// Passive display surface for a broadcast.
///
/// The dispatcher pushes counters and final lists here; nothing flows back.
pub trait Presenter: Send + Sync {
    /// Fire-and-forget message to the operator.
    fn notify(&self, level: NoticeLevel, title: &str, text: &str);

    /// A run is waiting for its scheduled start.
    fn scheduled(&self, at: DateTime<Utc>, delay: Duration) {
        let _ = (at, delay);
    }

    /// Counters reset, `total` recipients queued.
    fn started(&self, total: usize);

    /// Called after every recorded outcome.
    fn progress(&self, progress: &Progress);

    fn finished(&self, state: &RunState);

    /// The run stopped before contacting any recipient.
    fn aborted(&self) {}
}
