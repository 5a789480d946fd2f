use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::models::run_state::{Progress, RunState};
use crate::traits::presenter::{NoticeLevel, Presenter};

/// Prints progress and the final report to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsolePresenter {
    /// Print every outcome instead of only percent changes
    pub verbose: bool,
    last_percent: std::sync::Arc<std::sync::atomic::AtomicU8>,
}

impl ConsolePresenter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose, ..Self::default() }
    }

    fn emit(&self, line: String) {
        #[cfg(test)]
        {
            use super::CONSOLE_TEST_SINK;
            CONSOLE_TEST_SINK.lock().unwrap().push(line.clone());
        }
        #[cfg(not(test))]
        {
            println!("{}", line);
        }
    }
}

impl Presenter for ConsolePresenter {
    fn notify(&self, level: NoticeLevel, title: &str, text: &str) {
        match level {
            NoticeLevel::Error => error!(%title, %text, "notification"),
            _ => info!(%level, %title, %text, "notification"),
        }
        self.emit(format!("[{}] {}: {}", level, title, text));
    }

    fn scheduled(&self, at: DateTime<Utc>, delay: Duration) {
        info!(at = %at.to_rfc3339(), delay_ms = delay.as_millis() as u64, "broadcast scheduled");
        self.emit(format!("Scheduled Broadcast... starts at {}", at.to_rfc3339()));
    }

    fn started(&self, total: usize) {
        use std::sync::atomic::Ordering;
        self.last_percent.store(0, Ordering::Relaxed);
        self.emit(format!("Processing Broadcast... total {}", total));
    }

    fn progress(&self, progress: &Progress) {
        use std::sync::atomic::Ordering;
        let previous = self.last_percent.swap(progress.percent, Ordering::Relaxed);
        if self.verbose || previous != progress.percent {
            self.emit(format!(
                "[{:>3}%] {}/{} completed, {} success, {} failed",
                progress.percent, progress.completed, progress.total, progress.success, progress.failure
            ));
        }
    }

    fn finished(&self, state: &RunState) {
        info!(success = state.success, failure = state.failure, total = state.total, "broadcast summary");
        self.emit(format!("Success: {}  Blocked/Failed: {}", state.success, state.failure));
        for detail in &state.failed_details {
            self.emit(detail.clone());
        }
    }

    fn aborted(&self) {
        self.emit("Broadcast aborted".to_string());
    }
}
