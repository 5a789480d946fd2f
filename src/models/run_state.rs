use crate::models::types::{ApiResponse, RecipientId};

/// Progress of one broadcast run.
///
/// Owned by the dispatcher for the duration of a run and replaced by a fresh
/// value on the next one. Outcomes are folded in through [`RunState::apply_outcome`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    pub total: usize,
    pub completed: usize,
    pub success: usize,
    pub failure: usize,
    pub success_ids: Vec<RecipientId>,
    pub failed_ids: Vec<RecipientId>,
    pub failed_details: Vec<String>,
}

/// Снимок счётчиков для презентера
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    pub success: usize,
    pub failure: usize,
    pub percent: u8,
}

impl RunState {
    pub fn new(total: usize) -> Self {
        Self { total, ..Self::default() }
    }

    /// Records one recipient's outcome.
    #[must_use]
    pub fn apply_outcome(mut self, id: RecipientId, response: &ApiResponse) -> Self {
        self.completed += 1;
        if response.ok {
            self.success += 1;
            self.success_ids.push(id);
        } else {
            self.failure += 1;
            self.failed_details.push(failure_detail(&id, response));
            self.failed_ids.push(id);
        }
        self
    }

    /// `round(completed / total * 100)`, half rounds up.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let scaled = (self.completed * 200 + self.total) / (self.total * 2);
        scaled.min(100) as u8
    }

    pub fn progress(&self) -> Progress {
        Progress {
            total: self.total,
            completed: self.completed,
            success: self.success,
            failure: self.failure,
            percent: self.percent(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.completed == self.total
    }
}

pub fn failure_detail(id: &RecipientId, response: &ApiResponse) -> String {
    format!("ID: {}, Error: {}", id, response.description_or_unknown())
}
