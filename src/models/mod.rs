pub mod method;
pub mod recipients;
pub mod run_state;
pub mod types;

pub use method::{ParseMode, PayloadKind, SendMethod};
pub use recipients::RecipientList;
pub use run_state::{Progress, RunState};
pub use types::{ApiResponse, Attachment, BroadcastRequest, Payload, RecipientId};
