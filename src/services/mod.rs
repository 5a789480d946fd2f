pub mod api_probe;
pub mod dispatcher;
pub mod extractor;
pub mod logs;
pub mod settings;
pub mod telegram_client;

pub use dispatcher::{Broadcaster, RunReport};
pub use telegram_client::RealTelegramApi;
