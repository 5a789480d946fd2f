pub mod presenter;
pub mod telegram_api;
