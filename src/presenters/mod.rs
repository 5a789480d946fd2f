pub mod console;

pub use console::ConsolePresenter;
pub use crate::traits::presenter::Presenter;

#[cfg(test)]
use std::sync::Mutex;
#[cfg(test)]
pub static CONSOLE_TEST_SINK: once_cell::sync::Lazy<Mutex<Vec<String>>> = once_cell::sync::Lazy::new(|| Mutex::new(Vec::new()));
