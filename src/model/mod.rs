//! Domain model: log records, display messages, actions and errors.

pub mod display_message;
pub mod error;
pub mod key_action;
pub mod log_data;

pub use display_message::DisplayMessage;
pub use error::{AppError, SourceError};
pub use key_action::KeyAction;
pub use log_data::{format_timestamp, LogEvent, LogGroup, LogStream};
