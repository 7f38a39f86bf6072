//! Error types for slotmask operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// A raw event record or holiday string could not be read as a date or datetime.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Slot length, business hours, or query window are unusable.
    #[error("Config error: {0}")]
    Config(String),

    /// An event or holiday source failed to deliver its records.
    #[error("Source error ({source_name}): {message}")]
    Source {
        source_name: String,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, SlotError>;
