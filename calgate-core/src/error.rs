//! Error types for the calgate ecosystem.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur in calgate operations.
#[derive(Error, Debug)]
pub enum CalGateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar access not authorized")]
    NotAuthorized,

    #[error("Event save rejected by the calendar store: {0}")]
    Persistence(String),

    #[error("Calendar store error: {0}")]
    Store(String),

    #[error("Store binary '{0}' not found in PATH")]
    StoreNotInstalled(String),

    #[error("Store request timed out after {0}s")]
    StoreTimeout(u64),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Date field out of range: {0}")]
    InvalidDateField(String),

    #[error("Date arithmetic out of representable range")]
    DateOutOfRange,

    #[error("No writable calendar available for new events")]
    NoWritableCalendar,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for calgate operations.
pub type CalGateResult<T> = Result<T, CalGateError>;
