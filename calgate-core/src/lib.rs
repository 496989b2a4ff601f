//! Core types for the calgate ecosystem.
//!
//! This crate provides the shared types used by the calgate facade and by
//! platform store binaries:
//! - `CalendarRef`, `EventRecord`, `EventDraft` for calendar data
//! - `AuthorizationState` for the store's consent state
//! - `DateRange` and `date_math` for query boundary computation
//! - `protocol` for the facade-store communication protocol

pub mod authorization;
pub mod calendar;
pub mod date_math;
pub mod date_range;
pub mod error;
pub mod event;
pub mod protocol;

// Re-export the common types at crate root for convenience
pub use authorization::AuthorizationState;
pub use calendar::CalendarRef;
pub use date_range::DateRange;
pub use error::{CalGateError, CalGateResult};
pub use event::{EventDraft, EventRecord};
