//! A typed facade over a platform calendar store.
//!
//! The platform store (the OS event database or an external calendar
//! service) stays behind the [`store::EventStore`] seam; this crate adds
//! the pieces an application composes on top of it:
//!
//! - [`gate::AuthorizationGate`]: consent state machine with a
//!   single-prompt discipline
//! - [`service::CalendarService`]: cached calendar listing and event
//!   queries by range, day or month, plus event creation with a default
//!   duration
//! - [`keywords`]: recency-weighted keyword frequencies from event titles
//! - [`config::CalGateConfig`]: the usage-description and
//!   default-calendar configuration
//!
//! Construct the store, gate and service once at the application's
//! composition root and pass the service to consumers.

pub mod config;
pub mod gate;
pub mod keywords;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use calgate_core::{
    AuthorizationState, CalGateError, CalGateResult, CalendarRef, DateRange, EventDraft,
    EventRecord,
};
pub use config::CalGateConfig;
pub use gate::AuthorizationGate;
pub use service::CalendarService;
pub use store::{EventStore, MemoryStore, ProviderStore};
