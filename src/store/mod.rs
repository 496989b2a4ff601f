//! The platform calendar store interface.
//!
//! The store itself is an external collaborator (the OS event database, a
//! remote calendar service) and is never reimplemented here. `EventStore`
//! is the narrow seam the facade talks through: authorization state, a
//! one-shot consent request, calendar enumeration, range-keyed event
//! search and event persistence.

mod memory;
mod provider;

pub use memory::MemoryStore;
pub use provider::ProviderStore;

use async_trait::async_trait;
use calgate_core::{AuthorizationState, CalGateResult, CalendarRef, DateRange, EventDraft, EventRecord};

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Current authorization state as the platform reports it.
    async fn authorization_status(&self) -> CalGateResult<AuthorizationState>;

    /// Show the platform consent prompt. Returns whether access was
    /// granted. Callers must only invoke this while the state is
    /// `NotDetermined`; the gate enforces the single-prompt discipline.
    async fn request_access(&self) -> CalGateResult<bool>;

    /// Enumerate all calendars known to the store.
    async fn calendars(&self) -> CalGateResult<Vec<CalendarRef>>;

    /// All events in the union of `calendars` whose interval intersects
    /// `range` (closed on both bounds).
    async fn events_in_range(
        &self,
        calendars: &[CalendarRef],
        range: &DateRange,
    ) -> CalGateResult<Vec<EventRecord>>;

    /// Persist a new event, returning the stored record with its
    /// store-assigned identifier.
    async fn create_event(&self, draft: &EventDraft) -> CalGateResult<EventRecord>;
}
