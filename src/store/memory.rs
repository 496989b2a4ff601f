//! In-process event store.
//!
//! A deterministic `EventStore` for tests and for targets without a
//! platform calendar integration. Authorization behavior is configurable
//! (initial state and the outcome of the consent prompt), and the store
//! counts prompts and calendar fetches so callers can assert the gate's
//! single-prompt and the facade's single-fetch disciplines.
//!
//! The store trusts the facade's authorization gate: queries are not
//! re-checked against the consent state here.

use async_trait::async_trait;
use calgate_core::{
    AuthorizationState, CalGateError, CalGateResult, CalendarRef, DateRange, EventDraft, EventRecord,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::EventStore;

pub struct MemoryStore {
    calendars: Vec<CalendarRef>,
    status: Mutex<AuthorizationState>,
    grant_on_request: bool,
    events: Mutex<Vec<EventRecord>>,
    prompt_count: AtomicUsize,
    calendar_fetches: AtomicUsize,
}

impl MemoryStore {
    /// A store whose consent prompt has not been answered yet and will be
    /// granted when requested.
    pub fn new(calendars: Vec<CalendarRef>) -> Self {
        Self::with_status(calendars, AuthorizationState::NotDetermined)
    }

    /// A store with access already granted.
    pub fn authorized(calendars: Vec<CalendarRef>) -> Self {
        Self::with_status(calendars, AuthorizationState::Authorized)
    }

    pub fn with_status(calendars: Vec<CalendarRef>, status: AuthorizationState) -> Self {
        MemoryStore {
            calendars,
            status: Mutex::new(status),
            grant_on_request: true,
            events: Mutex::new(Vec::new()),
            prompt_count: AtomicUsize::new(0),
            calendar_fetches: AtomicUsize::new(0),
        }
    }

    /// Make the (not yet answered) consent prompt resolve to a denial.
    pub fn denying(mut self) -> Self {
        self.grant_on_request = false;
        self
    }

    /// Pre-populate events without going through `create_event`.
    pub fn seed_events(&self, records: Vec<EventRecord>) {
        self.events.lock().unwrap().extend(records);
    }

    /// How many consent prompts the store has shown.
    pub fn prompt_count(&self) -> usize {
        self.prompt_count.load(Ordering::SeqCst)
    }

    /// How many times the calendar list was fetched.
    pub fn calendar_fetches(&self) -> usize {
        self.calendar_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn authorization_status(&self) -> CalGateResult<AuthorizationState> {
        Ok(*self.status.lock().unwrap())
    }

    async fn request_access(&self) -> CalGateResult<bool> {
        self.prompt_count.fetch_add(1, Ordering::SeqCst);

        let mut status = self.status.lock().unwrap();
        if *status == AuthorizationState::NotDetermined {
            *status = if self.grant_on_request {
                AuthorizationState::Authorized
            } else {
                AuthorizationState::Denied
            };
        }
        Ok(status.is_granted())
    }

    async fn calendars(&self) -> CalGateResult<Vec<CalendarRef>> {
        self.calendar_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.calendars.clone())
    }

    async fn events_in_range(
        &self,
        calendars: &[CalendarRef],
        range: &DateRange,
    ) -> CalGateResult<Vec<EventRecord>> {
        let events = self.events.lock().unwrap();
        let matches = events
            .iter()
            .filter(|event| calendars.iter().any(|c| c.id == event.calendar_id))
            .filter(|event| range.intersects(event.start, event.end))
            .cloned()
            .collect();
        Ok(matches)
    }

    async fn create_event(&self, draft: &EventDraft) -> CalGateResult<EventRecord> {
        let calendar = self
            .calendars
            .iter()
            .find(|c| c.id == draft.calendar_id)
            .ok_or_else(|| {
                CalGateError::Persistence(format!("unknown calendar '{}'", draft.calendar_id))
            })?;

        if !calendar.writable {
            return Err(CalGateError::Persistence(format!(
                "calendar '{}' is read-only",
                calendar.title
            )));
        }

        let record = EventRecord {
            id: uuid::Uuid::new_v4().to_string(),
            title: Some(draft.title.clone()),
            start: draft.start,
            end: draft.end,
            all_day: draft.all_day,
            calendar_id: draft.calendar_id.clone(),
        };
        self.events.lock().unwrap().push(record.clone());

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn cal(id: &str) -> CalendarRef {
        CalendarRef::new(id, id, "Test")
    }

    #[tokio::test]
    async fn test_request_access_transitions_once() {
        let store = MemoryStore::new(vec![cal("a")]);
        assert!(store.request_access().await.unwrap());
        assert_eq!(
            store.authorization_status().await.unwrap(),
            AuthorizationState::Authorized
        );

        let store = MemoryStore::new(vec![cal("a")]).denying();
        assert!(!store.request_access().await.unwrap());
        assert_eq!(
            store.authorization_status().await.unwrap(),
            AuthorizationState::Denied
        );
    }

    #[tokio::test]
    async fn test_create_event_rejects_read_only_calendar() {
        let store = MemoryStore::authorized(vec![cal("rw"), cal("ro").read_only()]);

        let draft = EventDraft {
            title: "Standup".to_string(),
            start: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap(),
            all_day: false,
            calendar_id: "ro".to_string(),
        };
        assert!(matches!(
            store.create_event(&draft).await,
            Err(CalGateError::Persistence(_))
        ));

        let draft = EventDraft {
            calendar_id: "rw".to_string(),
            ..draft
        };
        let record = store.create_event(&draft).await.unwrap();
        assert!(!record.id.is_empty());
        assert_eq!(record.title.as_deref(), Some("Standup"));
    }

    #[tokio::test]
    async fn test_events_in_range_filters_by_calendar_and_interval() {
        let store = MemoryStore::authorized(vec![cal("a"), cal("b")]);
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        store.seed_events(vec![
            EventRecord {
                id: "1".to_string(),
                title: Some("in A".to_string()),
                start,
                end: start + chrono::Duration::hours(1),
                all_day: false,
                calendar_id: "a".to_string(),
            },
            EventRecord {
                id: "2".to_string(),
                title: Some("in B".to_string()),
                start,
                end: start + chrono::Duration::hours(1),
                all_day: false,
                calendar_id: "b".to_string(),
            },
        ]);

        let range = DateRange::single_day(start).unwrap();
        let only_a = store.events_in_range(&[cal("a")], &range).await.unwrap();
        assert_eq!(only_a.len(), 1);
        assert_eq!(only_a[0].id, "1");

        let next_day = DateRange::single_day(start + chrono::Duration::days(1)).unwrap();
        let none = store.events_in_range(&[cal("a")], &next_day).await.unwrap();
        assert!(none.is_empty());
    }
}
