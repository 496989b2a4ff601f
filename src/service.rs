//! Calendar query and event creation facade.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::debug;
use tokio::sync::RwLock;

use calgate_core::{
    CalGateError, CalGateResult, CalendarRef, DateRange, EventDraft, EventRecord,
};

use crate::config::CalGateConfig;
use crate::gate::AuthorizationGate;
use crate::store::EventStore;

/// Duration assigned to a new event when no end is given.
const DEFAULT_EVENT_DURATION_HOURS: i64 = 2;

/// Typed facade over the platform calendar store.
///
/// Owns the process-lifetime calendar cache and checks the authorization
/// gate before every store access. Construct one instance at the
/// application's composition root and pass it to consumers.
pub struct CalendarService {
    store: Arc<dyn EventStore>,
    gate: Arc<AuthorizationGate>,
    default_calendar: Option<String>,
    calendars: RwLock<Option<Vec<CalendarRef>>>,
}

impl CalendarService {
    pub fn new(
        store: Arc<dyn EventStore>,
        gate: Arc<AuthorizationGate>,
        config: &CalGateConfig,
    ) -> Self {
        CalendarService {
            store,
            gate,
            default_calendar: config.default_calendar.clone(),
            calendars: RwLock::new(None),
        }
    }

    pub fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }

    // =========================================================================
    // Calendar listing
    // =========================================================================

    /// The store's calendar list, fetched once per process and cached.
    ///
    /// Calendars added or removed externally are not observed until
    /// `invalidate_calendars` is called (or the process restarts).
    pub async fn calendars(&self) -> CalGateResult<Vec<CalendarRef>> {
        {
            let cached = self.calendars.read().await;
            if let Some(list) = cached.as_ref() {
                return Ok(list.clone());
            }
        }

        // Re-check under the write lock so concurrent first callers fetch
        // only once.
        let mut slot = self.calendars.write().await;
        if let Some(list) = slot.as_ref() {
            return Ok(list.clone());
        }

        self.gate.ensure_authorized().await?;
        let list = self.store.calendars().await?;

        debug!("fetched {} calendars from the store", list.len());
        for calendar in &list {
            debug!("calendar {} (id {})", calendar, calendar.id);
        }

        *slot = Some(list.clone());
        Ok(list)
    }

    /// Drop the cached calendar list so the next access refetches.
    pub async fn invalidate_calendars(&self) {
        *self.calendars.write().await = None;
    }

    // =========================================================================
    // Event queries
    // =========================================================================

    /// All events in the union of `calendars` whose interval intersects
    /// `range`, sorted by start time.
    pub async fn events_in_range(
        &self,
        calendars: &[CalendarRef],
        range: &DateRange,
    ) -> CalGateResult<Vec<EventRecord>> {
        self.gate.ensure_authorized().await?;

        let mut events = self.store.events_in_range(calendars, range).await?;
        events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        Ok(events)
    }

    /// Events on the day containing `day` (00:00:00 through 23:59:59).
    pub async fn events_on_day(
        &self,
        day: DateTime<Utc>,
        calendars: &[CalendarRef],
    ) -> CalGateResult<Vec<EventRecord>> {
        self.events_in_range(calendars, &DateRange::single_day(day)?)
            .await
    }

    /// Events in the month containing `month`, through the last second of
    /// its last day.
    pub async fn events_in_month(
        &self,
        month: DateTime<Utc>,
        calendars: &[CalendarRef],
    ) -> CalGateResult<Vec<EventRecord>> {
        self.events_in_range(calendars, &DateRange::whole_month(month)?)
            .await
    }

    /// Events in the coming year from now.
    pub async fn upcoming_events(
        &self,
        calendars: &[CalendarRef],
    ) -> CalGateResult<Vec<EventRecord>> {
        self.events_in_range(calendars, &DateRange::coming_year(Utc::now())?)
            .await
    }

    // =========================================================================
    // Event creation
    // =========================================================================

    /// Create an event on the default calendar.
    ///
    /// A missing `end` defaults to two hours after `start`; an explicit
    /// end before `start` is rejected. The stored record is returned with
    /// its store-assigned identifier.
    pub async fn add_event(
        &self,
        title: &str,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> CalGateResult<EventRecord> {
        self.gate.ensure_authorized().await?;

        let end = match end {
            Some(end) if end < start => {
                return Err(CalGateError::InvalidRange { start, end });
            }
            Some(end) => end,
            None => start
                .checked_add_signed(Duration::hours(DEFAULT_EVENT_DURATION_HOURS))
                .ok_or(CalGateError::DateOutOfRange)?,
        };

        let calendar = self.default_calendar().await?;
        debug!("creating event '{}' on calendar '{}'", title, calendar.title);

        let draft = EventDraft {
            title: title.to_string(),
            start,
            end,
            all_day: false,
            calendar_id: calendar.id,
        };
        self.store.create_event(&draft).await
    }

    /// The designated default calendar (matched by id or title), or the
    /// first writable calendar when none is designated.
    async fn default_calendar(&self) -> CalGateResult<CalendarRef> {
        let calendars = self.calendars().await?;

        if let Some(wanted) = self.default_calendar.as_deref() {
            if let Some(calendar) = calendars
                .iter()
                .find(|c| c.id == wanted || c.title == wanted)
            {
                return Ok(calendar.clone());
            }
        }

        calendars
            .into_iter()
            .find(|c| c.writable)
            .ok_or(CalGateError::NoWritableCalendar)
    }
}
