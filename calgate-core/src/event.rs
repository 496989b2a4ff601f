//! Store-neutral event types.
//!
//! These types represent calendar events independently of any platform
//! store. Stores convert their native records into `EventRecord`, and the
//! facade works exclusively with these shapes for querying and creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event as returned by the platform store.
///
/// Records are owned and persisted by the store; this system never deletes
/// or mutates an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Store-assigned identifier.
    pub id: String,
    pub title: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    /// Identifier of the owning `CalendarRef`.
    pub calendar_id: String,
}

/// A new event handed to the store for persistence.
///
/// The writer resolves the default duration and target calendar before a
/// draft is built, so `start`, `end` and `calendar_id` are always concrete
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub calendar_id: String,
}
