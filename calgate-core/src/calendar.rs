//! Store-neutral calendar reference.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar as enumerated by the platform store.
///
/// Owned and persisted by the store; this system only holds transient
/// copies and never writes calendars back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRef {
    /// Store-assigned opaque identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Title of the owning source/account (e.g. "iCloud", "Work").
    pub source: String,
    /// Whether the store accepts new events on this calendar.
    pub writable: bool,
}

impl CalendarRef {
    pub fn new(id: &str, title: &str, source: &str) -> Self {
        CalendarRef {
            id: id.to_string(),
            title: title.to_string(),
            source: source.to_string(),
            writable: true,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }
}

impl fmt::Display for CalendarRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.source)
    }
}
