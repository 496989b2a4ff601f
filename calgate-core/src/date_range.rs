//! Closed date range used as the query key for event search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date_math::{self, FieldFix};
use crate::error::{CalGateError, CalGateResult};

/// Days covered by the coming-year convenience range.
const COMING_YEAR_DAYS: i64 = 365;

/// A closed interval `[start, end]` of timestamps.
///
/// Events are matched inclusively on both bounds: an event starting
/// exactly at `end` or ending exactly at `start` intersects the range.
/// The invariant `start <= end` is enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> CalGateResult<Self> {
        if start > end {
            return Err(CalGateError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// The whole day containing `day`: `[00:00:00, 23:59:59]`.
    pub fn single_day(day: DateTime<Utc>) -> CalGateResult<Self> {
        let start = date_math::fix(day, &FieldFix::start_of_day())?;
        let end = date_math::fix(day, &FieldFix::end_of_day())?;
        DateRange::new(start, end)
    }

    /// The whole month containing `month`: from the first of the month at
    /// 00:00:00 through the last second of its last day.
    pub fn whole_month(month: DateTime<Utc>) -> CalGateResult<Self> {
        let start = date_math::fix(month, &FieldFix::start_of_day().with_day(1))?;
        let next_month = date_math::shift_months(start, 1)?;
        let end = date_math::shift_seconds(next_month, -1)?;
        DateRange::new(start, end)
    }

    /// The coming 365 days from `from`.
    pub fn coming_year(from: DateTime<Utc>) -> CalGateResult<Self> {
        DateRange::new(from, date_math::shift_days(from, COMING_YEAR_DAYS)?)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Whether an event spanning `[event_start, event_end]` intersects
    /// this range (closed on both sides).
    pub fn intersects(&self, event_start: DateTime<Utc>, event_end: DateTime<Utc>) -> bool {
        event_start <= self.end && event_end >= self.start
    }
}
