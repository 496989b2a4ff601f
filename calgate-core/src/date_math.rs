//! Field-level date fixing and calendar-aware shifting.
//!
//! `fix` rebuilds a timestamp with selected fields replaced; the `shift_*`
//! functions offset a timestamp by whole seconds, days or calendar months.
//! `fix` followed by a shift is order-independent only when the shifted
//! unit does not overlap a fixed field (e.g. fixing the day and then
//! shifting by months may clamp differently than shifting first).

use chrono::{DateTime, Datelike, Duration, Months, TimeZone, Timelike, Utc};

use crate::error::{CalGateError, CalGateResult};

/// Fields to override on a timestamp. `None` keeps the original value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldFix {
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
}

impl FieldFix {
    /// Override only the time-of-day fields.
    pub fn time(hour: u32, minute: u32, second: u32) -> Self {
        FieldFix {
            day: None,
            hour: Some(hour),
            minute: Some(minute),
            second: Some(second),
        }
    }

    /// 00:00:00 on the timestamp's day.
    pub fn start_of_day() -> Self {
        Self::time(0, 0, 0)
    }

    /// 23:59:59 on the timestamp's day.
    pub fn end_of_day() -> Self {
        Self::time(23, 59, 59)
    }

    pub fn with_day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }
}

/// Return `date` with only the fields given in `fields` replaced.
///
/// Unspecified fields keep `date`'s values; sub-second precision is
/// dropped. Hour, minute and second outside their natural ranges and day 0
/// or above 31 are rejected. A day beyond the length of `date`'s month
/// clamps to the month's last day.
pub fn fix(date: DateTime<Utc>, fields: &FieldFix) -> CalGateResult<DateTime<Utc>> {
    if let Some(hour) = fields.hour {
        if hour > 23 {
            return Err(invalid_field("hour", hour));
        }
    }
    if let Some(minute) = fields.minute {
        if minute > 59 {
            return Err(invalid_field("minute", minute));
        }
    }
    if let Some(second) = fields.second {
        if second > 59 {
            return Err(invalid_field("second", second));
        }
    }
    if let Some(day) = fields.day {
        if day == 0 || day > 31 {
            return Err(invalid_field("day", day));
        }
    }

    let day = fields
        .day
        .map(|d| d.min(days_in_month(date.year(), date.month())))
        .unwrap_or_else(|| date.day());
    let hour = fields.hour.unwrap_or_else(|| date.hour());
    let minute = fields.minute.unwrap_or_else(|| date.minute());
    let second = fields.second.unwrap_or_else(|| date.second());

    Utc.with_ymd_and_hms(date.year(), date.month(), day, hour, minute, second)
        .single()
        .ok_or(CalGateError::DateOutOfRange)
}

/// Offset `date` by `amount` whole seconds.
pub fn shift_seconds(date: DateTime<Utc>, amount: i64) -> CalGateResult<DateTime<Utc>> {
    date.checked_add_signed(Duration::seconds(amount))
        .ok_or(CalGateError::DateOutOfRange)
}

/// Offset `date` by `amount` whole days.
pub fn shift_days(date: DateTime<Utc>, amount: i64) -> CalGateResult<DateTime<Utc>> {
    date.checked_add_signed(Duration::days(amount))
        .ok_or(CalGateError::DateOutOfRange)
}

/// Offset `date` by `amount` calendar months.
///
/// When the source day does not exist in the target month the result
/// clamps to the target month's last day (Jan 31 + 1 month = Feb 28, or
/// Feb 29 in leap years). The clamp is not undone by shifting back, so
/// round trips only preserve the day-of-month when it exists in both
/// months.
pub fn shift_months(date: DateTime<Utc>, amount: i32) -> CalGateResult<DateTime<Utc>> {
    let shifted = if amount >= 0 {
        date.checked_add_months(Months::new(amount as u32))
    } else {
        date.checked_sub_months(Months::new(amount.unsigned_abs()))
    };

    shifted.ok_or(CalGateError::DateOutOfRange)
}

fn invalid_field(name: &str, value: u32) -> CalGateError {
    CalGateError::InvalidDateField(format!("{name} = {value}"))
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
