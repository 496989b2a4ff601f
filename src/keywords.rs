//! Keyword frequencies from recent event titles.
//!
//! Splits the past three months into three recency windows (past week,
//! week-to-month, month-to-three-months), tokenizes the titles of the
//! events found in each, and sums a recency weight per token occurrence.
//! More recent words score higher.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use calgate_core::date_math::{self, FieldFix};
use calgate_core::{CalGateResult, CalendarRef, DateRange};

use crate::service::CalendarService;

/// Tokens shorter than this are dropped.
pub const MIN_TOKEN_LENGTH: usize = 2;

const WINDOW_WEIGHTS: [f64; 3] = [3.0, 2.0, 1.0];

/// Score keywords from event titles over the three months up to `now`.
///
/// Returns token -> summed recency weight. `now` is caller-supplied so
/// results are reproducible.
pub async fn keyword_frequencies(
    service: &CalendarService,
    calendars: &[CalendarRef],
    now: DateTime<Utc>,
) -> CalGateResult<HashMap<String, f64>> {
    let mut scores: HashMap<String, f64> = HashMap::new();

    for (window, weight) in windows(now)?.into_iter().zip(WINDOW_WEIGHTS) {
        let events = service.events_in_range(calendars, &window).await?;
        for event in &events {
            let Some(title) = event.title.as_deref() else {
                continue;
            };
            for token in tokenize(title, MIN_TOKEN_LENGTH) {
                *scores.entry(token).or_insert(0.0) += weight;
            }
        }
    }

    Ok(scores)
}

/// Lowercase alphanumeric tokens of at least `min_length` characters.
pub fn tokenize(text: &str, min_length: usize) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= min_length)
        .map(str::to_string)
        .collect()
}

/// The three recency windows, most recent first: past week, week to a
/// month ago, a month to three months ago. All bounds land on day
/// boundaries; the most recent window ends at the last second of `now`'s
/// day.
fn windows(now: DateTime<Utc>) -> CalGateResult<[DateRange; 3]> {
    let start_of_day = FieldFix::start_of_day();

    let todays_end =
        date_math::shift_seconds(date_math::fix(date_math::shift_days(now, 1)?, &start_of_day)?, -1)?;
    let week_ago = date_math::fix(date_math::shift_days(now, -7)?, &start_of_day)?;
    let month_ago = date_math::fix(date_math::shift_months(now, -1)?, &start_of_day)?;
    let three_months_ago = date_math::fix(date_math::shift_months(now, -3)?, &start_of_day)?;

    Ok([
        DateRange::new(week_ago, todays_end)?,
        DateRange::new(month_ago, date_math::shift_seconds(week_ago, -1)?)?,
        DateRange::new(three_months_ago, date_math::shift_seconds(month_ago, -1)?)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalGateConfig;
    use crate::gate::AuthorizationGate;
    use crate::store::MemoryStore;
    use calgate_core::EventRecord;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn titled(id: &str, title: &str, start: DateTime<Utc>) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            title: Some(title.to_string()),
            start,
            end: start + Duration::hours(1),
            all_day: false,
            calendar_id: "a".to_string(),
        }
    }

    fn make_service(store: Arc<MemoryStore>) -> CalendarService {
        let config = CalGateConfig::with_usage_description("Shows your agenda");
        let gate = Arc::new(AuthorizationGate::new(store.clone(), &config));
        CalendarService::new(store, gate, &config)
    }

    #[test]
    fn test_tokenize_lowercases_splits_and_filters() {
        let tokens = tokenize("Design Review: Q2 sync w/ Ana", 2);
        assert_eq!(tokens, ["design", "review", "q2", "sync", "ana"]);

        assert!(tokenize("a / b", 2).is_empty());
    }

    #[test]
    fn test_windows_are_adjacent_and_disjoint() {
        let now = dt(2024, 6, 15, 14, 30, 0);
        let [recent, mid, old] = windows(now).unwrap();

        assert_eq!(recent.end(), dt(2024, 6, 15, 23, 59, 59));
        assert_eq!(recent.start(), dt(2024, 6, 8, 0, 0, 0));
        assert_eq!(mid.end(), dt(2024, 6, 7, 23, 59, 59));
        assert_eq!(mid.start(), dt(2024, 5, 15, 0, 0, 0));
        assert_eq!(old.end(), dt(2024, 5, 14, 23, 59, 59));
        assert_eq!(old.start(), dt(2024, 3, 15, 0, 0, 0));
    }

    #[tokio::test]
    async fn test_recency_weighting() {
        let now = dt(2024, 6, 15, 14, 30, 0);
        let store = Arc::new(MemoryStore::authorized(vec![CalendarRef::new(
            "a", "Personal", "Local",
        )]));
        store.seed_events(vec![
            titled("1", "standup sync", dt(2024, 6, 14, 9, 0, 0)),
            titled("2", "standup retro", dt(2024, 6, 1, 9, 0, 0)),
            titled("3", "standup", dt(2024, 4, 2, 9, 0, 0)),
        ]);
        let service = make_service(store);
        let calendars = service.calendars().await.unwrap();

        let scores = keyword_frequencies(&service, &calendars, now).await.unwrap();

        // One occurrence per window: 3 + 2 + 1.
        assert_eq!(scores["standup"], 6.0);
        assert_eq!(scores["sync"], 3.0);
        assert_eq!(scores["retro"], 2.0);
        assert!(!scores.contains_key("a"));
    }

    #[tokio::test]
    async fn test_untitled_events_are_skipped() {
        let now = dt(2024, 6, 15, 14, 30, 0);
        let store = Arc::new(MemoryStore::authorized(vec![CalendarRef::new(
            "a", "Personal", "Local",
        )]));
        let start = dt(2024, 6, 14, 9, 0, 0);
        store.seed_events(vec![EventRecord {
            id: "untitled".to_string(),
            title: None,
            start,
            end: start + Duration::hours(1),
            all_day: false,
            calendar_id: "a".to_string(),
        }]);
        let service = make_service(store);
        let calendars = service.calendars().await.unwrap();

        let scores = keyword_frequencies(&service, &calendars, now).await.unwrap();
        assert!(scores.is_empty());
    }
}
