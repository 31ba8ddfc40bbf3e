//! Scoring-window arithmetic.
//!
//! Win counts are scored over the office week: Monday 00:00:00.000 through
//! Friday 23:59:59.999 in local time. The window is recomputed from the wall
//! clock at query time; nothing about it is persisted.

use chrono::{
    DateTime, Datelike, Duration, Local, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWindow {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl ScoringWindow {
    /// Window start in UTC, for comparisons against stored timestamps.
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    /// Window end in UTC, for comparisons against stored timestamps.
    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }

    pub fn contains(&self, at: DateTime<Local>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// The window containing the current wall-clock time.
pub fn current_window() -> ScoringWindow {
    window_containing(Local::now())
}

/// The Monday-to-Friday window of the week containing `now`.
pub fn window_containing(now: DateTime<Local>) -> ScoringWindow {
    let days_from_monday = now.weekday().num_days_from_monday() as i64;
    let monday = (now.date_naive() - Duration::days(days_from_monday)).and_time(NaiveTime::MIN);
    // Friday 23:59:59.999 == Saturday 00:00 minus one millisecond
    let friday_end = monday + Duration::days(5) - Duration::milliseconds(1);

    ScoringWindow {
        start: resolve_local(monday),
        end: resolve_local(friday_end),
    }
}

/// Resolve a naive local timestamp, picking the earlier instant on DST
/// ambiguity and falling back to UTC interpretation for skipped times.
fn resolve_local(naive: NaiveDateTime) -> DateTime<Local> {
    match naive.and_local_timezone(Local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => Local.from_utc_datetime(&naive),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn local(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        resolve_local(
            chrono::NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn window_starts_monday_midnight() {
        // 2025-03-05 is a Wednesday
        let window = window_containing(local(2025, 3, 5, 15));
        assert_eq!(window.start.weekday(), Weekday::Mon);
        assert_eq!(window.start.date_naive().day(), 3);
        assert_eq!(window.start.time(), NaiveTime::MIN);
    }

    #[test]
    fn window_ends_friday_last_millisecond() {
        let window = window_containing(local(2025, 3, 5, 15));
        assert_eq!(window.end.weekday(), Weekday::Fri);
        assert_eq!(window.end.date_naive().day(), 7);
        assert_eq!(
            window.end.time(),
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
    }

    #[test]
    fn monday_is_its_own_window_start() {
        let window = window_containing(local(2025, 3, 3, 0));
        assert_eq!(window.start.date_naive(), local(2025, 3, 3, 0).date_naive());
    }

    #[test]
    fn weekend_still_maps_to_the_past_monday() {
        // 2025-03-09 is a Sunday; its week began on the 3rd
        let window = window_containing(local(2025, 3, 9, 10));
        assert_eq!(window.start.date_naive().day(), 3);
        assert!(!window.contains(local(2025, 3, 9, 10)));
    }

    #[test]
    fn same_day_calls_are_idempotent() {
        let now = local(2025, 3, 5, 9);
        let later = local(2025, 3, 5, 17);
        assert_eq!(window_containing(now), window_containing(later));
    }

    #[test]
    fn contains_covers_the_work_week() {
        let window = window_containing(local(2025, 3, 5, 15));
        assert!(window.contains(local(2025, 3, 3, 0)));
        assert!(window.contains(local(2025, 3, 7, 23)));
        assert!(!window.contains(local(2025, 3, 8, 0)));
    }

    #[test]
    fn utc_accessors_agree_with_local_bounds() {
        let window = window_containing(local(2025, 3, 5, 15));
        assert_eq!(window.start_utc(), window.start.with_timezone(&Utc));
        assert_eq!(window.end_utc(), window.end.with_timezone(&Utc));
    }
}
