//! Rotation date arithmetic.
//!
//! All functions work on calendar days (`NaiveDate`), never on instants, and
//! take the reference day explicitly so callers and tests control "today".

use chrono::{Days, NaiveDate};

/// Fixed rotation length: 12 weeks.
pub const ROTATION_DAYS: u64 = 84;

/// Default look-ahead for "upcoming" presentations and sign-outs.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 7;

/// Urgency band of a target date, as shown on the timelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineBand {
    /// 0..=7 days left
    Urgent,
    /// 8..=14 days left
    Warning,
    /// more than 14 days left
    Ok,
    /// date already passed
    Past,
}

impl TimelineBand {
    pub fn from_days(days_until: i64) -> Self {
        match days_until {
            d if d < 0 => TimelineBand::Past,
            0..=7 => TimelineBand::Urgent,
            8..=14 => TimelineBand::Warning,
            _ => TimelineBand::Ok,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineBand::Urgent => "urgent",
            TimelineBand::Warning => "warning",
            TimelineBand::Ok => "ok",
            TimelineBand::Past => "past",
        }
    }
}

/// Sign-out = sign-in + 84 days, regardless of month lengths.
pub fn calculate_sign_out_date(sign_in: NaiveDate) -> NaiveDate {
    sign_in + Days::new(ROTATION_DAYS)
}

/// `today < date < today + window`, both bounds exclusive.
pub fn is_upcoming(date: NaiveDate, today: NaiveDate, window_days: u32) -> bool {
    let horizon = today + Days::new(u64::from(window_days));
    today < date && date < horizon
}

/// Signed whole days from `today` to `date`; negative means past.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

pub fn timeline_band(date: NaiveDate, today: NaiveDate) -> TimelineBand {
    TimelineBand::from_days(days_until(date, today))
}

/// Elapsed share of the `start → target` interval, as a percentage in [0, 100].
///
/// A zero-length (or inverted) interval is 100 once `start` is reached, 0 before.
pub fn timeline_progress(start: NaiveDate, target: NaiveDate, today: NaiveDate) -> f64 {
    let total = (target - start).num_days();

    if total <= 0 {
        return if today >= start { 100.0 } else { 0.0 };
    }

    let elapsed = (today - start).num_days();
    let pct = elapsed as f64 / total as f64 * 100.0;
    pct.clamp(0.0, 100.0)
}

/// `Mar 26, 2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Same as [`format_date`], with a dash for missing dates.
pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn sign_out_is_twelve_weeks_not_three_months() {
        assert_eq!(calculate_sign_out_date(d(2025, 1, 1)), d(2025, 3, 26));
        // across a leap day
        assert_eq!(calculate_sign_out_date(d(2024, 2, 1)), d(2024, 4, 25));
        assert_eq!(calculate_sign_out_date(d(2024, 12, 15)), d(2025, 3, 9));
    }

    #[test]
    fn upcoming_bounds_are_exclusive() {
        let today = d(2025, 5, 10);
        assert!(!is_upcoming(today, today, 7));
        assert!(is_upcoming(d(2025, 5, 11), today, 7));
        assert!(is_upcoming(d(2025, 5, 16), today, 7));
        assert!(!is_upcoming(d(2025, 5, 17), today, 7));
        assert!(!is_upcoming(d(2025, 5, 9), today, 7));
    }

    #[test]
    fn days_until_is_signed() {
        let today = d(2025, 5, 10);
        assert_eq!(days_until(d(2025, 5, 20), today), 10);
        assert_eq!(days_until(d(2025, 5, 1), today), -9);
        assert_eq!(days_until(today, today), 0);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(TimelineBand::from_days(-1), TimelineBand::Past);
        assert_eq!(TimelineBand::from_days(0), TimelineBand::Urgent);
        assert_eq!(TimelineBand::from_days(7), TimelineBand::Urgent);
        assert_eq!(TimelineBand::from_days(8), TimelineBand::Warning);
        assert_eq!(TimelineBand::from_days(14), TimelineBand::Warning);
        assert_eq!(TimelineBand::from_days(15), TimelineBand::Ok);
    }

    #[test]
    fn progress_interpolates_and_clamps() {
        let start = d(2025, 1, 1);
        let target = d(2025, 1, 11);
        assert_eq!(timeline_progress(start, target, d(2025, 1, 6)), 50.0);
        assert_eq!(timeline_progress(start, target, d(2024, 12, 1)), 0.0);
        assert_eq!(timeline_progress(start, target, d(2025, 3, 1)), 100.0);
    }

    #[test]
    fn progress_of_empty_interval_does_not_divide_by_zero() {
        let day = d(2025, 1, 1);
        assert_eq!(timeline_progress(day, day, day), 100.0);
        assert_eq!(timeline_progress(day, day, d(2024, 12, 31)), 0.0);
    }

    #[test]
    fn display_format() {
        assert_eq!(format_date(d(2025, 3, 26)), "Mar 26, 2025");
        assert_eq!(format_optional_date(None), "-");
    }

    proptest! {
        #[test]
        fn sign_out_is_always_84_days_later(offset in 0i64..1100) {
            // 2023-01-01 .. early 2026, covering the 2024 leap day
            let sign_in = d(2023, 1, 1) + chrono::Duration::days(offset);
            let sign_out = calculate_sign_out_date(sign_in);
            prop_assert_eq!((sign_out - sign_in).num_days(), 84);
        }

        #[test]
        fn bands_partition_the_integers(n in -10_000i64..10_000) {
            let hits = [
                (0..=7).contains(&n),
                (8..=14).contains(&n),
                n > 14,
                n < 0,
            ];
            prop_assert_eq!(hits.iter().filter(|h| **h).count(), 1);

            let expected = if n < 0 {
                TimelineBand::Past
            } else if n <= 7 {
                TimelineBand::Urgent
            } else if n <= 14 {
                TimelineBand::Warning
            } else {
                TimelineBand::Ok
            };
            prop_assert_eq!(TimelineBand::from_days(n), expected);
        }
    }
}
