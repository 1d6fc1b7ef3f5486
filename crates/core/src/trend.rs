//! Week-over-week compliance aggregation.
//!
//! Weeks run Monday to Sunday. The trend between two weekly averages is a
//! relative change -- percent of the previous week's percentage -- not an
//! absolute point difference: going from 50% to 75% compliance is a "+50%"
//! trend. Dashboards depend on that exact reading.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::types::Timestamp;

/// Derived week-over-week compliance movement for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceTrend {
    /// Mean compliance over the current week's verifications.
    pub current_week: i32,
    /// Mean compliance over the previous week's verifications.
    pub previous_week: i32,
    /// Signed relative change, e.g. `"+50%"`, `"-12%"`, `"0%"`.
    pub trend: String,
}

/// Half-open bounds `[monday, next_monday)` of the Monday-to-Sunday week
/// containing `reference`.
pub fn week_bounds(reference: Timestamp) -> (Timestamp, Timestamp) {
    let date = reference.date_naive();
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    let start = monday.and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(7))
}

/// Bounds of the week before the one containing `reference`.
pub fn previous_week_bounds(reference: Timestamp) -> (Timestamp, Timestamp) {
    week_bounds(reference - Duration::days(7))
}

/// Arithmetic mean of compliance scores, rounded to nearest; 0 when empty.
pub fn average_compliance(scores: &[i32]) -> i32 {
    if scores.is_empty() {
        return 0;
    }
    let sum: i64 = scores.iter().map(|&s| i64::from(s)).sum();
    (sum as f64 / scores.len() as f64).round() as i32
}

/// Render the trend label for a pair of weekly averages.
///
/// A previous week with no data (average 0) is treated as baseline: the
/// current average becomes the gain outright, avoiding a division by zero.
pub fn trend_label(current: i32, previous: i32) -> String {
    if previous == 0 {
        return if current > 0 {
            format!("+{current}%")
        } else {
            "0%".to_string()
        };
    }

    let delta = ((f64::from(current - previous) / f64::from(previous)) * 100.0).round() as i32;
    if delta > 0 {
        format!("+{delta}%")
    } else {
        format!("{delta}%")
    }
}

/// Build a [`ComplianceTrend`] from two weekly averages.
pub fn compliance_trend(current_week: i32, previous_week: i32) -> ComplianceTrend {
    ComplianceTrend {
        current_week,
        previous_week,
        trend: trend_label(current_week, previous_week),
    }
}

/// Group `(day, compliance)` samples into per-day averages, ordered by day.
///
/// Used by the history view, which charts one value per calendar day.
pub fn daily_averages(samples: &[(NaiveDate, i32)]) -> Vec<(NaiveDate, i32)> {
    let mut by_day: std::collections::BTreeMap<NaiveDate, Vec<i32>> =
        std::collections::BTreeMap::new();
    for &(day, compliance) in samples {
        by_day.entry(day).or_default().push(compliance);
    }

    by_day
        .into_iter()
        .map(|(day, values)| (day, average_compliance(&values)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(y: i32, m: u32, d: u32, h: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    // -- week_bounds ----------------------------------------------------------

    #[test]
    fn week_starts_monday() {
        // 2026-08-06 is a Thursday; its week starts Monday 2026-08-03.
        let (start, end) = week_bounds(ts(2026, 8, 6, 15));
        assert_eq!(start, ts(2026, 8, 3, 0));
        assert_eq!(end, ts(2026, 8, 10, 0));
    }

    #[test]
    fn monday_is_its_own_week_start() {
        let (start, _) = week_bounds(ts(2026, 8, 3, 0));
        assert_eq!(start, ts(2026, 8, 3, 0));
    }

    #[test]
    fn sunday_belongs_to_preceding_monday() {
        let (start, end) = week_bounds(ts(2026, 8, 9, 23));
        assert_eq!(start, ts(2026, 8, 3, 0));
        assert_eq!(end, ts(2026, 8, 10, 0));
    }

    #[test]
    fn previous_week_is_seven_days_back() {
        let (start, end) = previous_week_bounds(ts(2026, 8, 6, 12));
        assert_eq!(start, ts(2026, 7, 27, 0));
        assert_eq!(end, ts(2026, 8, 3, 0));
    }

    // -- average_compliance ---------------------------------------------------

    #[test]
    fn empty_window_averages_zero() {
        assert_eq!(average_compliance(&[]), 0);
    }

    #[test]
    fn average_rounds_to_nearest() {
        assert_eq!(average_compliance(&[80, 85]), 83); // 82.5 rounds up
        assert_eq!(average_compliance(&[80, 81]), 81); // 80.5 rounds up
        assert_eq!(average_compliance(&[80, 80, 81]), 80);
    }

    // -- trend_label ----------------------------------------------------------

    #[test]
    fn no_data_both_weeks_is_flat() {
        assert_eq!(trend_label(0, 0), "0%");
    }

    #[test]
    fn no_prior_data_reports_current_as_gain() {
        assert_eq!(trend_label(80, 0), "+80%");
    }

    #[test]
    fn trend_is_relative_not_absolute() {
        // 50 -> 75 is a 50% relative improvement, not 25 points.
        assert_eq!(trend_label(75, 50), "+50%");
    }

    #[test]
    fn negative_trend_keeps_implicit_sign() {
        assert_eq!(trend_label(50, 75), "-33%");
    }

    #[test]
    fn equal_weeks_is_flat() {
        assert_eq!(trend_label(80, 80), "0%");
    }

    #[test]
    fn compliance_trend_carries_both_averages() {
        let t = compliance_trend(75, 50);
        assert_eq!(t.current_week, 75);
        assert_eq!(t.previous_week, 50);
        assert_eq!(t.trend, "+50%");
    }

    // -- daily_averages -------------------------------------------------------

    #[test]
    fn daily_averages_group_and_order() {
        let d1 = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let samples = vec![(d2, 90), (d1, 80), (d1, 70), (d2, 95)];
        let days = daily_averages(&samples);
        assert_eq!(days, vec![(d1, 75), (d2, 93)]);
    }
}
