//! Expiry selection inside a days-to-expiry window.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Expiry label as used in trading symbols, e.g. `25SEP25`.
#[must_use]
pub fn format_expiry(date: NaiveDate) -> String {
    date.format("%d%b%y").to_string().to_uppercase()
}

/// Expiry dates on `anchor` whose distance from `today` lies in `[min_days, max_days]`.
///
/// For each cycle `w` in `1..=lookahead_cycles` the date `today + w weeks` is
/// rolled forward (never backward) to the anchor weekday. Results are
/// ascending and free of duplicates.
#[must_use]
pub fn target_expiry_dates(
    today: NaiveDate,
    min_days: i64,
    max_days: i64,
    anchor: Weekday,
    lookahead_cycles: u32,
) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = Vec::new();

    for week in 1..=i64::from(lookahead_cycles) {
        let candidate = today + Duration::weeks(week);
        let mut offset = i64::from(anchor.num_days_from_monday())
            - i64::from(candidate.weekday().num_days_from_monday());
        if offset < 0 {
            offset += 7;
        }
        let expiry = candidate + Duration::days(offset);
        let days_to_expiry = (expiry - today).num_days();

        if (min_days..=max_days).contains(&days_to_expiry) && !dates.contains(&expiry) {
            dates.push(expiry);
        }
    }

    dates.sort_unstable();
    dates
}

/// Labels of [`target_expiry_dates`], soonest first.
#[must_use]
pub fn get_target_expiries(
    today: NaiveDate,
    min_days: i64,
    max_days: i64,
    anchor: Weekday,
    lookahead_cycles: u32,
) -> Vec<String> {
    target_expiry_dates(today, min_days, max_days, anchor, lookahead_cycles)
        .into_iter()
        .map(format_expiry)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn label_is_day_month_year_uppercase() {
        assert_eq!(format_expiry(date(2025, 9, 25)), "25SEP25");
        assert_eq!(format_expiry(date(2026, 1, 1)), "01JAN26");
    }

    #[test]
    fn monday_with_thursday_anchor_in_30_to_45_days() {
        // 2025-08-11 is a Monday; Thursdays at +31, +38, +45 days
        let today = date(2025, 8, 11);
        assert_eq!(today.weekday(), Weekday::Mon);

        let dates = target_expiry_dates(today, 30, 45, Weekday::Thu, 8);
        assert_eq!(dates, vec![date(2025, 9, 11), date(2025, 9, 18), date(2025, 9, 25)]);

        let labels = get_target_expiries(today, 30, 45, Weekday::Thu, 8);
        assert_eq!(labels, vec!["11SEP25", "18SEP25", "25SEP25"]);
    }

    #[test]
    fn exact_weekday_match_is_kept() {
        // Thursday today: each candidate already lands on Thursday
        let today = date(2025, 8, 14);
        let dates = target_expiry_dates(today, 7, 14, Weekday::Thu, 8);
        assert_eq!(dates, vec![date(2025, 8, 21), date(2025, 8, 28)]);
    }

    #[test]
    fn friday_rolls_forward_to_next_thursday() {
        // Friday + 1 week is a Friday; the anchor rolls 6 days forward
        let today = date(2025, 8, 15);
        let dates = target_expiry_dates(today, 0, 100, Weekday::Thu, 2);
        assert_eq!(dates, vec![date(2025, 8, 28), date(2025, 9, 4)]);
    }

    #[test]
    fn every_result_is_on_anchor_and_inside_window() {
        let mut today = date(2025, 1, 1);
        for _ in 0..60 {
            for (min_days, max_days) in [(30, 45), (7, 21), (0, 60), (45, 45)] {
                for expiry in target_expiry_dates(today, min_days, max_days, Weekday::Thu, 8) {
                    let dte = (expiry - today).num_days();
                    assert_eq!(expiry.weekday(), Weekday::Thu);
                    assert!((min_days..=max_days).contains(&dte));
                }
            }
            today += Duration::days(1);
        }
    }

    #[test]
    fn window_beyond_lookahead_is_empty() {
        let today = date(2025, 8, 11);
        assert!(get_target_expiries(today, 90, 120, Weekday::Thu, 8).is_empty());
    }

    #[test]
    fn inverted_window_is_empty() {
        let today = date(2025, 8, 11);
        assert!(get_target_expiries(today, 45, 30, Weekday::Thu, 8).is_empty());
    }
}
