//! Selection rules for the check-in/check-out date pickers.
//!
//! All comparisons operate on whole calendar dates, so "normalized to
//! midnight" holds by construction. The same rules back the client widget
//! and the preview it drives; the server re-validates independently.

use chrono::{Duration, NaiveDate};

use crate::calendar;

/// Whether a day may be picked given the effective minimum date.
pub fn is_selectable(date: NaiveDate, min_date: NaiveDate) -> bool {
    date >= min_date
}

/// Effective minimum for the check-in picker: today.
pub fn check_in_min(today: NaiveDate) -> NaiveDate {
    today
}

/// Effective minimum for the check-out picker: the night after check-in
/// (minimum one-night stay), or today while no check-in is chosen.
pub fn check_out_min(check_in: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
    match check_in {
        Some(check_in) => check_in + Duration::days(1),
        None => today,
    }
}

/// Recompute the check-out after the check-in changes. A check-out at or
/// before the new check-in is no longer valid and gets cleared.
pub fn apply_check_in(
    new_check_in: NaiveDate,
    current_check_out: Option<NaiveDate>,
) -> Option<NaiveDate> {
    current_check_out.filter(|check_out| *check_out > new_check_in)
}

/// Whether the calendar may navigate back from the given view month: only
/// while the previous month still contains at least one selectable day.
pub fn can_go_prev(view_year: i32, view_month: u32, min_date: NaiveDate) -> bool {
    calendar::last_day_of_prev_month(view_year, view_month) >= min_date
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn days_before_minimum_are_not_selectable() {
        let min = d(2024, 6, 10);
        assert!(!is_selectable(d(2024, 6, 9), min));
        assert!(is_selectable(d(2024, 6, 10), min));
        assert!(is_selectable(d(2024, 6, 11), min));
    }

    #[test]
    fn check_in_minimum_is_today() {
        let today = d(2024, 6, 10);
        assert_eq!(check_in_min(today), today);
    }

    #[test]
    fn check_out_minimum_enforces_one_night_stay() {
        let today = d(2024, 6, 10);
        assert_eq!(check_out_min(Some(d(2024, 6, 12)), today), d(2024, 6, 13));
        // check-in itself is never a valid check-out
        assert!(!is_selectable(
            d(2024, 6, 12),
            check_out_min(Some(d(2024, 6, 12)), today)
        ));
    }

    #[test]
    fn check_out_minimum_falls_back_to_today() {
        let today = d(2024, 6, 10);
        assert_eq!(check_out_min(None, today), today);
    }

    #[test]
    fn check_out_minimum_rolls_over_month_end() {
        let today = d(2024, 6, 1);
        assert_eq!(check_out_min(Some(d(2024, 6, 30)), today), d(2024, 7, 1));
    }

    #[test]
    fn moving_check_in_past_check_out_clears_it() {
        let check_out = Some(d(2024, 6, 5));
        assert_eq!(apply_check_in(d(2024, 6, 5), check_out), None);
        assert_eq!(apply_check_in(d(2024, 6, 7), check_out), None);
    }

    #[test]
    fn moving_check_in_before_check_out_keeps_it() {
        let check_out = Some(d(2024, 6, 5));
        assert_eq!(apply_check_in(d(2024, 6, 4), check_out), check_out);
        assert_eq!(apply_check_in(d(2024, 6, 1), check_out), check_out);
    }

    #[test]
    fn apply_check_in_without_check_out_stays_unset() {
        assert_eq!(apply_check_in(d(2024, 6, 4), None), None);
    }

    #[test]
    fn back_navigation_stops_at_the_minimum_month() {
        let min = d(2024, 6, 10);
        // June still shows selectable days, so May cannot help
        assert!(!can_go_prev(2024, 6, min));
        // from July back to June is fine: June 30 >= June 10
        assert!(can_go_prev(2024, 7, min));
    }

    #[test]
    fn back_navigation_handles_january() {
        let min = d(2023, 12, 15);
        assert!(can_go_prev(2024, 1, min));
        assert!(!can_go_prev(2023, 12, min));
    }
}
