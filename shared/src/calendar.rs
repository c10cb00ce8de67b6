//! Month-grid generation for the date-picker calendar.
//!
//! The grid is 7 columns wide with Monday as the first column. It starts
//! with one blank cell per weekday preceding the 1st of the month, then one
//! day cell per calendar day. No trailing padding is emitted.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One cell in the Monday-first calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarCell {
    /// Leading placeholder before the first day of the month
    Blank,
    /// A day of the month (1-based)
    Day(u32),
}

/// A rendered view month: the normalized year/month plus its cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}

impl CalendarMonth {
    /// Number of blank cells before day 1, always in 0..=6.
    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|c| matches!(c, CalendarCell::Blank))
            .count()
    }

    /// The full date of a day cell in this view month.
    pub fn date_of(&self, day: u32) -> NaiveDate {
        first_of_month(self.year, self.month)
            .with_day(day)
            .expect("day within month")
    }
}

/// Build the grid for a view month. `month` is 1-based but may under- or
/// overflow (0 means the previous December, 13 the next January); the year
/// rolls accordingly.
pub fn month_grid(year: i32, month: u32) -> CalendarMonth {
    let (year, month) = normalize(year, month as i32);
    let first = first_of_month(year, month);
    // chrono's num_days_from_monday is the (native - 1 + 7) mod 7 translation
    let leading = first.weekday().num_days_from_monday();

    let mut cells = Vec::with_capacity((leading + days_in_month(year, month)) as usize);
    for _ in 0..leading {
        cells.push(CalendarCell::Blank);
    }
    for day in 1..=days_in_month(year, month) {
        cells.push(CalendarCell::Day(day));
    }

    CalendarMonth { year, month, cells }
}

/// The view month before (year, month), rolling over year boundaries.
pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    normalize(year, month as i32 - 1)
}

/// The view month after (year, month), rolling over year boundaries.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    normalize(year, month as i32 + 1)
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = next_month(year, month);
    first_of_month(ny, nm)
        .pred_opt()
        .expect("previous day of a month start exists")
        .day()
}

/// Last day of the month before the given view month. Used to decide
/// whether backward month navigation would still show selectable days.
pub fn last_day_of_prev_month(year: i32, month: u32) -> NaiveDate {
    first_of_month_normalized(year, month)
        .pred_opt()
        .expect("previous day of a month start exists")
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("month normalized to 1..=12")
}

fn first_of_month_normalized(year: i32, month: u32) -> NaiveDate {
    let (year, month) = normalize(year, month as i32);
    first_of_month(year, month)
}

/// Map an arbitrary 1-based month offset onto (year, month in 1..=12).
fn normalize(year: i32, month: i32) -> (i32, u32) {
    let zero_based = month - 1;
    (
        year + zero_based.div_euclid(12),
        (zero_based.rem_euclid(12) + 1) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn june_2024_starts_on_saturday() {
        // 2024-06-01 is a Saturday, so five blanks (Mon..Fri) lead the grid
        let grid = month_grid(2024, 6);
        assert_eq!(grid.leading_blanks(), 5);
        assert_eq!(grid.cells.len(), 5 + 30);
        assert_eq!(grid.cells[5], CalendarCell::Day(1));
        assert_eq!(*grid.cells.last().unwrap(), CalendarCell::Day(30));
    }

    #[test]
    fn monday_start_means_no_blanks() {
        // 2024-07-01 is a Monday
        let grid = month_grid(2024, 7);
        assert_eq!(grid.leading_blanks(), 0);
        assert_eq!(grid.cells[0], CalendarCell::Day(1));
    }

    #[test]
    fn sunday_start_means_six_blanks() {
        // 2024-09-01 is a Sunday, the last column
        let grid = month_grid(2024, 9);
        assert_eq!(grid.leading_blanks(), 6);
    }

    #[test]
    fn leading_blanks_match_weekday_for_every_month() {
        for year in 2020..=2030 {
            for month in 1..=12 {
                let grid = month_grid(year, month);
                let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
                let leading = grid.leading_blanks();
                assert!(leading <= 6);
                assert_eq!(leading as u32, first.weekday().num_days_from_monday());
                assert_eq!(
                    grid.cells.len(),
                    leading + days_in_month(year, month) as usize
                );
            }
        }
    }

    #[test]
    fn month_zero_rolls_back_to_december() {
        let grid = month_grid(2024, 0);
        assert_eq!((grid.year, grid.month), (2023, 12));
    }

    #[test]
    fn month_thirteen_rolls_forward_to_january() {
        let grid = month_grid(2024, 13);
        assert_eq!((grid.year, grid.month), (2025, 1));
    }

    #[test]
    fn navigation_rolls_year_boundaries() {
        assert_eq!(prev_month(2024, 1), (2023, 12));
        assert_eq!(next_month(2024, 12), (2025, 1));
        assert_eq!(prev_month(2024, 6), (2024, 5));
        assert_eq!(next_month(2024, 6), (2024, 7));
    }

    #[test]
    fn february_length_follows_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn last_day_of_prev_month_rolls_january() {
        assert_eq!(
            last_day_of_prev_month(2024, 1),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
        assert_eq!(
            last_day_of_prev_month(2024, 3),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn date_of_resolves_day_cells() {
        let grid = month_grid(2024, 6);
        assert_eq!(
            grid.date_of(15),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
    }
}
