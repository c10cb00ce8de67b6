//! Night counting and total price.
//!
//! Used twice: by the client for the live preview and by the booking
//! authority for the persisted total. Keeping one implementation in the
//! shared crate is what prevents the two from drifting apart.

use chrono::NaiveDate;

/// Whole nights between check-in and check-out. Callers guarantee
/// `check_out > check_in`; a nonpositive result is a caller defect.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Total price for a stay: nights times the nightly rate, no extra
/// rounding beyond the rate's own precision.
pub fn total_price(nights: i64, nightly_rate: f64) -> f64 {
    nights as f64 * nightly_rate
}

/// Convenience for the (nights, total) pair both sides display or persist.
pub fn quote(check_in: NaiveDate, check_out: NaiveDate, nightly_rate: f64) -> (i64, f64) {
    let nights = nights_between(check_in, check_out);
    (nights, total_price(nights, nightly_rate))
}
