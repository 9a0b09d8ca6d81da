//! Calendar boundary arithmetic shared by the matchers.
//!
//! Month and quarter numbers are 1-based. All functions are total over
//! valid inputs; an out-of-range month or quarter index is a caller bug
//! and panics rather than producing a wrong range.

use chrono::{Datelike, Duration, NaiveDate};

/// First and last calendar day of a month.
///
/// The last day is the first day of the following month minus one day, so
/// the December rollover and leap-year February need no lookup table.
///
/// # Panics
///
/// Panics if `month` is not in `1..=12` or `year` is outside the range
/// chrono can represent.
#[must_use]
pub fn month_range(year: i32, month: u32) -> (NaiveDate, NaiveDate) {
    assert!((1..=12).contains(&month), "month out of range: {month}");
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("year out of range");
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).expect("year out of range")
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).expect("year out of range")
    };
    (first, next_first - Duration::days(1))
}

/// First and last calendar day of a quarter (Q1 = Jan-Mar .. Q4 = Oct-Dec).
///
/// # Panics
///
/// Panics if `quarter` is not in `1..=4`.
#[must_use]
pub fn quarter_range(year: i32, quarter: u32) -> (NaiveDate, NaiveDate) {
    assert!((1..=4).contains(&quarter), "quarter out of range: {quarter}");
    let first_month = (quarter - 1) * 3 + 1;
    let (start, _) = month_range(year, first_month);
    let (_, end) = month_range(year, first_month + 2);
    (start, end)
}

/// January 1 through December 31 of a year.
#[must_use]
pub fn year_range(year: i32) -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(year, 1, 1).expect("year out of range"),
        NaiveDate::from_ymd_opt(year, 12, 31).expect("year out of range"),
    )
}

/// Sunday through Saturday of the week containing `reference`.
///
/// Weeks are Sunday-based (0=Sunday..6=Saturday). This is a fixed design
/// decision, not configurable.
#[must_use]
pub fn week_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = i64::from(reference.weekday().num_days_from_sunday());
    let start = reference - Duration::days(offset);
    (start, start + Duration::days(6))
}
