use chrono::{Datelike, NaiveDate};

/// Whole calendar days from `from` to `to` (negative if `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// The last day of the calendar quarter containing `date`.
///
/// Quarters are Jan-Mar, Apr-Jun, Jul-Sep and Oct-Dec, so the end is always
/// Mar 31, Jun 30, Sep 30 or Dec 31 of the same year.
pub fn quarter_end(date: NaiveDate) -> NaiveDate {
    let end_month = (date.month0() / 3 + 1) * 3;
    let end_day = match end_month {
        6 | 9 => 30,
        _ => 31,
    };
    NaiveDate::from_ymd_opt(date.year(), end_month, end_day)
        .expect("quarter-end day always exists in its month")
}
