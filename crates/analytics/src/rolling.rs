//! Calendar-time rolling windows.
//!
//! A window ending at date `d` holds every sample dated in `[d - days, d]`,
//! however many rows that is. Gaps (weekends, holidays, missing data) shrink
//! the sample count instead of stretching the window back in time.

use crate::calendar::days_between;
use chrono::NaiveDate;
use core_types::DerivedSeries;
use std::ops::Range;

/// Index ranges of the calendar windows ending at each date.
///
/// `dates` must be sorted ascending. Both ends only ever advance, so a full
/// pass is linear in the number of dates.
#[derive(Debug, Clone)]
pub struct CalendarWindows<'a> {
    dates: &'a [NaiveDate],
    days: i64,
    left: usize,
    right: usize,
}

impl<'a> CalendarWindows<'a> {
    /// A negative `days` is treated as zero: every window still holds its
    /// own end date.
    pub fn new(dates: &'a [NaiveDate], days: i64) -> Self {
        Self {
            dates,
            days: days.max(0),
            left: 0,
            right: 0,
        }
    }
}

impl Iterator for CalendarWindows<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let end = *self.dates.get(self.right)?;
        while days_between(self.dates[self.left], end) > self.days {
            self.left += 1;
        }
        self.right += 1;
        Some(self.left..self.right)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dates.len() - self.right;
        (remaining, Some(remaining))
    }
}

/// Applies `stat` to every calendar window of `samples` and collects the
/// results dated at the window's end.
///
/// Windows for which `stat` returns `None` are left out of the output.
pub fn rolling_calendar<F>(samples: &[(NaiveDate, f64)], days: i64, stat: F) -> DerivedSeries
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let (dates, values): (Vec<NaiveDate>, Vec<f64>) = samples.iter().copied().unzip();

    let mut out = DerivedSeries::with_capacity(samples.len());
    for window in CalendarWindows::new(&dates, days) {
        let date = dates[window.end - 1];
        if let Some(value) = stat(&values[window]) {
            out.push(date, value);
        }
    }
    out
}
