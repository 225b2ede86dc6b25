use crate::calendar::days_between;
use core_types::{Partitions, PriceSeries};

/// Splits `series` into three chronologically contiguous thirds of equal
/// calendar span.
///
/// With `start`/`end` the first and last dates and `span = end - start`, the
/// cut points are `cut1 = start + span/3` and `cut2 = start + 2*span/3`:
///
/// - first:  `date <= cut1`
/// - second: `cut1 < date <= cut2`
/// - third:  `date > cut2`
///
/// The division is in calendar time, not in record count. It is evaluated as
/// `3 * offset <= k * span` on whole days so that no rounding is involved.
/// A zero span puts every record in the first third.
pub fn partition(series: &PriceSeries) -> Partitions {
    let (Some(start), Some(end)) = (series.first_date(), series.last_date()) else {
        return Partitions::default();
    };
    let span = days_between(start, end);

    let records = series.records();
    let first_end = records.partition_point(|r| 3 * days_between(start, r.date) <= span);
    let second_end = records.partition_point(|r| 3 * days_between(start, r.date) <= 2 * span);

    let parts = Partitions {
        first: series.slice(0..first_end),
        second: series.slice(first_end..second_end),
        third: series.slice(second_end..records.len()),
    };

    tracing::debug!(
        %start,
        %end,
        span_days = span,
        first = parts.first.len(),
        second = parts.second.len(),
        third = parts.third.len(),
        "Partitioned price series into thirds."
    );

    parts
}
