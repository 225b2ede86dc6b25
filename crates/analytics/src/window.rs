//! The three window analytics computed over each third of the history.
//!
//! All of them are pure functions of one `PriceSeries`: empty in, empty out.

use crate::calendar::quarter_end;
use crate::rolling::rolling_calendar;
use crate::stats::{mean, pct_change, sample_std};
use chrono::NaiveDate;
use core_types::{DataPoint, DerivedSeries, PriceSeries};

/// Length of the rolling windows, in calendar days.
pub const WINDOW_DAYS: i64 = 180;

/// Trading days per year assumed when annualizing daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Quarter-over-quarter percent change of the last close in each calendar quarter.
///
/// This is a price-return proxy built only from closes. It does not include
/// dividends and is not an earnings or yield figure.
///
/// Quarters without records are skipped rather than interpolated, so each
/// point compares against the previous quarter that had data. The first
/// non-empty quarter only serves as a base and produces no point. Points are
/// dated at the quarter-end date.
pub fn quarterly_return(series: &PriceSeries) -> DerivedSeries {
    let mut quarter_closes: Vec<(NaiveDate, f64)> = Vec::new();
    for record in series {
        let end = quarter_end(record.date);
        match quarter_closes.last_mut() {
            Some((quarter, close)) if *quarter == end => *close = record.close,
            _ => quarter_closes.push((end, record.close)),
        }
    }

    quarter_closes
        .windows(2)
        .map(|w| DataPoint::new(w[1].0, pct_change(w[0].1, w[1].1)))
        .collect()
}

/// 180-day calendar-window moving average of the close.
///
/// Every record yields a point, since its own close is always in its window.
pub fn ma180(series: &PriceSeries) -> DerivedSeries {
    rolling_calendar(&series.closes(), WINDOW_DAYS, mean)
}

/// 180-day calendar-window volatility of close-to-close returns.
///
/// Returns are dated at the later of the two closes. Windows holding fewer
/// than two returns have no sample standard deviation and are omitted. With
/// `annualize`, values are scaled by `sqrt(252)`.
pub fn vol180(series: &PriceSeries, annualize: bool) -> DerivedSeries {
    let returns: Vec<(NaiveDate, f64)> = series
        .records()
        .windows(2)
        .map(|w| (w[1].date, pct_change(w[0].close, w[1].close)))
        .collect();

    let vol = rolling_calendar(&returns, WINDOW_DAYS, sample_std);
    if annualize {
        let factor = TRADING_DAYS_PER_YEAR.sqrt();
        vol.map_values(|v| v * factor)
    } else {
        vol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Duration;
    use core_types::PriceRecord;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 1, 5).unwrap() + Duration::days(offset)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(points: &[(NaiveDate, f64)]) -> PriceSeries {
        PriceSeries::new(
            points
                .iter()
                .map(|&(d, c)| PriceRecord::from_close(d, c))
                .collect(),
        )
        .unwrap()
    }

    fn weekday_series(n: usize) -> PriceSeries {
        let mut points = Vec::new();
        let mut offset = 0;
        while points.len() < n {
            let d = day(offset);
            if offset % 7 < 5 {
                let i = points.len() as f64;
                points.push((d, 100.0 + (i * 0.7).sin() * 5.0 + i * 0.05));
            }
            offset += 1;
        }
        series(&points)
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        let empty = PriceSeries::empty();
        assert!(quarterly_return(&empty).is_empty());
        assert!(ma180(&empty).is_empty());
        assert!(vol180(&empty, true).is_empty());
        assert!(vol180(&empty, false).is_empty());
    }

    #[test]
    fn test_ma180_uses_calendar_window() {
        let p = series(&[(day(0), 10.0), (day(1), 20.0), (day(200), 30.0)]);
        let ma = ma180(&p);

        assert_eq!(ma.dates(), vec![day(0), day(1), day(200)]);
        assert_eq!(ma.values(), vec![10.0, 15.0, 30.0]);
    }

    #[test]
    fn test_ma180_includes_point_exactly_180_days_back() {
        let p = series(&[(day(0), 10.0), (day(180), 20.0), (day(181), 60.0)]);
        let ma = ma180(&p);
        assert_eq!(ma.values(), vec![10.0, 15.0, 40.0]);
    }

    #[test]
    fn test_ma180_length_matches_input() {
        let p = weekday_series(400);
        assert_eq!(ma180(&p).len(), p.len());
    }

    #[test]
    fn test_ma180_sample_size_follows_density() {
        // 5 closes in the last 180 days on a dense run vs 2 on a sparse one.
        let dense = series(&[
            (day(0), 1.0),
            (day(1), 2.0),
            (day(2), 3.0),
            (day(3), 4.0),
            (day(4), 5.0),
        ]);
        let sparse = series(&[(day(0), 1.0), (day(4), 5.0)]);
        assert_eq!(ma180(&dense).values()[4], 3.0);
        assert_eq!(ma180(&sparse).values()[1], 3.0);
    }

    #[test]
    fn test_vol180_needs_two_returns() {
        let p = series(&[(day(0), 100.0), (day(1), 110.0)]);
        assert!(vol180(&p, true).is_empty());

        let p = series(&[(day(0), 100.0), (day(1), 110.0), (day(2), 99.0)]);
        let vol = vol180(&p, false);
        assert_eq!(vol.dates(), vec![day(2)]);

        // returns 0.1 and -0.1
        let expected = (2.0 * 0.1_f64.powi(2)).sqrt();
        assert_relative_eq!(vol.values()[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_vol180_drops_windows_isolated_by_gaps() {
        let p = series(&[
            (day(0), 100.0),
            (day(1), 101.0),
            (day(2), 103.0),
            (day(400), 90.0),
            (day(401), 91.0),
        ]);
        let vol = vol180(&p, false);
        // day(400) is alone in its window, day(401) pairs with day(400).
        assert_eq!(vol.dates(), vec![day(2), day(401)]);
    }

    #[test]
    fn test_vol180_annualization_is_exact_scaling() {
        let p = weekday_series(300);
        let raw = vol180(&p, false);
        let annual = vol180(&p, true);

        assert_eq!(raw.dates(), annual.dates());
        let factor = TRADING_DAYS_PER_YEAR.sqrt();
        for (r, a) in raw.iter().zip(annual.iter()) {
            assert_eq!(a.value, r.value * factor);
        }
    }

    #[test]
    fn test_vol180_zero_close_passes_through() {
        let p = series(&[(day(0), 0.0), (day(1), 1.0), (day(2), 2.0)]);
        let vol = vol180(&p, false);
        assert_eq!(vol.len(), 1);
        assert!(!vol.values()[0].is_finite());
    }

    #[test]
    fn test_quarterly_return_uses_last_close_per_quarter() {
        let p = series(&[
            (date(2020, 1, 2), 50.0),
            (date(2020, 3, 30), 100.0),
            (date(2020, 4, 1), 300.0),
            (date(2020, 6, 29), 110.0),
            (date(2020, 9, 30), 99.0),
        ]);
        let qr = quarterly_return(&p);

        assert_eq!(qr.dates(), vec![date(2020, 6, 30), date(2020, 9, 30)]);
        let values = qr.values();
        assert_relative_eq!(values[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(values[1], -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_quarterly_return_skips_empty_quarters() {
        let p = series(&[
            (date(2020, 2, 1), 100.0),
            (date(2020, 11, 15), 150.0),
            (date(2021, 1, 4), 120.0),
        ]);
        let qr = quarterly_return(&p);

        assert_eq!(qr.dates(), vec![date(2020, 12, 31), date(2021, 3, 31)]);
        assert_relative_eq!(qr.values()[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(qr.values()[1], -0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_quarterly_return_count_is_buckets_minus_one() {
        let p = weekday_series(500);
        let buckets = {
            let mut ends: Vec<NaiveDate> = p.iter().map(|r| quarter_end(r.date)).collect();
            ends.dedup();
            ends.len()
        };
        assert_eq!(quarterly_return(&p).len(), buckets - 1);
    }

    #[test]
    fn test_single_quarter_yields_nothing() {
        let p = series(&[(date(2020, 1, 2), 1.0), (date(2020, 2, 3), 2.0)]);
        assert!(quarterly_return(&p).is_empty());
    }

    #[test]
    fn test_analytics_are_deterministic() {
        let p = weekday_series(250);
        assert_eq!(quarterly_return(&p), quarterly_return(&p));
        assert_eq!(ma180(&p), ma180(&p));
        assert_eq!(vol180(&p, true), vol180(&p, true));
    }
}
