use crate::enums::PartLabel;
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A single daily OHLCV bar for the instrument.
///
/// The analytics only read `date` and `close`; the other fields are carried
/// through for previews.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceRecord {
    /// Builds a record where every price field equals `close` and volume is zero.
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }
}

/// A date-sorted price history with exactly one record per date.
///
/// The only way to build one is through [`PriceSeries::new`] (or by slicing an
/// existing series), so every instance upholds the ordering invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    /// Sorts `records` ascending by date and rejects duplicate dates.
    pub fn new(mut records: Vec<PriceRecord>) -> Result<Self, CoreError> {
        records.sort_by_key(|r| r.date);
        if let Some(pair) = records.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(CoreError::DuplicateDate(pair[1].date));
        }
        Ok(Self { records })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// `(date, close)` pairs in date order.
    pub fn closes(&self) -> Vec<(NaiveDate, f64)> {
        self.records.iter().map(|r| (r.date, r.close)).collect()
    }

    /// Copies the records at `range` into a new series.
    ///
    /// A contiguous run of a valid series is itself valid, so no re-check is needed.
    pub fn slice(&self, range: Range<usize>) -> Self {
        Self {
            records: self.records[range].to_vec(),
        }
    }

    /// The first `n` records (all of them if `n` exceeds the length).
    pub fn head(&self, n: usize) -> Self {
        self.slice(0..n.min(self.len()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceRecord> {
        self.records.iter()
    }
}

impl IntoIterator for PriceSeries {
    type Item = PriceRecord;
    type IntoIter = std::vec::IntoIter<PriceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PriceRecord;
    type IntoIter = std::slice::Iter<'a, PriceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// One `(date, value)` sample of a derived series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl DataPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// An ordered series of derived values, increasing in date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivedSeries {
    points: Vec<DataPoint>,
}

impl DerivedSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, date: NaiveDate, value: f64) {
        debug_assert!(self.points.last().is_none_or(|p| p.date < date));
        self.points.push(DataPoint::new(date, value));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Applies `f` to every value, keeping the dates.
    pub fn map_values(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            points: self
                .points
                .into_iter()
                .map(|p| DataPoint::new(p.date, f(p.value)))
                .collect(),
        }
    }
}

impl FromIterator<DataPoint> for DerivedSeries {
    fn from_iter<I: IntoIterator<Item = DataPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DerivedSeries {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// The three chronological thirds of a price history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partitions {
    pub first: PriceSeries,
    pub second: PriceSeries,
    pub third: PriceSeries,
}

impl Partitions {
    pub fn get(&self, part: PartLabel) -> &PriceSeries {
        match part {
            PartLabel::First => &self.first,
            PartLabel::Second => &self.second,
            PartLabel::Third => &self.third,
        }
    }

    /// Iterates the thirds in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (PartLabel, &PriceSeries)> {
        PartLabel::ALL.into_iter().map(move |label| (label, self.get(label)))
    }

    pub fn total_len(&self) -> usize {
        self.first.len() + self.second.len() + self.third.len()
    }

    /// Splits into `(first, second, third)`.
    pub fn into_tuple(self) -> (PriceSeries, PriceSeries, PriceSeries) {
        (self.first, self.second, self.third)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_price_series_sorts_by_date() {
        let series = PriceSeries::new(vec![
            PriceRecord::from_close(date(2020, 1, 3), 3.0),
            PriceRecord::from_close(date(2020, 1, 1), 1.0),
            PriceRecord::from_close(date(2020, 1, 2), 2.0),
        ])
        .unwrap();

        let closes: Vec<f64> = series.iter().map(|r| r.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.first_date(), Some(date(2020, 1, 1)));
        assert_eq!(series.last_date(), Some(date(2020, 1, 3)));
    }

    #[test]
    fn test_price_series_rejects_duplicate_dates() {
        let err = PriceSeries::new(vec![
            PriceRecord::from_close(date(2020, 1, 2), 1.0),
            PriceRecord::from_close(date(2020, 1, 1), 1.0),
            PriceRecord::from_close(date(2020, 1, 2), 2.0),
        ])
        .unwrap_err();

        assert_eq!(err, CoreError::DuplicateDate(date(2020, 1, 2)));
    }

    #[test]
    fn test_empty_series_has_no_dates() {
        let series = PriceSeries::empty();
        assert!(series.is_empty());
        assert_eq!(series.first_date(), None);
        assert_eq!(series.head(5).len(), 0);
    }

    #[test]
    fn test_head_clamps_to_length() {
        let series = PriceSeries::new(vec![
            PriceRecord::from_close(date(2020, 1, 1), 1.0),
            PriceRecord::from_close(date(2020, 1, 2), 2.0),
        ])
        .unwrap();

        assert_eq!(series.head(1).len(), 1);
        assert_eq!(series.head(10).len(), 2);
    }

    #[test]
    fn test_derived_series_map_values_keeps_dates() {
        let mut series = DerivedSeries::new();
        series.push(date(2020, 1, 1), 1.0);
        series.push(date(2020, 1, 2), 2.0);

        let doubled = series.clone().map_values(|v| v * 2.0);
        assert_eq!(doubled.dates(), series.dates());
        assert_eq!(doubled.values(), vec![2.0, 4.0]);
    }

    #[test]
    fn test_derived_series_serializes_as_list() {
        let series: DerivedSeries = vec![DataPoint::new(date(2020, 3, 31), 0.5)]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json, serde_json::json!([{ "date": "2020-03-31", "value": 0.5 }]));
    }
}
