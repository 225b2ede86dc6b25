use chrono::NaiveDate;
use core_types::{DerivedSeries, Metric, PartLabel, PriceSeries};
use serde::Serialize;

/// The result of one metric computed over one third of the history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionReport {
    pub part: PartLabel,
    /// First date of the third, `None` when it holds no records.
    pub start: Option<NaiveDate>,
    /// Last date of the third, `None` when it holds no records.
    pub end: Option<NaiveDate>,
    /// Number of price records the third holds.
    pub records: usize,
    pub series: DerivedSeries,
}

impl PartitionReport {
    pub fn new(part: PartLabel, partition: &PriceSeries, series: DerivedSeries) -> Self {
        Self {
            part,
            start: partition.first_date(),
            end: partition.last_date(),
            records: partition.len(),
            series,
        }
    }
}

/// One metric computed independently over all three thirds.
///
/// This is the data transfer object handed to the presentation layers (the
/// web server and the CLI). It always holds exactly three parts, in
/// chronological order, even when some of them are empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub metric: Metric,
    /// Whether volatility values are annualized. Always `false` for other metrics.
    pub annualized: bool,
    pub parts: Vec<PartitionReport>,
}

impl AnalyticsReport {
    /// Total number of derived points across the three parts.
    pub fn total_points(&self) -> usize {
        self.parts.iter().map(|p| p.series.len()).sum()
    }

    /// Rounds every value to `decimals` places, for display.
    pub fn rounded(mut self, decimals: i32) -> Self {
        let scale = 10f64.powi(decimals);
        for part in &mut self.parts {
            part.series =
                std::mem::take(&mut part.series).map_values(|v| (v * scale).round() / scale);
        }
        self
    }
}
