use crate::partition::partition;
use crate::report::{AnalyticsReport, PartitionReport};
use crate::window::{ma180, quarterly_return, vol180};
use core_types::{DerivedSeries, Metric, PriceSeries};

/// A stateless calculator that runs one metric over the three thirds of a
/// price history.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for computing a metric report.
    ///
    /// # Arguments
    ///
    /// * `series` - The full, loaded price history.
    /// * `metric` - Which derived view to compute.
    /// * `annualize` - Scale volatility by `sqrt(252)`. Ignored by other metrics.
    ///
    /// # Returns
    ///
    /// An `AnalyticsReport` with one entry per third. A third that is empty or
    /// too short simply carries an empty series; it never affects the others.
    pub fn run(&self, series: &PriceSeries, metric: Metric, annualize: bool) -> AnalyticsReport {
        let partitions = partition(series);

        let parts = partitions
            .iter()
            .map(|(label, part)| {
                let derived = self.compute(part, metric, annualize);
                tracing::debug!(
                    %metric,
                    part = %label,
                    records = part.len(),
                    points = derived.len(),
                    "Computed partition series."
                );
                PartitionReport::new(label, part, derived)
            })
            .collect();

        AnalyticsReport {
            metric,
            annualized: metric == Metric::Vol180 && annualize,
            parts,
        }
    }

    /// Computes `metric` over a single partition.
    pub fn compute(&self, partition: &PriceSeries, metric: Metric, annualize: bool) -> DerivedSeries {
        match metric {
            Metric::QuarterlyReturn => quarterly_return(partition),
            Metric::Ma180 => ma180(partition),
            Metric::Vol180 => vol180(partition, annualize),
        }
    }
}
