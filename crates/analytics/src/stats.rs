//! Small numeric helpers shared by the window analytics.
//!
//! None of these trap non-finite input: a zero denominator yields `inf` or
//! `NaN` and the value flows through to the caller unchanged.

/// Simple percent change from `prev` to `curr`, as a fraction.
pub fn pct_change(prev: f64, curr: f64) -> f64 {
    curr / prev - 1.0
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), or `None` below two samples.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance = values
        .iter()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}
