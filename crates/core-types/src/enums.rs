use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three chronological thirds a price history is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartLabel {
    #[serde(rename = "part1")]
    First,
    #[serde(rename = "part2")]
    Second,
    #[serde(rename = "part3")]
    Third,
}

impl PartLabel {
    /// All labels in chronological order.
    pub const ALL: [PartLabel; 3] = [PartLabel::First, PartLabel::Second, PartLabel::Third];

    /// Zero-based position of the third.
    pub fn index(&self) -> usize {
        match self {
            PartLabel::First => 0,
            PartLabel::Second => 1,
            PartLabel::Third => 2,
        }
    }
}

impl fmt::Display for PartLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "part{}", self.index() + 1)
    }
}

/// The derived views that can be computed over each third.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// Quarter-over-quarter change of the last close in each calendar quarter.
    QuarterlyReturn,
    /// 180-day calendar-window moving average of the close.
    Ma180,
    /// 180-day calendar-window volatility of daily close-to-close returns.
    Vol180,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::QuarterlyReturn, Metric::Ma180, Metric::Vol180];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::QuarterlyReturn => "quarterly-return",
            Metric::Ma180 => "ma180",
            Metric::Vol180 => "vol180",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quarterly-return" | "quarterly_return" | "qr" => Ok(Metric::QuarterlyReturn),
            "ma180" => Ok(Metric::Ma180),
            "vol180" => Ok(Metric::Vol180),
            other => Err(CoreError::UnknownMetric(other.to_string())),
        }
    }
}
