use crate::error::LoaderError;
use chrono::{NaiveDate, NaiveDateTime};
use core_types::{PriceRecord, PriceSeries};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// A raw CSV row. Extra columns (e.g. `OpenInt`) are ignored.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date", alias = "DATE", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "OPEN")]
    open: f64,
    #[serde(alias = "High", alias = "HIGH")]
    high: f64,
    #[serde(alias = "Low", alias = "LOW")]
    low: f64,
    #[serde(alias = "Close", alias = "CLOSE")]
    close: f64,
    #[serde(alias = "Volume", alias = "VOLUME", default)]
    volume: f64,
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses a day-resolution date, dropping any time-of-day component.
fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parses headered OHLCV CSV text into a validated `PriceSeries`.
///
/// The first malformed row fails the whole parse; rows are never skipped.
pub fn parse_price_series<R: io::Read>(source: R) -> Result<PriceSeries, LoaderError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoaderError::MalformedRecord {
            line: 1,
            reason: "missing header row".to_string(),
        });
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let raw: CsvRow =
            row.deserialize(Some(&headers))
                .map_err(|e| LoaderError::MalformedRecord {
                    line,
                    reason: e.to_string(),
                })?;
        let date = parse_date(&raw.date).ok_or_else(|| LoaderError::MalformedRecord {
            line,
            reason: format!("unparsable date '{}'", raw.date),
        })?;

        records.push(PriceRecord {
            date,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
        });
    }

    Ok(PriceSeries::new(records)?)
}

/// Reads the CSV file at `path` from scratch.
///
/// A missing file is reported as `LoaderError::SourceUnavailable` so callers
/// can tell it apart from an unreadable or malformed one.
pub fn load_price_series(path: impl AsRef<Path>) -> Result<PriceSeries, LoaderError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoaderError::SourceUnavailable {
            path: path.to_path_buf(),
        },
        _ => LoaderError::Io(e),
    })?;

    let series = parse_price_series(file)?;
    tracing::info!(
        path = %path.display(),
        records = series.len(),
        first = ?series.first_date(),
        last = ?series.last_date(),
        "Loaded price series."
    );
    Ok(series)
}

/// A place the price history can be loaded from.
///
/// Implementations load fresh data on every call; nothing is cached.
pub trait PriceSource: Send + Sync {
    fn load(&self) -> Result<PriceSeries, LoaderError>;

    /// A human-readable description for logs.
    fn describe(&self) -> String;
}

/// A `PriceSource` backed by a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PriceSource for CsvFileSource {
    fn load(&self) -> Result<PriceSeries, LoaderError> {
        load_price_series(self.path())
    }

    fn describe(&self) -> String {
        format!("csv file {}", self.path().display())
    }
}
