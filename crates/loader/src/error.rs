use core_types::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Price data source not found: {}", path.display())]
    SourceUnavailable { path: PathBuf },

    #[error("Failed to read price data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed price record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("Price data does not form a valid series: {0}")]
    InvalidSeries(#[from] CoreError),
}

impl From<csv::Error> for LoaderError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or_default();
        let reason = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => LoaderError::Io(io),
            _ => LoaderError::MalformedRecord { line, reason },
        }
    }
}
