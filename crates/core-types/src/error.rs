use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Duplicate price record for date {0}")]
    DuplicateDate(NaiveDate),

    #[error("Unknown metric '{0}' (expected one of: quarterly-return, ma180, vol180)")]
    UnknownMetric(String),
}
