use std::path::PathBuf;

use thiserror::Error;

/// Problems with command-line parameters, raised before any record is read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid fiscal year: {0}. Fiscal year must be an integer.")]
    FiscalYearNotInteger(String),

    #[error("fiscal year {year} is out of range ({min}-{max}).")]
    FiscalYearOutOfRange { year: i64, min: i32, max: i32 },

    #[error("incorrect date format: {0}. Expected format is like 'Oct 1st, 2023'.")]
    ReferenceDate(String),
}

/// Why a `month/day/year` value was rejected.
#[derive(Debug, Error)]
pub enum DateFormatError {
    #[error("expected month/day/year with a four-digit year")]
    Layout,

    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// A completion record whose dates cannot be interpreted.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{person}: completion '{training}' has timestamp '{value}', expected month/day/year")]
    Timestamp {
        person: String,
        training: String,
        value: String,
        #[source]
        source: DateFormatError,
    },

    #[error("{person}: completion '{training}' has expiration '{value}', expected month/day/year")]
    Expiration {
        person: String,
        training: String,
        value: String,
        #[source]
        source: DateFormatError,
    },
}

/// Failures reading the person list from disk.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("unable to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid JSON training roster: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is not a valid CSV training export: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
