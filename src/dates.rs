use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;

use crate::error::{ConfigError, DateFormatError};

/// Encoding of `timestamp` and `expires` on completion records.
pub const RECORD_DATE_FORMAT: &str = "%m/%d/%Y";

/// Encoding of the reference date once ordinal suffixes are removed.
/// `%B` also accepts the three-letter abbreviation when parsing.
const REFERENCE_DATE_FORMAT: &str = "%B %d, %Y";

/// Parses `month/day/year`; the year must be written with four digits.
pub fn parse_record_date(value: &str) -> Result<NaiveDate, DateFormatError> {
    let trimmed = value.trim();
    if !record_date_layout().is_match(trimmed) {
        return Err(DateFormatError::Layout);
    }
    Ok(NaiveDate::parse_from_str(trimmed, RECORD_DATE_FORMAT)?)
}

fn record_date_layout() -> &'static Regex {
    static LAYOUT: OnceLock<Regex> = OnceLock::new();
    LAYOUT.get_or_init(|| {
        Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("record date pattern is valid")
    })
}

fn ordinal_suffix() -> &'static Regex {
    static ORDINAL: OnceLock<Regex> = OnceLock::new();
    ORDINAL.get_or_init(|| {
        Regex::new(r"(\d+)(st|nd|rd|th)").expect("ordinal suffix pattern is valid")
    })
}

fn four_digit_year_suffix() -> &'static Regex {
    static YEAR: OnceLock<Regex> = OnceLock::new();
    YEAR.get_or_init(|| Regex::new(r",\s*\d{4}$").expect("year pattern is valid"))
}

/// The day expirations are measured against, written like `Oct 1st, 2023`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReferenceDate(NaiveDate);

impl ReferenceDate {
    #[cfg(test)]
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Inclusive window from this date through `days` days later.
    pub fn window_through(&self, days: i64) -> DateWindow {
        DateWindow::new(self.0, self.0 + Duration::days(days))
    }
}

impl FromStr for ReferenceDate {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let stripped = ordinal_suffix().replace_all(value.trim(), "$1");
        if !four_digit_year_suffix().is_match(&stripped) {
            return Err(ConfigError::ReferenceDate(value.to_string()));
        }
        NaiveDate::parse_from_str(&stripped, REFERENCE_DATE_FORMAT)
            .map(Self)
            .map_err(|_| ConfigError::ReferenceDate(value.to_string()))
    }
}

impl fmt::Display for ReferenceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date().format("%b %-d, %Y"))
    }
}

/// Closed date range; both ends are part of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
