use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;

use crate::dates::{DateWindow, ReferenceDate};
use crate::error::ConfigError;

pub const MIN_FISCAL_YEAR: i32 = 2000;
pub const MAX_FISCAL_YEAR: i32 = 2100;

/// Fiscal year `Y` runs from July 1 of `Y - 1` through June 30 of `Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FiscalYear(i32);

impl FiscalYear {
    pub fn new(year: i64) -> Result<Self, ConfigError> {
        if year < i64::from(MIN_FISCAL_YEAR) || year > i64::from(MAX_FISCAL_YEAR) {
            return Err(ConfigError::FiscalYearOutOfRange {
                year,
                min: MIN_FISCAL_YEAR,
                max: MAX_FISCAL_YEAR,
            });
        }
        // Range check above keeps the value inside i32.
        Ok(Self(year as i32))
    }

    pub fn year(&self) -> i32 {
        self.0
    }

    pub fn window(&self) -> DateWindow {
        // Both dates exist for every year in the accepted range.
        let start = NaiveDate::from_ymd_opt(self.year() - 1, 7, 1).unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_ymd_opt(self.year(), 6, 30).unwrap_or(NaiveDate::MAX);
        DateWindow::new(start, end)
    }
}

impl FromStr for FiscalYear {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let year = value
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::FiscalYearNotInteger(value.to_string()))?;
        Self::new(year)
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FY{}", self.year())
    }
}

/// Which decoder reads the training roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    pub fn infer(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Validated parameters for one reporting run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub format: InputFormat,
    pub out_dir: PathBuf,
    pub fiscal_year: FiscalYear,
    pub trainings: Vec<String>,
    pub reference_date: ReferenceDate,
}

impl ReportConfig {
    pub fn new(
        input: PathBuf,
        format: Option<InputFormat>,
        out_dir: PathBuf,
        fiscal_year: FiscalYear,
        trainings: Vec<String>,
        reference_date: ReferenceDate,
    ) -> Self {
        let format = format.unwrap_or_else(|| InputFormat::infer(&input));
        Self {
            input,
            format,
            out_dir,
            fiscal_year,
            trainings,
            reference_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_years_at_range_edges() {
        assert_eq!("2000".parse::<FiscalYear>().unwrap().year(), 2000);
        assert_eq!("2100".parse::<FiscalYear>().unwrap().year(), 2100);
        assert_eq!(" 2023 ".parse::<FiscalYear>().unwrap().year(), 2023);
    }

    #[test]
    fn rejects_years_outside_range() {
        assert_eq!(
            "1999".parse::<FiscalYear>().unwrap_err(),
            ConfigError::FiscalYearOutOfRange {
                year: 1999,
                min: 2000,
                max: 2100
            }
        );
        assert!(matches!(
            "2101".parse::<FiscalYear>(),
            Err(ConfigError::FiscalYearOutOfRange { year: 2101, .. })
        ));
    }

    #[test]
    fn rejects_non_integer_years() {
        assert_eq!(
            "FY23".parse::<FiscalYear>().unwrap_err(),
            ConfigError::FiscalYearNotInteger("FY23".to_string())
        );
        assert!("2023.5".parse::<FiscalYear>().is_err());
    }

    #[test]
    fn fiscal_window_spans_july_through_june() {
        let window = FiscalYear::new(2023).unwrap().window();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2022, 7, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2023, 6, 30).unwrap());
        assert!(!window.contains(NaiveDate::from_ymd_opt(2022, 6, 30).unwrap()));
        assert!(window.contains(NaiveDate::from_ymd_opt(2022, 7, 1).unwrap()));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2023, 7, 1).unwrap()));
    }

    #[test]
    fn format_is_inferred_from_extension() {
        assert_eq!(InputFormat::infer(Path::new("roster.CSV")), InputFormat::Csv);
        assert_eq!(InputFormat::infer(Path::new("trainings.txt")), InputFormat::Json);
        assert_eq!(InputFormat::infer(Path::new("trainings")), InputFormat::Json);
    }

    #[test]
    fn explicit_format_overrides_extension() {
        let config = ReportConfig::new(
            PathBuf::from("export.txt"),
            Some(InputFormat::Csv),
            PathBuf::from("."),
            FiscalYear::new(2024).unwrap(),
            vec!["Safety".to_string()],
            "Oct 1st, 2023".parse().unwrap(),
        );
        assert_eq!(config.format, InputFormat::Csv);
    }
}
