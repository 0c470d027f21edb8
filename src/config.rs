//! Run configuration for the scrape pipeline.
//!
//! Every field has a default so callers (the CLI, tests) override only what
//! they care about.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

use crate::dataset::DateRange;
use crate::error::{Result, ScrapeError};

pub const DEFAULT_HOST: &str = "weather.com";
pub const DEFAULT_SELECTOR: &str = "span.temp";

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub output_path: PathBuf,
    pub chart_path: PathBuf,
    /// Host the history pages are requested from.
    pub host: String,
    /// CSS selector matching one hourly temperature element.
    pub selector: String,
    pub timeout: Duration,
    /// Extra attempts after the first failed request.
    pub retries: u32,
    /// Abort the whole run on the first failed day instead of skipping it.
    pub strict: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            city: "New York, NY".to_string(),
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2022, 1, 31).unwrap_or_default(),
            output_path: PathBuf::from("weather_data.csv"),
            chart_path: PathBuf::from("weather_data.png"),
            host: DEFAULT_HOST.to_string(),
            selector: DEFAULT_SELECTOR.to_string(),
            timeout: Duration::from_secs(30),
            retries: 2,
            strict: false,
        }
    }
}

impl ScrapeConfig {
    /// Returns the inclusive range of days this run covers.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidDateRange`] when `end_date` precedes `start_date`.
    pub fn date_range(&self) -> Result<DateRange> {
        if self.end_date < self.start_date {
            return Err(ScrapeError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(DateRange::new(self.start_date, self.end_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_covers_january_2022() {
        let config = ScrapeConfig::default();
        assert_eq!(config.city, "New York, NY");
        assert_eq!(config.date_range().unwrap().count(), 31);
        assert_eq!(config.output_path, PathBuf::from("weather_data.csv"));
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let config = ScrapeConfig {
            start_date: NaiveDate::from_ymd_opt(2022, 1, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            ..Default::default()
        };
        assert!(matches!(
            config.date_range(),
            Err(ScrapeError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_single_day_range() {
        let day = NaiveDate::from_ymd_opt(2022, 1, 5).unwrap();
        let config = ScrapeConfig {
            start_date: day,
            end_date: day,
            ..Default::default()
        };
        assert_eq!(config.date_range().unwrap().collect::<Vec<_>>(), vec![day]);
    }
}
