//! The day-by-day scrape loop.
//!
//! Days are fetched strictly one after another. A day that fails to fetch,
//! fails to parse, or has no readings is skipped and reported unless the run
//! is strict, in which case the first such day aborts the run.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::ScrapeConfig;
use crate::dataset::{DailyTemperatureRecord, Dataset};
use crate::error::{Result, ScrapeError};
use crate::fetch::{HttpClient, fetch_page, history_url};
use crate::parser::ReadingExtractor;
use crate::stats::daily_average;

/// A date left out of the dataset and why.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDay {
    pub date: NaiveDate,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ScrapeReport {
    pub dataset: Dataset,
    pub skipped: Vec<SkippedDay>,
}

/// Fetches and averages a single day.
///
/// `Ok(None)` means the page was fetched and parsed but held no readings.
pub async fn scrape_day<C, E>(
    client: &C,
    extractor: &E,
    host: &str,
    city: &str,
    date: NaiveDate,
) -> Result<Option<DailyTemperatureRecord>>
where
    C: HttpClient,
    E: ReadingExtractor + ?Sized,
{
    let url = history_url(host, city, date)?;
    let markup = fetch_page(client, url).await?;
    let readings = extractor.extract(&markup)?;
    debug!(%date, readings = readings.len(), "Readings extracted");

    if readings.is_empty() {
        return Ok(None);
    }
    let average = daily_average(&readings)?;
    Ok(Some(DailyTemperatureRecord::new(date, average)))
}

/// Scrapes every day of `config`'s inclusive date range, in order.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidDateRange`] for a reversed range. In strict
/// mode, also returns the first day's failure; a day without readings fails
/// with [`ScrapeError::EmptyInput`].
#[tracing::instrument(
    skip_all,
    fields(city = %config.city, start = %config.start_date, end = %config.end_date)
)]
pub async fn scrape_range<C, E>(
    client: &C,
    extractor: &E,
    config: &ScrapeConfig,
) -> Result<ScrapeReport>
where
    C: HttpClient,
    E: ReadingExtractor + ?Sized,
{
    let mut report = ScrapeReport::default();

    for date in config.date_range()? {
        let outcome = scrape_day(client, extractor, &config.host, &config.city, date).await;

        let reason = match outcome {
            Ok(Some(record)) => {
                debug!(%date, average = record.average_temperature_f, "Day scraped");
                report.dataset.push(record);
                continue;
            }
            Ok(None) if config.strict => return Err(ScrapeError::EmptyInput),
            Ok(None) => "no temperature readings on page".to_string(),
            Err(e) if config.strict => return Err(e),
            Err(e) => e.to_string(),
        };

        warn!(%date, %reason, "Skipping day");
        report.skipped.push(SkippedDay { date, reason });
    }

    info!(
        records = report.dataset.len(),
        skipped = report.skipped.len(),
        "Scrape finished"
    );
    Ok(report)
}
