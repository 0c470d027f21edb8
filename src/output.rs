//! Persistence for datasets and text output for summaries.
//!
//! Datasets are stored as CSV with a `Date,Temperature (°F)` header. Saving
//! always rewrites the whole file.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use csv::WriterBuilder;
use tracing::{debug, info};

use crate::dataset::{DailyTemperatureRecord, Dataset};
use crate::error::{Result, ScrapeError};
use crate::stats::Summary;

const HEADER: [&str; 2] = ["Date", "Temperature (°F)"];

/// Writes `dataset` to `path`, replacing whatever was there.
#[tracing::instrument(skip_all, fields(path = %path.display(), records = dataset.len()))]
pub fn save_dataset(dataset: &Dataset, path: &Path) -> Result<()> {
    // Header written by hand so an empty dataset still gets one.
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(HEADER)?;

    for record in dataset.records() {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!("Dataset saved");
    Ok(())
}

/// Reads a dataset previously written by [`save_dataset`]. Rows keep file order.
///
/// # Errors
///
/// [`ScrapeError::FileNotFound`] if `path` does not exist, [`ScrapeError::Parse`]
/// for a row that is not a `YYYY-MM-DD` date and a finite number.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ScrapeError::FileNotFound(path.to_path_buf()),
        _ => ScrapeError::Io(e),
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut dataset = Dataset::new();
    for result in reader.deserialize() {
        let record: DailyTemperatureRecord = result
            .map_err(|e| ScrapeError::parse(format!("row in {}", path.display()), e.to_string()))?;
        if !record.average_temperature_f.is_finite() {
            return Err(ScrapeError::parse(
                format!("row in {}", path.display()),
                format!(
                    "temperature for {} is not a finite number: {}",
                    record.date, record.average_temperature_f
                ),
            ));
        }
        dataset.push(record);
    }

    debug!(path = %path.display(), records = dataset.len(), "Dataset loaded");
    Ok(dataset)
}

/// Prints the summary as four human-readable lines on stdout.
pub fn print_summary(summary: &Summary) {
    println!("{summary}");
}

/// Prints the summary as pretty-printed JSON on stdout.
pub fn print_json(summary: &Summary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    println!("{json}");
    Ok(())
}
