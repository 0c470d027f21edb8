use std::fmt;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{Result, ScrapeError};

/// Arithmetic mean of one day's hourly readings.
///
/// # Errors
///
/// Returns [`ScrapeError::EmptyInput`] for an empty slice rather than a NaN.
pub fn daily_average(readings: &[i32]) -> Result<f64> {
    if readings.is_empty() {
        return Err(ScrapeError::EmptyInput);
    }
    let sum: i64 = readings.iter().map(|&r| i64::from(r)).sum();
    Ok(sum as f64 / readings.len() as f64)
}

/// Descriptive statistics over the temperature column of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
}

impl Summary {
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        let mut values: Vec<f64> = dataset.temperatures().collect();
        if values.is_empty() {
            return Err(ScrapeError::EmptyDataset);
        }
        values.sort_by(|a, b| a.total_cmp(b));

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (values[mid - 1] + values[mid]) / 2.0
        } else {
            values[mid]
        };

        Ok(Summary {
            count,
            mean,
            median,
            max: values[count - 1],
            min: values[0],
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mean temperature: {:.2}°F", self.mean)?;
        writeln!(f, "Median temperature: {:.2}°F", self.median)?;
        writeln!(f, "Maximum temperature: {:.2}°F", self.max)?;
        write!(f, "Minimum temperature: {:.2}°F", self.min)
    }
}
