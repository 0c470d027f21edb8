//! Error taxonomy shared by every stage of the pipeline.

use std::path::PathBuf;

use chrono::NaiveDate;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Http { status: StatusCode, url: String },

    #[error("could not parse {context}: {message}")]
    Parse { context: String, message: String },

    #[error("no temperature readings to average")]
    EmptyInput,

    #[error("dataset has no records")]
    EmptyDataset,

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("end date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid CSS selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("could not render chart: {0}")]
    Plot(String),
}

impl ScrapeError {
    pub(crate) fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        ScrapeError::Parse {
            context: context.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
