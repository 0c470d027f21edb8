pub mod config;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod plot;
pub mod scrape;
pub mod stats;

pub use error::{Result, ScrapeError};
