//! CLI entry point for the weather history scraper.
//!
//! Provides subcommands for the full pipeline (scrape, save, report, plot)
//! and for each stage on its own against an existing CSV.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use weather_history_scraper::{
    config::ScrapeConfig,
    dataset::Dataset,
    fetch::{BasicClient, Retry},
    output::{load_dataset, print_json, print_summary, save_dataset},
    parser::SpanClassExtractor,
    plot::plot_dataset,
    scrape::{ScrapeReport, scrape_range},
    stats::Summary,
};

#[derive(Parser)]
#[command(name = "weather_history_scraper")]
#[command(about = "Scrape daily historical temperatures and summarize them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape, save, then report on and plot the saved CSV
    Run {
        #[command(flatten)]
        scrape: ScrapeArgs,

        /// Print the summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Scrape a date range and save it as CSV
    Scrape {
        #[command(flatten)]
        scrape: ScrapeArgs,
    },
    /// Print summary statistics for a saved CSV
    Report {
        #[arg(short, long, default_value = "weather_data.csv")]
        input: PathBuf,

        /// Print the summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Render a saved CSV as a line chart
    Plot {
        #[arg(short, long, default_value = "weather_data.csv")]
        input: PathBuf,

        /// Chart image to write (.png or .svg)
        #[arg(long, default_value = "weather_data.png")]
        chart: PathBuf,
    },
}

/// Overrides for [`ScrapeConfig`]; anything left out keeps its default.
#[derive(Args, Debug)]
struct ScrapeArgs {
    /// City as it appears in the history page URL, e.g. "New York, NY"
    #[arg(long)]
    city: Option<String>,

    /// First day to scrape
    #[arg(long, value_name = "YYYY-MM-DD")]
    start: Option<NaiveDate>,

    /// Last day to scrape (inclusive)
    #[arg(long, value_name = "YYYY-MM-DD")]
    end: Option<NaiveDate>,

    /// CSV file to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Chart image to write (.png or .svg)
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Host serving the history pages
    #[arg(long)]
    host: Option<String>,

    /// CSS selector for one hourly temperature element
    #[arg(long)]
    selector: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Extra attempts for a request that fails or gets a 5xx
    #[arg(long)]
    retries: Option<u32>,

    /// Abort on the first day that fails instead of skipping it
    #[arg(long, default_value_t = false)]
    strict: bool,
}

impl ScrapeArgs {
    fn into_config(self) -> ScrapeConfig {
        let defaults = ScrapeConfig::default();
        ScrapeConfig {
            city: self.city.unwrap_or(defaults.city),
            start_date: self.start.unwrap_or(defaults.start_date),
            end_date: self.end.unwrap_or(defaults.end_date),
            output_path: self.output.unwrap_or(defaults.output_path),
            chart_path: self.chart.unwrap_or(defaults.chart_path),
            host: self.host.unwrap_or(defaults.host),
            selector: self.selector.unwrap_or(defaults.selector),
            timeout: self
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            retries: self.retries.unwrap_or(defaults.retries),
            strict: self.strict,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { scrape, json } => {
            let config = scrape.into_config();

            scrape_and_save(&config).await?;
            let dataset = report(&config.output_path, json)?;
            plot_dataset(&dataset, &config.chart_path)?;
            info!(chart = %config.chart_path.display(), "Pipeline complete");
        }
        Commands::Scrape { scrape } => {
            let config = scrape.into_config();
            scrape_and_save(&config).await?;
        }
        Commands::Report { input, json } => {
            report(&input, json)?;
        }
        Commands::Plot { input, chart } => {
            let dataset = load_dataset(&input)?;
            plot_dataset(&dataset, &chart)?;
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
///
/// The returned guard flushes the file writer when dropped.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/weather_history_scraper.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("weather_history_scraper.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}

/// Scrapes the configured range and overwrites the output CSV with the result.
///
/// Nothing is written when no day produced a record.
async fn scrape_and_save(config: &ScrapeConfig) -> Result<ScrapeReport> {
    let client = Retry::new(BasicClient::with_timeout(config.timeout)?, config.retries);
    let extractor = SpanClassExtractor::new(&config.selector)?;

    let report = scrape_range(&client, &extractor, config).await?;

    if !report.skipped.is_empty() {
        let dates: Vec<String> = report.skipped.iter().map(|s| s.date.to_string()).collect();
        warn!(
            count = report.skipped.len(),
            dates = %dates.join(", "),
            "Some days were skipped"
        );
    }
    if report.dataset.is_empty() {
        bail!(
            "no temperatures scraped for {} between {} and {}",
            config.city,
            config.start_date,
            config.end_date
        );
    }

    save_dataset(&report.dataset, &config.output_path)?;
    Ok(report)
}

/// Loads `input`, prints its summary and hands the dataset back for plotting.
fn report(input: &Path, json: bool) -> Result<Dataset> {
    let dataset = load_dataset(input)?;
    let summary = Summary::from_dataset(&dataset)?;

    if json {
        print_json(&summary)?;
    } else {
        print_summary(&summary);
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrape_config(args: &[&str]) -> ScrapeConfig {
        match Cli::try_parse_from(args).unwrap().command {
            Commands::Run { scrape, .. } | Commands::Scrape { scrape } => scrape.into_config(),
            _ => panic!("not a scraping subcommand"),
        }
    }

    #[test]
    fn test_defaults_when_no_overrides() {
        let config = scrape_config(&["weather_history_scraper", "scrape"]);
        let defaults = ScrapeConfig::default();

        assert_eq!(config.city, defaults.city);
        assert_eq!(config.output_path, defaults.output_path);
        assert_eq!(config.chart_path, defaults.chart_path);
        assert!(!config.strict);
    }

    #[test]
    fn test_chart_is_accepted_by_run_and_scrape() {
        for subcommand in ["run", "scrape"] {
            let config = scrape_config(&[
                "weather_history_scraper",
                subcommand,
                "--chart",
                "out/january.svg",
            ]);
            assert_eq!(config.chart_path, PathBuf::from("out/january.svg"));
        }
    }

    #[test]
    fn test_each_field_overrides_independently() {
        let config = scrape_config(&[
            "weather_history_scraper",
            "run",
            "--city",
            "Boston, MA",
            "--start",
            "2022-02-01",
            "--end",
            "2022-02-03",
            "--timeout-secs",
            "5",
            "--retries",
            "0",
            "--strict",
        ]);

        assert_eq!(config.city, "Boston, MA");
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2022, 2, 1).unwrap());
        assert_eq!(config.end_date, NaiveDate::from_ymd_opt(2022, 2, 3).unwrap());
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.retries, 0);
        assert!(config.strict);
        assert_eq!(config.output_path, ScrapeConfig::default().output_path);
    }
}
