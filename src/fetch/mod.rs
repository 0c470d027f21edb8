mod basic;
mod client;
mod retry;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use retry::Retry;

use chrono::NaiveDate;
use reqwest::Url;
use tracing::debug;

use crate::error::{Result, ScrapeError};

/// Builds the hourly history page URL for `city` on `date`:
/// `https://<host>/weather/history/d/<YYYYMMDD>/hourly/l/<city>`.
///
/// `host` may carry its own scheme (`http://127.0.0.1:8080`); otherwise
/// `https` is assumed. The city becomes a single percent-encoded path segment.
pub fn history_url(host: &str, city: &str, date: NaiveDate) -> Result<Url> {
    let base = if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };
    let mut url = Url::parse(&base).map_err(|e| ScrapeError::parse("host", e.to_string()))?;

    let day = date.format("%Y%m%d").to_string();
    url.path_segments_mut()
        .map_err(|_| ScrapeError::parse("host", format!("`{host}` cannot be a base URL")))?
        .pop_if_empty()
        .extend(["weather", "history", "d", day.as_str(), "hourly", "l", city]);

    Ok(url)
}

/// Issues one GET for `url` and returns the response body.
///
/// # Errors
///
/// [`ScrapeError::Network`] if no response arrives, [`ScrapeError::Http`] if
/// the status is not 2xx.
#[tracing::instrument(skip_all, fields(url = %url))]
pub async fn fetch_page<C: HttpClient>(client: &C, url: Url) -> Result<String> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.clone());

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ScrapeError::Http {
            status,
            url: url.to_string(),
        });
    }

    let body = resp.text().await?;
    debug!(bytes = body.len(), "Page received");
    Ok(body)
}
