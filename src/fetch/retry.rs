use std::time::Duration;

use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use tracing::warn;

/// An [`HttpClient`] wrapper that re-sends a request after transport errors
/// and 5xx responses.
///
/// Attempts run one after another, never in parallel. The wait starts at
/// `backoff` and doubles after each failure. `retries` counts the extra
/// attempts, so `retries = 0` behaves exactly like `inner`.
pub struct Retry<C> {
    pub inner: C,
    pub retries: u32,
    pub backoff: Duration,
}

impl<C> Retry<C> {
    pub fn new(inner: C, retries: u32) -> Self {
        Self {
            inner,
            retries,
            backoff: Duration::from_millis(500),
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for Retry<C> {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let mut pending = req;
        let mut delay = self.backoff;
        let mut attempt = 0;

        loop {
            // Requests with streaming bodies can't be cloned; those get one shot.
            let spare = if attempt < self.retries {
                pending.try_clone()
            } else {
                None
            };
            let url = pending.url().to_string();
            let result = self.inner.execute(pending).await;

            let Some(next) = spare else {
                return result;
            };

            match &result {
                Ok(resp) if resp.status().is_server_error() => {
                    warn!(%url, status = %resp.status(), attempt, "Server error, retrying");
                }
                Err(e) if !e.is_builder() => {
                    warn!(%url, error = %e, attempt, "Request failed, retrying");
                }
                _ => return result,
            }

            tokio::time::sleep(delay).await;
            delay = delay.saturating_mul(2);
            attempt += 1;
            pending = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers with the next status from `statuses`, repeating the last one.
    struct Scripted {
        statuses: Vec<u16>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HttpClient for Scripted {
        async fn execute(&self, _req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            let status = self.statuses[n.min(self.statuses.len() - 1)];
            let resp = http::Response::builder()
                .status(status)
                .body(String::new())
                .unwrap();
            Ok(reqwest::Response::from(resp))
        }
    }

    fn request() -> reqwest::Request {
        reqwest::Request::new(
            reqwest::Method::GET,
            "https://example.test/page".parse().unwrap(),
        )
    }

    fn retry(statuses: Vec<u16>, retries: u32) -> Retry<Scripted> {
        Retry {
            inner: Scripted {
                statuses,
                calls: AtomicUsize::new(0),
            },
            retries,
            backoff: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_retries_server_errors_until_success() {
        let client = retry(vec![503, 502, 200], 3);
        let resp = client.execute(request()).await.unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(client.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_configured_retries() {
        let client = retry(vec![500], 2);
        let resp = client.execute(request()).await.unwrap();

        assert_eq!(resp.status(), 500);
        assert_eq!(client.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let client = retry(vec![404, 200], 3);
        let resp = client.execute(request()).await.unwrap();

        assert_eq!(resp.status(), 404);
        assert_eq!(client.inner.calls.load(Ordering::SeqCst), 1);
    }
}
