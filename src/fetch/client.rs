use async_trait::async_trait;
use reqwest::{Request, Response};

/// Anything that can carry a single HTTP request to the remote host.
///
/// Decorators such as [`super::Retry`] wrap another client and add behavior
/// around `execute`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
