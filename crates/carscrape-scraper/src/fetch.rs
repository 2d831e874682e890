//! Page fetching: the [`PageFetcher`] seam and its `reqwest` implementation.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// Retrieves the body of one page.
///
/// The crawl and the assembler only depend on this trait, so tests can feed
/// canned pages without a network.
pub trait PageFetcher {
    /// Fetches `url` and returns its body.
    ///
    /// Implementations must return an error for non-2xx responses; they must
    /// not retry.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, ScraperError>> + Send;
}

/// HTTP fetcher issuing a single GET per page with a fixed `User-Agent`
/// and an explicit request timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates an `HttpFetcher` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx status.
    /// - [`ScraperError::Http`]: network, TLS or timeout failure.
    async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}
