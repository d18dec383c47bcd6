//! Google Sheets list-feed client.
//!
//! Fetches `.../feeds/list/<key>/1/public/values?alt=json` over HTTP and
//! decodes it into a [`FeedDocument`].

use reqwest::StatusCode;
use sheetline_core::SpreadsheetLocator;
use tracing::debug;
use url::Url;

use super::config::GoogleSheetsConfig;
use crate::error::{SourceError, SourceResult};
use crate::raw_entry::FeedDocument;
use crate::source::{BoxFuture, FeedSource};

const SOURCE_NAME: &str = "google";

/// Feed source backed by the public Google Sheets list feed.
#[derive(Debug)]
pub struct GoogleSheetsSource {
    http_client: reqwest::Client,
    config: GoogleSheetsConfig,
}

impl GoogleSheetsSource {
    /// Creates a new source.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: GoogleSheetsConfig) -> SourceResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                SourceError::configuration(format!("failed to create HTTP client: {}", e))
                    .with_source_name(SOURCE_NAME)
                    .with_cause(e)
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Returns the source configuration.
    pub fn config(&self) -> &GoogleSheetsConfig {
        &self.config
    }

    async fn fetch(&self, url: &Url) -> SourceResult<FeedDocument> {
        debug!(%url, "fetching list feed");

        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "request timeout".to_string()
                } else if e.is_connect() {
                    format!("connection failed: {}", e)
                } else {
                    format!("request failed: {}", e)
                };
                SourceError::network(message).with_cause(e)
            })?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(SourceError::rate_limited(format!(
                "rate limit exceeded{}",
                retry_after
                    .map(|s| format!(", retry after {} seconds", s))
                    .unwrap_or_default()
            )));
        }

        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::not_found(
                "spreadsheet not found; is it published to the web?",
            ));
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SourceError::access_denied(
                "spreadsheet is private; publish it to the web first",
            ));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::server(format!("feed error ({}): {}", status, body)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::network(format!("failed to read response: {}", e)))?;

        let feed = FeedDocument::from_json(&body)?;
        debug!(rows = feed.len(), "fetched list feed");
        Ok(feed)
    }
}

impl FeedSource for GoogleSheetsSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn feed_url(&self, locator: &SpreadsheetLocator) -> Url {
        locator.feed_url(&self.config.base_url)
    }

    fn fetch_feed<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, SourceResult<FeedDocument>> {
        Box::pin(async move {
            self.fetch(url)
                .await
                .map_err(|e| e.with_source_name(SOURCE_NAME))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceErrorCode;

    #[test]
    fn feed_url_uses_configured_base() {
        let config = GoogleSheetsConfig::new()
            .with_base_url("http://127.0.0.1:9/")
            .unwrap();
        let source = GoogleSheetsSource::new(config).unwrap();
        let url = source.feed_url(&SpreadsheetLocator::new("abc"));
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9/feeds/list/abc/1/public/values?alt=json"
        );
        assert_eq!(source.name(), "google");
    }

    /// Returns a base URL on a local port that nothing listens on.
    fn closed_port_base() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}/", port)
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let config = GoogleSheetsConfig::new()
            .with_base_url(&closed_port_base())
            .unwrap()
            .with_timeout(std::time::Duration::from_secs(2));
        let source = GoogleSheetsSource::new(config).unwrap();
        let url = source.feed_url(&SpreadsheetLocator::new("abc"));

        let err = source.fetch_feed(&url).await.unwrap_err();
        assert_eq!(err.code(), SourceErrorCode::NetworkError);
        assert!(err.is_retryable());
        assert_eq!(err.source_name(), Some("google"));
    }
}
