//! Google Sheets source configuration.

use std::time::Duration;

use sheetline_core::DEFAULT_FEED_BASE;
use url::Url;

use crate::error::{SourceError, SourceResult};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Google Sheets feed source.
#[derive(Debug, Clone)]
pub struct GoogleSheetsConfig {
    /// Host serving the list feeds.
    ///
    /// Defaults to `https://spreadsheets.google.com`; point it at a mirror
    /// or a local server for testing.
    pub base_url: Url,

    /// Timeout for a whole feed request.
    pub timeout: Duration,

    /// User-Agent header sent with requests.
    pub user_agent: String,
}

impl Default for GoogleSheetsConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_FEED_BASE).expect("valid default feed base"),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("sheetline/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GoogleSheetsConfig {
    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the feed host.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `base_url` is not an absolute
    /// http(s) URL.
    pub fn with_base_url(mut self, base_url: &str) -> SourceResult<Self> {
        let url = Url::parse(base_url).map_err(|e| {
            SourceError::configuration(format!("invalid feed base URL {:?}: {}", base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(SourceError::configuration(format!(
                "feed base URL must be http or https: {:?}",
                base_url
            )));
        }
        self.base_url = url;
        Ok(self)
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceErrorCode;

    #[test]
    fn default_config() {
        let config = GoogleSheetsConfig::default();
        assert_eq!(config.base_url.as_str(), "https://spreadsheets.google.com/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("sheetline/"));
    }

    #[test]
    fn accepts_http_base() {
        let config = GoogleSheetsConfig::new()
            .with_base_url("http://localhost:8080/")
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url.port(), Some(8080));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_non_http_base() {
        let err = GoogleSheetsConfig::new()
            .with_base_url("file:///tmp/feeds")
            .unwrap_err();
        assert_eq!(err.code(), SourceErrorCode::ConfigurationError);
    }

    #[test]
    fn rejects_relative_base() {
        assert!(GoogleSheetsConfig::new().with_base_url("feeds/list").is_err());
    }
}
