//! Error types for feed retrieval and configuration building.
//!
//! Two layers:
//! - [`SourceError`] describes why a feed could not be retrieved
//!   (network, HTTP status, unparseable document).
//! - [`ConfigError`] is what the public entry points return; it wraps
//!   source and date failures next to the validation failures of the
//!   pipeline itself.

use std::fmt;

use sheetline_core::DateError;
use thiserror::Error;

/// The category of a feed source error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceErrorCode {
    /// Network error - connection failed, timeout, DNS resolution, etc.
    NetworkError,
    /// Rate limit exceeded - too many requests.
    RateLimited,
    /// Server returned an error (5xx status codes).
    ServerError,
    /// The spreadsheet does not exist or is not published (404).
    NotFound,
    /// The spreadsheet is private (401/403).
    AccessDenied,
    /// The response is not a list feed document.
    InvalidResponse,
    /// Source misconfigured - bad base URL, HTTP client setup failed.
    ConfigurationError,
}

impl SourceErrorCode {
    /// Returns true if retrying the same request later could succeed.
    ///
    /// No retries happen in this crate; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::RateLimited | Self::ServerError
        )
    }

    /// Returns a machine-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::NotFound => "not_found",
            Self::AccessDenied => "access_denied",
            Self::InvalidResponse => "invalid_response",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for SourceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised while retrieving or decoding a feed.
#[derive(Debug, Error)]
pub struct SourceError {
    code: SourceErrorCode,
    message: String,
    /// The source that produced this error (e.g. "google", "static").
    source_name: Option<String>,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    /// Creates a new source error with the given code and message.
    pub fn new(code: SourceErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source_name: None,
            cause: None,
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::NetworkError, message)
    }

    /// Creates a rate limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::RateLimited, message)
    }

    /// Creates a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::ServerError, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::NotFound, message)
    }

    /// Creates an access denied error.
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::AccessDenied, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::InvalidResponse, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(SourceErrorCode::ConfigurationError, message)
    }

    /// Sets the source name for this error.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Sets the underlying cause.
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> SourceErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the source name, if set.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Returns true if this error is transient.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref name) = self.source_name {
            write!(f, "[{}] ", name)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for feed retrieval.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that abort building a timeline configuration.
///
/// Every variant is fatal for the whole build; there is no partial result.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input is neither a spreadsheet URL nor a bare key.
    #[error("not a spreadsheet URL or key: {input:?}")]
    UnrecognizedIdentifier { input: String },

    /// The feed has no rows.
    #[error("no data entries found")]
    EmptyFeed,

    /// The first row matches neither known column layout.
    #[error("invalid data format: expected a `startdate` or `year` column")]
    UnrecognizedSchema,

    /// A row of a `startdate` sheet has no start date.
    #[error("row {row}: all items must have a start date column")]
    MissingStartDate { row: usize },

    /// A date or time cell could not be parsed.
    #[error("row {row}: {source}")]
    Date {
        row: usize,
        #[source]
        source: DateError,
    },

    /// The feed could not be retrieved.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl ConfigError {
    /// Creates an unrecognized identifier error.
    pub fn unrecognized_identifier(input: impl Into<String>) -> Self {
        Self::UnrecognizedIdentifier {
            input: input.into(),
        }
    }
}

/// A specialized Result type for configuration building.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_retryable() {
        assert!(SourceErrorCode::NetworkError.is_retryable());
        assert!(SourceErrorCode::RateLimited.is_retryable());
        assert!(SourceErrorCode::ServerError.is_retryable());
        assert!(!SourceErrorCode::NotFound.is_retryable());
        assert!(!SourceErrorCode::InvalidResponse.is_retryable());
    }

    #[test]
    fn source_error_display() {
        let err = SourceError::not_found("spreadsheet is not published").with_source_name("google");
        let display = err.to_string();
        assert!(display.contains("[google]"));
        assert!(display.contains("not_found"));
        assert!(display.contains("not published"));
        assert_eq!(err.source_name(), Some("google"));
    }

    #[test]
    fn source_error_with_cause() {
        use std::error::Error;
        let io_err = std::io::Error::other("connection reset");
        let err = SourceError::network("request failed").with_cause(io_err);
        assert!(err.source().is_some());
        assert!(err.is_retryable());
    }

    #[test]
    fn config_error_messages() {
        assert_eq!(ConfigError::EmptyFeed.to_string(), "no data entries found");
        assert_eq!(
            ConfigError::MissingStartDate { row: 3 }.to_string(),
            "row 3: all items must have a start date column"
        );
        assert!(
            ConfigError::unrecognized_identifier("http://example.com/foo")
                .to_string()
                .contains("http://example.com/foo")
        );
    }

    #[test]
    fn config_error_wraps_source_transparently() {
        let err: ConfigError = SourceError::server("boom").into();
        assert_eq!(err.to_string(), "server_error: boom");
    }
}
