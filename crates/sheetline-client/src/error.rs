//! Client error types.

use std::fmt;

use sheetline_feed::{ConfigError, SourceError};

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration file error.
    Config(String),
    /// Building the timeline configuration failed.
    Build(ConfigError),
    /// IO error.
    Io(std::io::Error),
    /// Rendering output failed.
    Output(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Build(err) => write!(f, "{}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Output(msg) => write!(f, "output error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Build(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ConfigError> for ClientError {
    fn from(err: ConfigError) -> Self {
        Self::Build(err)
    }
}

impl From<SourceError> for ClientError {
    fn from(err: SourceError) -> Self {
        Self::Build(ConfigError::Source(err))
    }
}

impl From<crate::config::ConfigFileError> for ClientError {
    fn from(err: crate::config::ConfigFileError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_errors_display_unprefixed() {
        let err = ClientError::from(ConfigError::EmptyFeed);
        assert_eq!(err.to_string(), "no data entries found");
    }

    #[test]
    fn source_errors_become_build_errors() {
        let err = ClientError::from(SourceError::not_found("missing"));
        assert!(matches!(err, ClientError::Build(ConfigError::Source(_))));
        assert!(std::error::Error::source(&err).is_some());
    }
}
