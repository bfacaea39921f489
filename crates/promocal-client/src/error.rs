//! Client error types.

use promocal_core::ParseError;
use promocal_providers::ProviderError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The source text could not be turned into a date/time range.
    #[error("cannot read event time: {0}")]
    Parse(#[from] ParseError),

    /// The credential provider failed.
    #[error("authorization failed: {0}")]
    Auth(#[source] ProviderError),

    /// The event could not be published.
    #[error("failed to create event: {0}")]
    Publish(#[source] ProviderError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The provider rejected its configuration.
    #[error("configuration error: {0}")]
    ProviderConfig(#[source] ProviderError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_stage() {
        let err = ClientError::Auth(ProviderError::authentication("OAuth callback timeout"));
        assert_eq!(
            err.to_string(),
            "authorization failed: authentication_failed: OAuth callback timeout"
        );

        let err = ClientError::Publish(
            ProviderError::rate_limited("rate limit exceeded").with_provider("google"),
        );
        assert_eq!(
            err.to_string(),
            "failed to create event: [google] rate_limited: rate limit exceeded"
        );
    }

    #[test]
    fn provider_config_keeps_source_chain() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ClientError::ProviderConfig(
            ProviderError::configuration("failed to read client secrets cre.json").with_source(io),
        );
        assert_eq!(
            err.to_string(),
            "configuration error: configuration_error: failed to read client secrets cre.json"
        );
        let provider = err.source().unwrap();
        let io = provider.source().unwrap();
        assert_eq!(io.to_string(), "no such file");
    }

    #[test]
    fn parse_error_converts() {
        let parse = ParseError::UnknownMonth {
            input: "5 min".to_string(),
            month: "min".to_string(),
        };
        let err: ClientError = parse.into();
        assert!(matches!(err, ClientError::Parse(_)));
        assert!(err.to_string().starts_with("cannot read event time: "));
    }
}
