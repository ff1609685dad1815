//! Error types for Distributed.

use thiserror::Error;

use crate::api::ApiError;

/// Common error type for Distributed.
#[derive(Error, Debug)]
pub enum DistributedError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error returned by the backend API or its transport.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed cookie data.
    #[error("cookie error: {0}")]
    Cookie(String),

    /// Invalid URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for Distributed operations.
pub type Result<T> = std::result::Result<T, DistributedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = DistributedError::Validation("title is required".to_string());
        assert_eq!(err.to_string(), "validation error: title is required");
    }

    #[test]
    fn test_config_error_display() {
        let err = DistributedError::Config("api.prefix must end with '/'".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: api.prefix must end with '/'"
        );
    }

    #[test]
    fn test_api_error_conversion() {
        let err: DistributedError = ApiError::UnexpectedStatus(404).into();
        assert!(matches!(err, DistributedError::Api(_)));
        assert_eq!(err.to_string(), "API error: unexpected HTTP status 404");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DistributedError = io_err.into();
        assert!(matches!(err, DistributedError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_url_error_conversion() {
        let err: DistributedError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, DistributedError::Url(_)));
    }
}
