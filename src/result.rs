use std::time::Duration;
use thiserror::Error;

/// Boxed driver error carried by the connection, query and close variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the IN-list demonstration
#[derive(Error, Debug)]
pub enum InListError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0}")]
    DriverUnavailable(String),
    #[error("{0}")]
    Connection(#[source] BoxError),
    #[error("connection attempt timed out after {0:?}")]
    Timeout(Duration),
    #[error("{0}")]
    Query(#[source] BoxError),
    #[error("{0}")]
    Close(#[source] BoxError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InListError {
    pub fn connection(err: impl Into<BoxError>) -> Self {
        InListError::Connection(err.into())
    }

    pub fn query(err: impl Into<BoxError>) -> Self {
        InListError::Query(err.into())
    }

    pub fn close(err: impl Into<BoxError>) -> Self {
        InListError::Close(err.into())
    }
}

/// Type alias for Results using InListError
pub type Result<T> = std::result::Result<T, InListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_errors_display_verbatim() {
        let err = InListError::query("ORA-01795: maximum number of expressions in a list is 1000");
        assert_eq!(
            err.to_string(),
            "ORA-01795: maximum number of expressions in a list is 1000"
        );
        assert!(matches!(err, InListError::Query(_)));
    }

    #[test]
    fn test_timeout_display() {
        let err = InListError::Timeout(Duration::from_secs(3));
        assert_eq!(err.to_string(), "connection attempt timed out after 3s");
    }

    #[test]
    fn test_source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = InListError::connection(io);
        let source = std::error::Error::source(&err).expect("source should be kept");
        assert_eq!(source.to_string(), "refused");
    }
}
