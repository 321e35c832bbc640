//! Directory client error types.
//!
//! Error definitions with transient/permanent classification so callers can
//! decide which failures are worth re-invoking for.

use thiserror::Error;

/// Error that can occur while talking to the identity directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Failed to reach the directory at all (DNS, TCP, TLS, timeout).
    #[error("connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The directory rejected the supplied token.
    #[error("authentication failed: {message}")]
    AuthFailed { message: String },

    /// The token is valid but lacks the capability for this path.
    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    /// The requested record or path does not exist (HTTP 404).
    ///
    /// The directory also answers 404 for an empty alias listing, so this is
    /// not always an error condition for callers.
    #[error("not found: {path}")]
    NotFound { path: String },

    /// The directory answered with an unexpected status.
    #[error("directory error (status {status}): {detail}")]
    ServiceError { status: u16, detail: String },

    /// A response body could not be decoded.
    #[error("response parse error: {message}")]
    ParseError { message: String },

    /// Client-side configuration is unusable.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl DirectoryError {
    /// Check if this error is transient and a fresh invocation may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DirectoryError::ConnectionFailed { .. }
                | DirectoryError::ServiceError { status: 429 | 500..=599, .. }
        )
    }

    /// Short code for log fields and reports.
    pub fn error_code(&self) -> &'static str {
        match self {
            DirectoryError::ConnectionFailed { .. } => "CONNECTION_FAILED",
            DirectoryError::AuthFailed { .. } => "AUTH_FAILED",
            DirectoryError::PermissionDenied { .. } => "PERMISSION_DENIED",
            DirectoryError::NotFound { .. } => "NOT_FOUND",
            DirectoryError::ServiceError { .. } => "SERVICE_ERROR",
            DirectoryError::ParseError { .. } => "PARSE_ERROR",
            DirectoryError::InvalidConfig { .. } => "INVALID_CONFIG",
        }
    }

    /// Create a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        DirectoryError::ConnectionFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection failed error with source.
    pub fn connection_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DirectoryError::ConnectionFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        DirectoryError::ParseError {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        DirectoryError::InvalidConfig {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            DirectoryError::connection_failed_with_source(err.to_string(), err)
        } else if err.is_decode() {
            DirectoryError::parse(err.to_string())
        } else {
            DirectoryError::connection_failed_with_source(format!("request failed: {err}"), err)
        }
    }
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;
