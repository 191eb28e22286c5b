//! Error types

use fingerpay_core::ErrorCategory;

/// Backend client errors
///
/// The `Display` text of each variant is the status message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No endpoint configured
    #[error("Set backend URL first")]
    MissingEndpoint,

    /// Endpoint plus path is not a well-formed absolute URL
    #[error("Invalid backend URL")]
    InvalidEndpoint,

    /// HTTP client could not be built from the configuration
    #[error("Failed to initialize HTTP client: {0}")]
    ClientInit(String),

    /// Transport failure (refused, DNS, unreachable)
    #[error("Could not reach backend. Is local API running?")]
    BackendUnreachable,

    /// Non-2xx response, carrying the backend's message
    #[error("{0}")]
    BackendError(String),

    /// 2xx response without the expected field
    #[error("{0}")]
    MalformedResponse(String),
}

impl Error {
    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::MissingEndpoint | Error::InvalidEndpoint | Error::ClientInit(_) => {
                ErrorCategory::Configuration
            }
            Error::BackendUnreachable => ErrorCategory::Transport,
            Error::BackendError(_) | Error::MalformedResponse(_) => ErrorCategory::Protocol,
        }
    }
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
