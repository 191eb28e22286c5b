//! Error types

use fingerpay_core::ErrorCategory;
use std::fmt;

/// User-facing form a submission came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// Card enrollment form
    Enroll,
    /// Card recovery form
    Recover,
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Form::Enroll => write!(f, "enroll"),
            Form::Recover => write!(f, "recover"),
        }
    }
}

/// Workflow errors
///
/// `Display` is the single status message shown for a failed submission.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Validation or clipboard failure
    #[error(transparent)]
    Core(#[from] fingerpay_core::Error),

    /// Backend exchange failure
    #[error(transparent)]
    Client(#[from] fingerpay_client::Error),

    /// Durable storage failure
    #[error(transparent)]
    Storage(#[from] fingerpay_storage::Error),

    /// Recovery attempted before any enrollment
    #[error("No stored K token. Add a card first.")]
    NoStoredToken,

    /// Same form submitted while its previous submission is still running
    #[error("A previous {0} request is still in progress")]
    Busy(Form),

    /// Session holds no card
    #[error("Session is locked")]
    SessionLocked,

    /// Session outlived its TTL
    #[error("Session expired")]
    SessionExpired,
}

impl Error {
    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Core(e) => e.category(),
            Error::Client(e) => e.category(),
            Error::Storage(e) => e.category(),
            Error::NoStoredToken => ErrorCategory::Configuration,
            Error::Busy(_) => ErrorCategory::Concurrency,
            Error::SessionLocked | Error::SessionExpired => ErrorCategory::Session,
        }
    }
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_pass_through() {
        let err: Error = fingerpay_client::Error::BackendError("bad pin".to_string()).into();
        assert_eq!(err.to_string(), "bad pin");

        let err: Error = fingerpay_core::Error::PinMismatch.into();
        assert_eq!(err.to_string(), "PIN mismatch");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::NoStoredToken.category(), ErrorCategory::Configuration);
        assert_eq!(Error::Busy(Form::Enroll).category(), ErrorCategory::Concurrency);
        assert_eq!(Error::SessionExpired.category(), ErrorCategory::Session);
        assert_eq!(
            Error::from(fingerpay_client::Error::BackendUnreachable).category(),
            ErrorCategory::Transport
        );
    }

    #[test]
    fn test_busy_message() {
        assert_eq!(
            Error::Busy(Form::Recover).to_string(),
            "A previous recover request is still in progress"
        );
    }
}
