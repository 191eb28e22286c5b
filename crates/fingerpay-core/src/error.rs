//! Error types for FingerPay core
//!
//! Validation and clipboard failures, plus the category taxonomy shared by
//! every crate in the workspace.

use std::fmt;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Core errors
///
/// The `Display` text of each variant is the status message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// PIN and confirmation PIN differ
    #[error("PIN mismatch")]
    PinMismatch,

    /// PIN shorter than the minimum length
    #[error("PIN must be at least {min} characters")]
    PinTooShort {
        /// Minimum accepted length
        min: usize,
    },

    /// Card number is not 12-19 digits or fails the Luhn check
    #[error("Card number failed Luhn check")]
    ChecksumFailed,

    /// Nothing to copy
    #[error("Nothing to copy")]
    EmptyValue,

    /// Both the native clipboard and the fallback copy failed
    #[error("Clipboard write failed")]
    ClipboardWriteFailed,
}

impl Error {
    /// Check if error was raised before any network call
    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::PinMismatch | Error::PinTooShort { .. } | Error::ChecksumFailed => {
                ErrorCategory::Validation
            }
            Error::EmptyValue | Error::ClipboardWriteFailed => ErrorCategory::Clipboard,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected input, reported inline without a network call
    Validation,
    /// Missing or malformed backend endpoint
    Configuration,
    /// Backend could not be reached
    Transport,
    /// Backend refused the request or answered with an unexpected shape
    Protocol,
    /// Clipboard copy failed
    Clipboard,
    /// Durable storage failed
    Storage,
    /// Another submission of the same form is still running
    Concurrency,
    /// Unlock session is locked or expired
    Session,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Validation => write!(f, "Validation"),
            ErrorCategory::Configuration => write!(f, "Configuration"),
            ErrorCategory::Transport => write!(f, "Transport"),
            ErrorCategory::Protocol => write!(f, "Protocol"),
            ErrorCategory::Clipboard => write!(f, "Clipboard"),
            ErrorCategory::Storage => write!(f, "Storage"),
            ErrorCategory::Concurrency => write!(f, "Concurrency"),
            ErrorCategory::Session => write!(f, "Session"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert_eq!(Error::PinMismatch.to_string(), "PIN mismatch");
        assert_eq!(
            Error::PinTooShort { min: 4 }.to_string(),
            "PIN must be at least 4 characters"
        );
        assert_eq!(Error::ChecksumFailed.to_string(), "Card number failed Luhn check");
        assert_eq!(Error::EmptyValue.to_string(), "Nothing to copy");
        assert_eq!(Error::ClipboardWriteFailed.to_string(), "Clipboard write failed");
    }

    #[test]
    fn test_error_categories() {
        assert!(Error::PinMismatch.is_validation());
        assert!(Error::ChecksumFailed.is_validation());
        assert!(!Error::EmptyValue.is_validation());
        assert_eq!(Error::ClipboardWriteFailed.category(), ErrorCategory::Clipboard);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Validation.to_string(), "Validation");
        assert_eq!(ErrorCategory::Transport.to_string(), "Transport");
        assert_eq!(ErrorCategory::Concurrency.to_string(), "Concurrency");
    }
}
