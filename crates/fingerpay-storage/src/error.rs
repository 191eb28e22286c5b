//! Error types

use fingerpay_core::ErrorCategory;

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Store file is not a JSON object of strings
    #[error("Corrupt storage file: {0}")]
    Corrupt(String),

    /// No data directory could be determined for this installation
    #[error("No data directory available for this platform")]
    NoDataDir,
}

impl Error {
    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Storage
    }
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
