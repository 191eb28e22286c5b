//! FingerPay backend client
//!
//! Speaks the two-call tokenization protocol (`/create-k`, `/recover-card`)
//! against a user-configured endpoint and folds every failure mode into one
//! error contract.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;

pub use client::{BackendClient, CREATE_K_PATH, NON_JSON_RESPONSE, RECOVER_CARD_PATH};
pub use config::ClientConfig;
pub use error::{Error, Result};
