//! Durable local storage for the FingerPay client
//!
//! Holds the two installation-scoped settings the client persists: the
//! backend endpoint and the single recovery token (K). Storage is an async
//! key-value port so a file, a platform keystore or an in-memory double can
//! back it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod file_store;
pub mod kv;
pub mod memory;
pub mod token_store;

pub use error::{Error, Result};
pub use file_store::{default_data_dir, FileStore, STORE_FILE_NAME};
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
pub use token_store::{TokenStore, BACKEND_URL_KEY, DEFAULT_ENDPOINT, K_TOKEN_KEY};
