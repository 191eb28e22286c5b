//! Key-value storage port

use crate::Result;
use async_trait::async_trait;

/// Installation-scoped durable key-value storage
///
/// Every call is an independent suspend point; there is no grouping of
/// writes across keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value (no-op when absent)
    async fn remove(&self, key: &str) -> Result<()>;
}
