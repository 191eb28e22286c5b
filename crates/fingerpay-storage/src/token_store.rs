//! Recovery token and endpoint settings

use crate::{KeyValueStore, Result};
use zeroize::Zeroizing;

/// Storage key of the backend endpoint
pub const BACKEND_URL_KEY: &str = "backend_url";

/// Storage key of the recovery token
pub const K_TOKEN_KEY: &str = "k_token";

/// Endpoint used until the user configures one
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787";

/// Typed access to the client's persisted settings
///
/// At most one recovery token is stored; a new enrollment overwrites it.
pub struct TokenStore<S> {
    kv: S,
}

impl<S: KeyValueStore> TokenStore<S> {
    /// Wrap a key-value backend
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Underlying backend
    pub fn backend(&self) -> &S {
        &self.kv
    }

    /// Configured endpoint, or [`DEFAULT_ENDPOINT`] if none was ever set.
    ///
    /// A stored empty string is returned as-is.
    pub async fn get_endpoint(&self) -> Result<String> {
        Ok(self
            .kv
            .get(BACKEND_URL_KEY)
            .await?
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()))
    }

    /// Persist the endpoint (surrounding whitespace removed)
    pub async fn set_endpoint(&self, url: &str) -> Result<()> {
        self.kv.set(BACKEND_URL_KEY, url.trim()).await
    }

    /// Stored recovery token, if any
    pub async fn get_token(&self) -> Result<Option<Zeroizing<String>>> {
        Ok(self
            .kv
            .get(K_TOKEN_KEY)
            .await?
            .filter(|t| !t.is_empty())
            .map(Zeroizing::new))
    }

    /// Persist the recovery token, replacing any previous one
    pub async fn set_token(&self, token: &str) -> Result<()> {
        self.kv.set(K_TOKEN_KEY, token).await
    }

    /// Forget the recovery token
    pub async fn clear_token(&self) -> Result<()> {
        self.kv.remove(K_TOKEN_KEY).await
    }
}
