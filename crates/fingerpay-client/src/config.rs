//! Backend client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Whole-request timeout; `None` keeps the transport default
    pub request_timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Request timeout as a duration
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("fingerpay/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_timeout() {
        let config = ClientConfig::default();
        assert!(config.request_timeout().is_none());
        assert!(config.user_agent.starts_with("fingerpay/"));
    }

    #[test]
    fn test_partial_config_deserializes() {
        let config: ClientConfig = serde_json::from_str(r#"{"request_timeout_secs": 30}"#).unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.user_agent, ClientConfig::default().user_agent);
    }
}
