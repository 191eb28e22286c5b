//! Backend HTTP client
//!
//! Every call is a JSON POST resolved against the configured endpoint.
//! Failures come back as [`Error`]; transport errors never escape raw.

use crate::{ClientConfig, Error, Result};
use fingerpay_core::{CardNumber, Pin};
use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Enrollment path
pub const CREATE_K_PATH: &str = "/create-k";

/// Recovery path
pub const RECOVER_CARD_PATH: &str = "/recover-card";

/// Error text substituted for a body that is not JSON
pub const NON_JSON_RESPONSE: &str = "Backend returned non-JSON response";

/// Backend client
#[derive(Clone)]
pub struct BackendClient {
    endpoint: String,
    http: reqwest::Client,
}

impl BackendClient {
    /// Create client with default configuration
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Create client from configuration
    pub fn with_config(endpoint: impl Into<String>, config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::ClientInit(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    /// Same HTTP client pointed at another endpoint
    pub fn with_endpoint(&self, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: self.http.clone(),
        }
    }

    /// Configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Resolve `path` against the endpoint as base URL
    pub fn resolve(&self, path: &str) -> Result<Url> {
        let base = self.endpoint.trim();
        if base.is_empty() {
            return Err(Error::MissingEndpoint);
        }
        Url::parse(base)
            .and_then(|base| base.join(path))
            .map_err(|_| Error::InvalidEndpoint)
    }

    /// POST `body` as JSON to `path` and return the parsed response.
    ///
    /// A body that is not JSON reads as `{"error": NON_JSON_RESPONSE}`.
    /// On a 2xx status the payload is returned verbatim; otherwise the call
    /// fails with the payload's `error` message.
    pub async fn call<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let url = self.resolve(path)?;
        debug!("POST {}", url);

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                debug!("Backend request failed: {}", e);
                Error::BackendUnreachable
            })?;

        let status = response.status();
        let data = parse_json_safe(response).await;

        if !status.is_success() {
            let message = error_message(&data, status);
            debug!("Backend returned {}: {}", status, message);
            return Err(Error::BackendError(message));
        }

        Ok(data)
    }

    /// Enroll a card, returning the recovery token
    pub async fn create_k(&self, card: &CardNumber, pin: &Pin) -> Result<Zeroizing<String>> {
        #[derive(Serialize)]
        struct CreateKRequest<'a> {
            card: &'a str,
            pin: &'a str,
        }

        let mut response = self
            .call(
                CREATE_K_PATH,
                &CreateKRequest {
                    card: card.as_str(),
                    pin: pin.as_str(),
                },
            )
            .await?;

        take_string_field(&mut response, "k_token")
            .ok_or_else(|| Error::MalformedResponse("Backend response missing k_token".to_string()))
    }

    /// Recover the card number behind `k_token`
    pub async fn recover_card(&self, k_token: &str, pin: &Pin) -> Result<Zeroizing<String>> {
        #[derive(Serialize)]
        struct RecoverCardRequest<'a> {
            k_token: &'a str,
            pin: &'a str,
        }

        let mut response = self
            .call(
                RECOVER_CARD_PATH,
                &RecoverCardRequest {
                    k_token,
                    pin: pin.as_str(),
                },
            )
            .await?;

        take_string_field(&mut response, "card")
            .ok_or_else(|| Error::MalformedResponse("Backend response missing card".to_string()))
    }
}

async fn parse_json_safe(response: reqwest::Response) -> Value {
    let parsed = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<Value>(&body).ok(),
        Err(e) => {
            debug!("Failed to read backend body: {}", e);
            None
        }
    };

    parsed.unwrap_or_else(|| {
        warn!("{}", NON_JSON_RESPONSE);
        json!({ "error": NON_JSON_RESPONSE })
    })
}

fn error_message(data: &Value, status: StatusCode) -> String {
    match data.get("error").and_then(Value::as_str) {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => format!("Backend error ({})", status.as_u16()),
    }
}

/// Move a non-empty string field out of the payload
fn take_string_field(payload: &mut Value, field: &str) -> Option<Zeroizing<String>> {
    match payload.get_mut(field).map(Value::take) {
        Some(Value::String(value)) if !value.is_empty() => Some(Zeroizing::new(value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        let client = BackendClient::new("http://127.0.0.1:8787");
        assert_eq!(
            client.resolve(CREATE_K_PATH).unwrap().as_str(),
            "http://127.0.0.1:8787/create-k"
        );

        // Absolute paths replace any path on the endpoint.
        let client = BackendClient::new("https://pay.example.com/api/");
        assert_eq!(
            client.resolve(RECOVER_CARD_PATH).unwrap().as_str(),
            "https://pay.example.com/recover-card"
        );
    }

    #[test]
    fn test_resolve_trims_endpoint() {
        let client = BackendClient::new("  http://localhost:8787  ");
        assert_eq!(
            client.resolve(CREATE_K_PATH).unwrap().as_str(),
            "http://localhost:8787/create-k"
        );
    }

    #[test]
    fn test_missing_endpoint() {
        assert_eq!(BackendClient::new("").resolve("/x").unwrap_err(), Error::MissingEndpoint);
        assert_eq!(BackendClient::new("   ").resolve("/x").unwrap_err(), Error::MissingEndpoint);
    }

    #[test]
    fn test_invalid_endpoint() {
        assert_eq!(
            BackendClient::new("not a url").resolve("/x").unwrap_err(),
            Error::InvalidEndpoint
        );
        assert_eq!(
            BackendClient::new("127.0.0.1:8787").resolve("/x").unwrap_err(),
            Error::InvalidEndpoint
        );
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(&json!({"error": "bad pin"}), StatusCode::BAD_REQUEST),
            "bad pin"
        );
        assert_eq!(
            error_message(&json!({"error": ""}), StatusCode::BAD_REQUEST),
            "Backend error (400)"
        );
        assert_eq!(
            error_message(&json!({}), StatusCode::INTERNAL_SERVER_ERROR),
            "Backend error (500)"
        );
    }

    #[test]
    fn test_take_string_field() {
        let mut payload = json!({"k_token": "abc123", "empty": "", "num": 5});
        assert_eq!(
            take_string_field(&mut payload, "k_token").as_deref().map(String::as_str),
            Some("abc123")
        );
        assert!(take_string_field(&mut payload, "empty").is_none());
        assert!(take_string_field(&mut payload, "num").is_none());
        assert!(take_string_field(&mut payload, "missing").is_none());
    }
}
