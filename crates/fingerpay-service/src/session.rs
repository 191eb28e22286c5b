//! In-memory unlock session
//!
//! Keeps a recovered card in memory for autofill until locked or until the
//! optional TTL runs out. Nothing is persisted.

use crate::{Error, Result};
use fingerpay_client::BackendClient;
use fingerpay_core::Pin;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use zeroize::Zeroizing;

/// Unlocked card held for a limited time
#[derive(Default)]
pub struct UnlockSession {
    card: Option<Zeroizing<String>>,
    unlocked_at: Option<Instant>,
    ttl: Option<Duration>,
}

impl UnlockSession {
    /// Locked session; `ttl` of `None` never expires
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            card: None,
            unlocked_at: None,
            ttl,
        }
    }

    /// Recover the card behind `k_token` and hold it
    pub async fn unlock(&mut self, client: &BackendClient, k_token: &str, pin: &Pin) -> Result<()> {
        pin.check_length()?;
        let card = client.recover_card(k_token, pin).await?;
        self.card = Some(card);
        self.unlocked_at = Some(Instant::now());
        debug!("Session unlocked");
        Ok(())
    }

    /// Card for autofill; an expired session locks itself
    pub fn card_for_autofill(&mut self) -> Result<Zeroizing<String>> {
        if self.card.is_none() {
            return Err(Error::SessionLocked);
        }
        if self.is_expired() {
            self.lock();
            return Err(Error::SessionExpired);
        }
        self.card.clone().ok_or(Error::SessionLocked)
    }

    /// Drop the held card
    pub fn lock(&mut self) {
        self.card = None;
        self.unlocked_at = None;
    }

    /// True while a card is held and the TTL has not run out
    pub fn is_unlocked(&mut self) -> bool {
        if self.card.is_none() {
            return false;
        }
        if self.is_expired() {
            self.lock();
            return false;
        }
        true
    }

    fn is_expired(&self) -> bool {
        match (self.ttl, self.unlocked_at) {
            (Some(ttl), Some(at)) => at.elapsed() >= ttl,
            _ => false,
        }
    }
}

impl std::fmt::Debug for UnlockSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnlockSession")
            .field("unlocked", &self.card.is_some())
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_by_default() {
        let mut session = UnlockSession::new(None);
        assert!(!session.is_unlocked());
        assert!(matches!(session.card_for_autofill(), Err(Error::SessionLocked)));
    }

    #[tokio::test]
    async fn test_short_pin_rejected_before_network() {
        // Nothing listens on the discard port; a network call would fail differently.
        let client = BackendClient::new("http://127.0.0.1:9");
        let mut session = UnlockSession::new(None);
        let err = session.unlock(&client, "abc123", &Pin::new("12")).await.unwrap_err();
        assert!(matches!(err, Error::Core(fingerpay_core::Error::PinTooShort { .. })));
        assert!(!session.is_unlocked());
    }
}
