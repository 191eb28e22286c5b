//! Clipboard access
//!
//! Two host capabilities back a copy:
//! - [`ClipboardPlatform`]: the platform clipboard API (may be denied or missing)
//! - [`FallbackSurface`]: a surface that can hold a temporary off-screen text
//!   carrier, select it and run the legacy copy command
//!
//! [`Carrier`] removes its carrier from the surface when dropped, so the
//! surface is left clean whether the legacy copy worked or not.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use zeroize::Zeroizing;

/// Platform clipboard interface
#[async_trait]
pub trait ClipboardPlatform: Send + Sync {
    /// Write text to the clipboard
    async fn write_text(&self, text: &str) -> io::Result<()>;
}

/// Handle of a temporary text carrier on a [`FallbackSurface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarrierId(pub u64);

/// Manual copy mechanism used when the platform clipboard fails
pub trait FallbackSurface: Send + Sync {
    /// Insert an off-screen, read-only carrier holding `text`
    fn insert_carrier(&self, text: &str) -> CarrierId;

    /// Select the carrier's contents
    fn select(&self, carrier: CarrierId);

    /// Run the legacy copy command on the current selection
    fn exec_copy(&self) -> bool;

    /// Remove the carrier from the surface
    fn remove_carrier(&self, carrier: CarrierId);
}

/// Carrier inserted on a surface for the duration of one fallback copy
pub struct Carrier<'a> {
    surface: &'a dyn FallbackSurface,
    id: CarrierId,
}

impl<'a> Carrier<'a> {
    /// Insert a carrier holding `text`
    pub fn insert(surface: &'a dyn FallbackSurface, text: &str) -> Self {
        let id = surface.insert_carrier(text);
        Self { surface, id }
    }

    /// Carrier handle
    pub fn id(&self) -> CarrierId {
        self.id
    }

    /// Select the carrier and run the legacy copy command
    pub fn select_and_copy(&self) -> bool {
        self.surface.select(self.id);
        self.surface.exec_copy()
    }
}

impl Drop for Carrier<'_> {
    fn drop(&mut self) {
        self.surface.remove_carrier(self.id);
    }
}

/// Mock clipboard for testing
pub struct MockClipboard {
    content: RwLock<Option<Zeroizing<String>>>,
    available: bool,
}

impl MockClipboard {
    /// Clipboard that accepts writes
    pub fn new() -> Self {
        Self {
            content: RwLock::new(None),
            available: true,
        }
    }

    /// Clipboard that refuses every write, as if permission were denied
    pub fn unavailable() -> Self {
        Self {
            content: RwLock::new(None),
            available: false,
        }
    }

    /// Current clipboard content
    pub fn content(&self) -> Option<String> {
        self.content.read().as_ref().map(|c| c.to_string())
    }
}

impl Default for MockClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardPlatform for MockClipboard {
    async fn write_text(&self, text: &str) -> io::Result<()> {
        if !self.available {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "clipboard write denied",
            ));
        }
        *self.content.write() = Some(Zeroizing::new(text.to_string()));
        Ok(())
    }
}

/// Mock fallback surface for testing
pub struct MockSurface {
    next_id: AtomicU64,
    carriers: Mutex<HashMap<CarrierId, Zeroizing<String>>>,
    selected: Mutex<Option<CarrierId>>,
    copied: Mutex<Option<Zeroizing<String>>>,
    copy_succeeds: bool,
}

impl MockSurface {
    /// Surface whose legacy copy command succeeds
    pub fn new() -> Self {
        Self::with_copy_result(true)
    }

    /// Surface whose legacy copy command always fails
    pub fn failing() -> Self {
        Self::with_copy_result(false)
    }

    fn with_copy_result(copy_succeeds: bool) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            carriers: Mutex::new(HashMap::new()),
            selected: Mutex::new(None),
            copied: Mutex::new(None),
            copy_succeeds,
        }
    }

    /// Carriers still attached to the surface
    pub fn live_carriers(&self) -> usize {
        self.carriers.lock().len()
    }

    /// Number of carriers ever inserted
    pub fn inserted_count(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst) - 1
    }

    /// Text copied by the last successful legacy copy
    pub fn copied(&self) -> Option<String> {
        self.copied.lock().as_ref().map(|c| c.to_string())
    }
}

impl Default for MockSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackSurface for MockSurface {
    fn insert_carrier(&self, text: &str) -> CarrierId {
        let id = CarrierId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.carriers
            .lock()
            .insert(id, Zeroizing::new(text.to_string()));
        id
    }

    fn select(&self, carrier: CarrierId) {
        *self.selected.lock() = Some(carrier);
    }

    fn exec_copy(&self) -> bool {
        if !self.copy_succeeds {
            return false;
        }
        let Some(id) = *self.selected.lock() else {
            return false;
        };
        match self.carriers.lock().get(&id) {
            Some(text) => {
                *self.copied.lock() = Some(text.clone());
                true
            }
            None => false,
        }
    }

    fn remove_carrier(&self, carrier: CarrierId) {
        self.carriers.lock().remove(&carrier);
        let mut selected = self.selected.lock();
        if *selected == Some(carrier) {
            *selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_removed_on_drop() {
        let surface = MockSurface::new();
        {
            let carrier = Carrier::insert(&surface, "4111111111111111");
            assert_eq!(surface.live_carriers(), 1);
            assert!(carrier.select_and_copy());
        }
        assert_eq!(surface.live_carriers(), 0);
        assert_eq!(surface.copied(), Some("4111111111111111".to_string()));
    }

    #[test]
    fn test_carrier_removed_when_copy_fails() {
        let surface = MockSurface::failing();
        {
            let carrier = Carrier::insert(&surface, "secret");
            assert!(!carrier.select_and_copy());
        }
        assert_eq!(surface.live_carriers(), 0);
        assert_eq!(surface.copied(), None);
    }

    #[test]
    fn test_exec_copy_without_selection() {
        let surface = MockSurface::new();
        let _carrier = Carrier::insert(&surface, "secret");
        assert!(!surface.exec_copy());
    }

    #[tokio::test]
    async fn test_mock_clipboard() {
        let clipboard = MockClipboard::new();
        assert_eq!(clipboard.content(), None);

        clipboard.write_text("hello").await.unwrap();
        assert_eq!(clipboard.content(), Some("hello".to_string()));

        let denied = MockClipboard::unavailable();
        let err = denied.write_text("hello").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(denied.content(), None);
    }
}
