//! Safe disclosure of recovered card numbers
//!
//! Only the last four digits are ever rendered; the full value leaves the
//! process only through an explicit clipboard copy.

use crate::checksum::sanitize_digits;
use crate::clipboard::{Carrier, ClipboardPlatform, FallbackSurface};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// Shown instead of a card with fewer than four digits
pub const MASK_PLACEHOLDER: &str = "****";

/// Digits left visible by [`mask`]
const VISIBLE_DIGITS: usize = 4;

/// Mask a card number for display.
///
/// Non-digits are stripped first. Fewer than four digits yields
/// [`MASK_PLACEHOLDER`]; otherwise every digit but the last four becomes `*`.
pub fn mask(card: &str) -> String {
    let digits = sanitize_digits(card);
    if digits.len() < VISIBLE_DIGITS {
        return MASK_PLACEHOLDER.to_string();
    }
    let hidden = digits.len() - VISIBLE_DIGITS;
    let mut masked = "*".repeat(hidden);
    masked.push_str(&digits[hidden..]);
    masked
}

/// Which mechanism completed a clipboard copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    /// Platform clipboard API
    Native,
    /// Manual select-and-copy on the fallback surface
    Fallback,
}

/// Presents recovered values: masking for display, clipboard on request
#[derive(Clone)]
pub struct Presenter {
    clipboard: Arc<dyn ClipboardPlatform>,
    fallback: Arc<dyn FallbackSurface>,
}

impl Presenter {
    /// Create presenter over the host's clipboard capabilities
    pub fn new(clipboard: Arc<dyn ClipboardPlatform>, fallback: Arc<dyn FallbackSurface>) -> Self {
        Self {
            clipboard,
            fallback,
        }
    }

    /// Mask a card number for display
    pub fn mask(&self, card: &str) -> String {
        mask(card)
    }

    /// Copy `value` to the clipboard.
    ///
    /// Tries the platform clipboard first and falls back to a temporary
    /// carrier on the fallback surface. The carrier is always removed.
    pub async fn copy_to_clipboard(&self, value: &str) -> Result<CopyPath> {
        if value.is_empty() {
            return Err(Error::EmptyValue);
        }

        match self.clipboard.write_text(value).await {
            Ok(()) => {
                debug!("Copied value with platform clipboard");
                return Ok(CopyPath::Native);
            }
            Err(e) => {
                warn!("Platform clipboard unavailable ({}), using fallback copy", e.kind());
            }
        }

        let copied = {
            let carrier = Carrier::insert(self.fallback.as_ref(), value);
            carrier.select_and_copy()
        };

        if copied {
            debug!("Copied value with fallback surface");
            Ok(CopyPath::Fallback)
        } else {
            Err(Error::ClipboardWriteFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{MockClipboard, MockSurface};

    fn presenter(
        clipboard: MockClipboard,
        surface: MockSurface,
    ) -> (Presenter, Arc<MockClipboard>, Arc<MockSurface>) {
        let clipboard = Arc::new(clipboard);
        let surface = Arc::new(surface);
        (
            Presenter::new(clipboard.clone(), surface.clone()),
            clipboard,
            surface,
        )
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("4111111111111111"), "************1111");
        assert_eq!(mask("4111-1111-1111-1234"), "************1234");
        assert_eq!(mask("1234"), "1234");
        assert_eq!(mask("12345"), "*2345");
    }

    #[test]
    fn test_mask_short_input() {
        assert_eq!(mask(""), "****");
        assert_eq!(mask("123"), "****");
        assert_eq!(mask("a1b2c3"), "****");
    }

    #[tokio::test]
    async fn test_copy_native() {
        let (presenter, clipboard, surface) = presenter(MockClipboard::new(), MockSurface::new());

        let path = presenter.copy_to_clipboard("4111111111111111").await.unwrap();
        assert_eq!(path, CopyPath::Native);
        assert_eq!(clipboard.content(), Some("4111111111111111".to_string()));
        assert_eq!(surface.inserted_count(), 0);
    }

    #[tokio::test]
    async fn test_copy_falls_back() {
        let (presenter, _clipboard, surface) =
            presenter(MockClipboard::unavailable(), MockSurface::new());

        let path = presenter.copy_to_clipboard("4111111111111111").await.unwrap();
        assert_eq!(path, CopyPath::Fallback);
        assert_eq!(surface.copied(), Some("4111111111111111".to_string()));
        assert_eq!(surface.inserted_count(), 1);
        assert_eq!(surface.live_carriers(), 0);
    }

    #[tokio::test]
    async fn test_copy_fails_and_cleans_up() {
        let (presenter, _clipboard, surface) =
            presenter(MockClipboard::unavailable(), MockSurface::failing());

        let err = presenter.copy_to_clipboard("4111111111111111").await.unwrap_err();
        assert_eq!(err, Error::ClipboardWriteFailed);
        assert_eq!(surface.inserted_count(), 1);
        assert_eq!(surface.live_carriers(), 0);
    }

    #[tokio::test]
    async fn test_copy_empty_value() {
        let (presenter, clipboard, surface) = presenter(MockClipboard::new(), MockSurface::new());

        assert_eq!(presenter.copy_to_clipboard("").await.unwrap_err(), Error::EmptyValue);
        assert_eq!(clipboard.content(), None);
        assert_eq!(surface.inserted_count(), 0);
    }
}
