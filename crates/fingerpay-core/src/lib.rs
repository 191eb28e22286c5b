//! FingerPay client core
//!
//! Input validation and safe disclosure for the card-tokenization client:
//! Luhn checksum validation, secret newtypes for card numbers and PINs,
//! masking of recovered card numbers, and clipboard copy with a manual
//! fallback path.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod card;
pub mod checksum;
pub mod clipboard;
pub mod error;
pub mod presenter;

pub use card::{CardNumber, Pin, MIN_PIN_LENGTH};
pub use checksum::{is_valid, sanitize_digits, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
pub use clipboard::{
    Carrier, CarrierId, ClipboardPlatform, FallbackSurface, MockClipboard, MockSurface,
};
pub use error::{Error, ErrorCategory, Result};
pub use presenter::{mask, CopyPath, Presenter, MASK_PLACEHOLDER};
