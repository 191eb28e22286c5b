//! Secret input values
//!
//! Card numbers and PINs only ever live in zeroize-on-drop buffers and never
//! show up in `Debug` output.

use crate::checksum::{is_valid, sanitize_digits};
use crate::{Error, Result};
use std::fmt;
use zeroize::Zeroizing;

/// Minimum PIN length, in characters
pub const MIN_PIN_LENGTH: usize = 4;

/// Sanitized card number (digits only)
#[derive(Clone, PartialEq, Eq)]
pub struct CardNumber(Zeroizing<String>);

impl CardNumber {
    /// Build from raw user input, dropping every non-digit character.
    ///
    /// The result is not validated; see [`CardNumber::validate`].
    pub fn sanitize(raw: &str) -> Self {
        Self(Zeroizing::new(sanitize_digits(raw)))
    }

    /// Sanitize and require a passing Luhn check.
    pub fn parse(raw: &str) -> Result<Self> {
        let card = Self::sanitize(raw);
        card.validate()?;
        Ok(card)
    }

    /// Require 12-19 digits and a passing Luhn check.
    pub fn validate(&self) -> Result<()> {
        if is_valid(&self.0) {
            Ok(())
        } else {
            Err(Error::ChecksumFailed)
        }
    }

    /// Digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no digits survived sanitization
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CardNumber").field(&"<redacted>").finish()
    }
}

/// User PIN
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(Zeroizing<String>);

impl Pin {
    /// Wrap a PIN exactly as typed (no trimming).
    pub fn new(pin: impl Into<String>) -> Self {
        Self(Zeroizing::new(pin.into()))
    }

    /// PIN text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// True for an empty PIN
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Require at least [`MIN_PIN_LENGTH`] characters.
    pub fn check_length(&self) -> Result<()> {
        if self.len() < MIN_PIN_LENGTH {
            return Err(Error::PinTooShort {
                min: MIN_PIN_LENGTH,
            });
        }
        Ok(())
    }

    /// Require `confirm` to match, then check the length.
    pub fn confirm(&self, confirm: &Pin) -> Result<()> {
        if self != confirm {
            return Err(Error::PinMismatch);
        }
        self.check_length()
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pin").field(&"<redacted>").finish()
    }
}
