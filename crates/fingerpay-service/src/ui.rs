//! UI port
//!
//! The workflows never touch a concrete UI. A host implements [`UiPort`]
//! to hand over form contents and to render status and results.

use fingerpay_core::{CardNumber, Pin};
use parking_lot::Mutex;

/// Enrollment form contents
#[derive(Debug, Clone)]
pub struct EnrollForm {
    /// Card number, already stripped to digits
    pub card: CardNumber,
    /// PIN
    pub pin: Pin,
    /// PIN confirmation
    pub confirm_pin: Pin,
}

impl EnrollForm {
    /// Build from raw field values; the card is sanitized to digits.
    pub fn new(card: &str, pin: impl Into<String>, confirm_pin: impl Into<String>) -> Self {
        Self {
            card: CardNumber::sanitize(card),
            pin: Pin::new(pin),
            confirm_pin: Pin::new(confirm_pin),
        }
    }
}

/// What to do with a recovered card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoverAction {
    /// Show the masked card only
    #[default]
    Reveal,
    /// Copy the full card to the clipboard, then show it masked
    Copy,
}

/// Recovery form contents
#[derive(Debug, Clone)]
pub struct RecoverForm {
    /// PIN
    pub pin: Pin,
    /// Submit intent
    pub action: RecoverAction,
}

impl RecoverForm {
    /// Build from raw field values
    pub fn new(pin: impl Into<String>, action: RecoverAction) -> Self {
        Self {
            pin: Pin::new(pin),
            action,
        }
    }
}

/// Capabilities the workflows need from the host UI
pub trait UiPort: Send + Sync {
    /// Current enrollment form contents
    fn enroll_form(&self) -> EnrollForm;

    /// Current recovery form contents
    fn recover_form(&self) -> RecoverForm;

    /// Show a status line
    fn set_status(&self, message: &str, is_error: bool);

    /// Clear the status line
    fn clear_status(&self) {
        self.set_status("", false);
    }

    /// Empty the enrollment form
    fn reset_enroll_form(&self);

    /// Empty the recovery form
    fn reset_recover_form(&self);

    /// Render a masked card number
    fn show_masked_card(&self, masked: &str);
}

#[derive(Default)]
struct MockUiState {
    enroll_form: Option<EnrollForm>,
    recover_form: Option<RecoverForm>,
    statuses: Vec<(String, bool)>,
    masked_card: Option<String>,
    enroll_resets: usize,
    recover_resets: usize,
}

/// Recording UI double for testing
#[derive(Default)]
pub struct MockUi {
    state: Mutex<MockUiState>,
}

impl MockUi {
    /// Create UI with empty forms
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the enrollment form
    pub fn fill_enroll_form(&self, form: EnrollForm) {
        self.state.lock().enroll_form = Some(form);
    }

    /// Fill the recovery form
    pub fn fill_recover_form(&self, form: RecoverForm) {
        self.state.lock().recover_form = Some(form);
    }

    /// Last status written, with its error flag
    pub fn last_status(&self) -> Option<(String, bool)> {
        self.state.lock().statuses.last().cloned()
    }

    /// Every status written, oldest first
    pub fn statuses(&self) -> Vec<(String, bool)> {
        self.state.lock().statuses.clone()
    }

    /// Masked card currently rendered
    pub fn masked_card(&self) -> Option<String> {
        self.state.lock().masked_card.clone()
    }

    /// Number of enrollment form resets
    pub fn enroll_resets(&self) -> usize {
        self.state.lock().enroll_resets
    }

    /// Number of recovery form resets
    pub fn recover_resets(&self) -> usize {
        self.state.lock().recover_resets
    }
}

impl UiPort for MockUi {
    fn enroll_form(&self) -> EnrollForm {
        self.state
            .lock()
            .enroll_form
            .clone()
            .unwrap_or_else(|| EnrollForm::new("", "", ""))
    }

    fn recover_form(&self) -> RecoverForm {
        self.state
            .lock()
            .recover_form
            .clone()
            .unwrap_or_else(|| RecoverForm::new("", RecoverAction::Reveal))
    }

    fn set_status(&self, message: &str, is_error: bool) {
        self.state
            .lock()
            .statuses
            .push((message.to_string(), is_error));
    }

    fn reset_enroll_form(&self) {
        let mut state = self.state.lock();
        state.enroll_form = None;
        state.enroll_resets += 1;
    }

    fn reset_recover_form(&self) {
        let mut state = self.state.lock();
        state.recover_form = None;
        state.recover_resets += 1;
    }

    fn show_masked_card(&self, masked: &str) {
        self.state.lock().masked_card = Some(masked.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enroll_form_sanitizes_card() {
        let form = EnrollForm::new("4111 1111-1111 1111", "1234", "1234");
        assert_eq!(form.card.as_str(), "4111111111111111");
    }

    #[test]
    fn test_mock_ui_reset_clears_form() {
        let ui = MockUi::new();
        ui.fill_recover_form(RecoverForm::new("1234", RecoverAction::Copy));
        assert_eq!(ui.recover_form().action, RecoverAction::Copy);

        ui.reset_recover_form();
        assert_eq!(ui.recover_form().action, RecoverAction::Reveal);
        assert!(ui.recover_form().pin.is_empty());
        assert_eq!(ui.recover_resets(), 1);
    }

    #[test]
    fn test_clear_status_writes_empty_line() {
        let ui = MockUi::new();
        ui.set_status("boom", true);
        ui.clear_status();
        assert_eq!(ui.last_status(), Some((String::new(), false)));
    }
}
