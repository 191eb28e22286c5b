//! Line-oriented terminal UI

use anyhow::{Context, Result};
use fingerpay_service::{EnrollForm, RecoverAction, RecoverForm, UiPort};
use parking_lot::Mutex;
use std::io::BufRead;
use tracing::debug;
use zeroize::Zeroizing;

/// Source of secret input; nothing typed is echoed.
pub trait SecretInput {
    /// Read one value after showing `label`
    fn read_secret(&mut self, label: &str) -> Result<Zeroizing<String>>;
}

/// Controlling terminal with echo disabled
pub struct Tty;

impl SecretInput for Tty {
    fn read_secret(&mut self, label: &str) -> Result<Zeroizing<String>> {
        let value = rpassword::prompt_password(format!("{}: ", label))
            .context("Failed to read input")?;
        Ok(Zeroizing::new(value))
    }
}

/// Line-per-value reader for piped input
pub struct Piped<R>(pub R);

impl<R: BufRead> SecretInput for Piped<R> {
    fn read_secret(&mut self, _label: &str) -> Result<Zeroizing<String>> {
        let value =
            rpassword::read_password_from_bufread(&mut self.0).context("Failed to read input")?;
        Ok(Zeroizing::new(value))
    }
}

/// Terminal host for the workflows.
///
/// Forms are filled by prompting before a submission; success status and
/// the masked card go to stdout. Failures are returned to the caller, which
/// reports them once.
#[derive(Default)]
pub struct TerminalUi {
    enroll: Mutex<Option<EnrollForm>>,
    recover: Mutex<Option<RecoverForm>>,
}

impl TerminalUi {
    /// Create UI with empty forms
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompt for card, PIN and confirmation
    pub fn prompt_enroll(&self, input: &mut dyn SecretInput) -> Result<()> {
        let card = input.read_secret("Card number (input hidden)")?;
        let pin = input.read_secret("PIN")?;
        let confirm = input.read_secret("Confirm PIN")?;
        *self.enroll.lock() = Some(EnrollForm::new(&card, pin.as_str(), confirm.as_str()));
        Ok(())
    }

    /// Prompt for the recovery PIN
    pub fn prompt_recover(&self, input: &mut dyn SecretInput, action: RecoverAction) -> Result<()> {
        let pin = input.read_secret("PIN")?;
        *self.recover.lock() = Some(RecoverForm::new(pin.as_str(), action));
        Ok(())
    }
}

impl UiPort for TerminalUi {
    fn enroll_form(&self) -> EnrollForm {
        self.enroll
            .lock()
            .clone()
            .unwrap_or_else(|| EnrollForm::new("", "", ""))
    }

    fn recover_form(&self) -> RecoverForm {
        self.recover
            .lock()
            .clone()
            .unwrap_or_else(|| RecoverForm::new("", RecoverAction::Reveal))
    }

    fn set_status(&self, message: &str, is_error: bool) {
        if message.is_empty() {
            return;
        }
        if is_error {
            debug!("Status (error): {}", message);
        } else {
            println!("{}", message);
        }
    }

    fn reset_enroll_form(&self) {
        *self.enroll.lock() = None;
    }

    fn reset_recover_form(&self) {
        *self.recover.lock() = None;
    }

    fn show_masked_card(&self, masked: &str) {
        println!("Card: {}", masked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_piped_input_strips_line_ending() {
        let mut input = Piped(Cursor::new("1234\r\nnext\n"));
        assert_eq!(input.read_secret("PIN").unwrap().as_str(), "1234");
        assert_eq!(input.read_secret("PIN").unwrap().as_str(), "next");
    }

    #[test]
    fn test_prompt_enroll_fills_form() {
        let ui = TerminalUi::new();
        let mut input = Piped(Cursor::new("4111 1111 1111 1111\n1234\n1234\n"));
        ui.prompt_enroll(&mut input).unwrap();

        let form = ui.enroll_form();
        assert_eq!(form.card.as_str(), "4111111111111111");
        assert_eq!(form.pin.as_str(), "1234");
        assert_eq!(form.confirm_pin.as_str(), "1234");

        ui.reset_enroll_form();
        assert!(ui.enroll_form().card.is_empty());
    }

    #[test]
    fn test_prompt_recover_keeps_action() {
        let ui = TerminalUi::new();
        let mut input = Piped(Cursor::new("1234\n"));
        ui.prompt_recover(&mut input, RecoverAction::Copy).unwrap();
        assert_eq!(ui.recover_form().action, RecoverAction::Copy);
        assert_eq!(ui.recover_form().pin.as_str(), "1234");
    }
}
