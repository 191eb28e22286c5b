//! Enrollment and recovery workflows
//!
//! Enrollment: `Idle -> Validating -> Submitting -> {Stored, Failed}`
//! Recovery: `Idle -> Validating -> Submitting -> {Revealed, CopiedAndRevealed, Failed}`
//!
//! Each form admits one submission at a time; a second submission while the
//! first is still running fails with [`Error::Busy`] and leaves the UI alone.

use crate::session::UnlockSession;
use crate::ui::{EnrollForm, RecoverAction, RecoverForm, UiPort};
use crate::{Error, Form, Result};
use fingerpay_client::BackendClient;
use fingerpay_core::{Pin, Presenter};
use fingerpay_storage::{KeyValueStore, TokenStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Status after a successful enrollment
pub const STATUS_STORED: &str = "K generated and stored in extension storage";

/// Status after a successful reveal
pub const STATUS_REVEALED: &str = "Recovered card (masked)";

/// Status after a successful copy
pub const STATUS_COPIED: &str = "Recovered card and copied to clipboard";

/// Enrollment progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollState {
    /// Nothing submitted yet
    Idle,
    /// Checking PIN and card
    Validating,
    /// Talking to the backend or the store
    Submitting,
    /// Token persisted
    Stored,
    /// Terminal failure
    Failed,
}

/// Recovery progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverState {
    /// Nothing submitted yet
    Idle,
    /// Checking PIN and stored token
    Validating,
    /// Talking to the backend
    Submitting,
    /// Masked card shown
    Revealed,
    /// Card copied and masked card shown
    CopiedAndRevealed,
    /// Terminal failure
    Failed,
}

/// What recovery does when the clipboard copy fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyFailurePolicy {
    /// Report the clipboard error and show nothing
    #[default]
    Abort,
    /// Report the clipboard error but still show the masked card
    RevealMasked,
}

/// Result of a successful recovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoverOutcome {
    /// Final state
    pub state: RecoverState,
    /// Masked card as rendered
    pub masked: String,
}

/// Outcome of the recovery exchange before it is rendered
enum Disclosure {
    Revealed(String),
    Copied(String),
    CopyFailed {
        masked: String,
        error: fingerpay_core::Error,
    },
}

/// Enrollment and recovery orchestration
pub struct Workflow<S> {
    store: TokenStore<S>,
    client: BackendClient,
    presenter: Presenter,
    ui: Arc<dyn UiPort>,
    copy_failure_policy: CopyFailurePolicy,
    enroll_gate: tokio::sync::Mutex<()>,
    recover_gate: tokio::sync::Mutex<()>,
    enroll_state: parking_lot::Mutex<EnrollState>,
    recover_state: parking_lot::Mutex<RecoverState>,
}

impl<S: KeyValueStore> Workflow<S> {
    /// Create workflow.
    ///
    /// `client` supplies the HTTP configuration; its endpoint is replaced by
    /// the stored one on every submission.
    pub fn new(
        store: TokenStore<S>,
        client: BackendClient,
        presenter: Presenter,
        ui: Arc<dyn UiPort>,
    ) -> Self {
        Self {
            store,
            client,
            presenter,
            ui,
            copy_failure_policy: CopyFailurePolicy::default(),
            enroll_gate: tokio::sync::Mutex::new(()),
            recover_gate: tokio::sync::Mutex::new(()),
            enroll_state: parking_lot::Mutex::new(EnrollState::Idle),
            recover_state: parking_lot::Mutex::new(RecoverState::Idle),
        }
    }

    /// Set the clipboard failure policy
    pub fn with_copy_failure_policy(mut self, policy: CopyFailurePolicy) -> Self {
        self.copy_failure_policy = policy;
        self
    }

    /// Token store
    pub fn store(&self) -> &TokenStore<S> {
        &self.store
    }

    /// Current enrollment state
    pub fn enroll_state(&self) -> EnrollState {
        *self.enroll_state.lock()
    }

    /// Current recovery state
    pub fn recover_state(&self) -> RecoverState {
        *self.recover_state.lock()
    }

    fn set_enroll_state(&self, state: EnrollState) {
        debug!("Enroll state -> {:?}", state);
        *self.enroll_state.lock() = state;
    }

    fn set_recover_state(&self, state: RecoverState) {
        debug!("Recover state -> {:?}", state);
        *self.recover_state.lock() = state;
    }

    async fn backend(&self) -> Result<BackendClient> {
        let endpoint = self.store.get_endpoint().await?;
        Ok(self.client.with_endpoint(endpoint))
    }

    /// Read the enrollment form from the UI and submit it
    pub async fn submit_enroll(&self) -> Result<()> {
        let form = self.ui.enroll_form();
        self.enroll(form).await
    }

    /// Enroll a card: validate, create a token, store it.
    ///
    /// The form is reset only after the token is stored.
    pub async fn enroll(&self, form: EnrollForm) -> Result<()> {
        let _gate = self
            .enroll_gate
            .try_lock()
            .map_err(|_| Error::Busy(Form::Enroll))?;

        self.ui.clear_status();
        self.set_enroll_state(EnrollState::Validating);

        match self.run_enroll(form).await {
            Ok(()) => {
                self.set_enroll_state(EnrollState::Stored);
                self.ui.reset_enroll_form();
                self.ui.set_status(STATUS_STORED, false);
                info!("Recovery token stored");
                Ok(())
            }
            Err(e) => {
                self.set_enroll_state(EnrollState::Failed);
                warn!("Enrollment failed ({}): {}", e.category(), e);
                self.ui.set_status(&e.to_string(), true);
                Err(e)
            }
        }
    }

    async fn run_enroll(&self, form: EnrollForm) -> Result<()> {
        form.pin.confirm(&form.confirm_pin)?;
        form.card.validate()?;

        self.set_enroll_state(EnrollState::Submitting);
        let token = self.backend().await?.create_k(&form.card, &form.pin).await?;
        self.store.set_token(&token).await?;
        Ok(())
    }

    /// Read the recovery form from the UI and submit it
    pub async fn submit_recover(&self) -> Result<RecoverOutcome> {
        let form = self.ui.recover_form();
        self.recover(form).await
    }

    /// Recover the enrolled card and show it masked, copying it first when
    /// the form asks for a copy.
    pub async fn recover(&self, form: RecoverForm) -> Result<RecoverOutcome> {
        let _gate = self
            .recover_gate
            .try_lock()
            .map_err(|_| Error::Busy(Form::Recover))?;

        self.ui.clear_status();
        self.set_recover_state(RecoverState::Validating);

        match self.run_recover(&form).await {
            Ok(Disclosure::Revealed(masked)) => {
                self.ui.reset_recover_form();
                self.ui.set_status(STATUS_REVEALED, false);
                Ok(self.reveal(masked, RecoverState::Revealed))
            }
            Ok(Disclosure::Copied(masked)) => {
                self.ui.reset_recover_form();
                self.ui.set_status(STATUS_COPIED, false);
                Ok(self.reveal(masked, RecoverState::CopiedAndRevealed))
            }
            Ok(Disclosure::CopyFailed { masked, error }) => {
                warn!("Clipboard copy failed: {}", error);
                self.ui.set_status(&error.to_string(), true);
                match self.copy_failure_policy {
                    CopyFailurePolicy::Abort => self.set_recover_state(RecoverState::Failed),
                    CopyFailurePolicy::RevealMasked => {
                        self.reveal(masked, RecoverState::Revealed);
                    }
                }
                Err(error.into())
            }
            Err(e) => {
                self.set_recover_state(RecoverState::Failed);
                warn!("Recovery failed ({}): {}", e.category(), e);
                self.ui.set_status(&e.to_string(), true);
                Err(e)
            }
        }
    }

    fn reveal(&self, masked: String, state: RecoverState) -> RecoverOutcome {
        self.ui.show_masked_card(&masked);
        self.set_recover_state(state);
        RecoverOutcome { state, masked }
    }

    async fn run_recover(&self, form: &RecoverForm) -> Result<Disclosure> {
        form.pin.check_length()?;
        let token = self.store.get_token().await?.ok_or(Error::NoStoredToken)?;

        self.set_recover_state(RecoverState::Submitting);
        let card = self.backend().await?.recover_card(&token, &form.pin).await?;
        let masked = self.presenter.mask(&card);

        match form.action {
            RecoverAction::Reveal => Ok(Disclosure::Revealed(masked)),
            RecoverAction::Copy => match self.presenter.copy_to_clipboard(&card).await {
                Ok(path) => {
                    debug!("Recovered card copied via {:?}", path);
                    Ok(Disclosure::Copied(masked))
                }
                Err(error) => Ok(Disclosure::CopyFailed { masked, error }),
            },
        }
    }

    /// Unlock an in-memory session with the stored token
    pub async fn open_session(&self, pin: &Pin, ttl: Option<Duration>) -> Result<UnlockSession> {
        let token = self.store.get_token().await?.ok_or(Error::NoStoredToken)?;
        let mut session = UnlockSession::new(ttl);
        session.unlock(&self.backend().await?, &token, pin).await?;
        Ok(session)
    }
}
