//! FingerPay enrollment and recovery workflows
//!
//! Composes validation, the backend client, the token store and the
//! presenter into the two user-initiated flows, reporting through an
//! injected UI port.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod session;
pub mod ui;
pub mod workflow;

pub use error::{Error, Form, Result};
pub use session::UnlockSession;
pub use ui::{EnrollForm, MockUi, RecoverAction, RecoverForm, UiPort};
pub use workflow::{
    CopyFailurePolicy, EnrollState, RecoverOutcome, RecoverState, Workflow, STATUS_COPIED,
    STATUS_REVEALED, STATUS_STORED,
};
