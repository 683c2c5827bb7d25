//! Multi-step account registration.
//!
//! Layered bottom-up: the 4-cell [`VerificationCode`] and [`ResendTimer`]
//! make up the [`VerificationFlow`] carried by the identity step, the
//! [`RegistrationDraft`] holds the form, [`RegistrationFlow`] sequences the
//! three steps and [`RegistrationStateMachine`] turns user and network
//! events into actions.

pub mod code;
pub mod draft;
pub mod flow;
pub mod resend;
pub mod state_machine;
pub mod verification;
pub mod view;

pub use code::{CodeInput, VerificationCode, CODE_LENGTH};
pub use draft::{DraftUpdate, Gender, RegistrationDraft, DEFAULT_COUNTRY_CODE};
pub use flow::{RegistrationFlow, RegistrationStep, Retreat, TOTAL_STEPS};
pub use resend::{ResendTimer, RESEND_COOLDOWN_SECS};
pub use state_machine::{
    RegistrationAction, RegistrationEvent, RegistrationState, RegistrationStateMachine,
};
pub use verification::VerificationFlow;
pub use view::RegistrationView;
