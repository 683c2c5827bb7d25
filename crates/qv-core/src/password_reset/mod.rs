//! Three-step password reset: email, emailed code, new password.

pub mod state_machine;

pub use state_machine::{
    PasswordResetAction, PasswordResetEvent, PasswordResetState, PasswordResetStateMachine,
    ResetStep,
};
