//! Password reset state machine.
//!
//! Same shape as the registration machine: a pure transition returning
//! actions. Field problems are kept on the state as inline errors; network
//! outcomes surface as alerts.

use serde::{Deserialize, Serialize};

use crate::auth::{AuthError, PasswordResetRequest};
use crate::registration::{CodeInput, VerificationCode, CODE_LENGTH};
use crate::security::SecretString;
use crate::validation::{
    require, validate_code_complete, validate_email, validate_password,
    validate_password_confirmation, Field, ValidationError,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetStep {
    #[default]
    Email,
    Code,
    NewPassword,
}

impl ResetStep {
    pub fn number(&self) -> u8 {
        match self {
            ResetStep::Email => 1,
            ResetStep::Code => 2,
            ResetStep::NewPassword => 3,
        }
    }

    fn previous(&self) -> Option<ResetStep> {
        match self {
            ResetStep::Email => None,
            ResetStep::Code => Some(ResetStep::Email),
            ResetStep::NewPassword => Some(ResetStep::Code),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordResetState {
    pub step: ResetStep,
    pub email: String,
    pub code: VerificationCode,
    pub password: SecretString,
    pub confirm_password: SecretString,
    /// Inline field errors from the last attempt, cleared as fields change.
    pub errors: Vec<ValidationError>,
    pub submitting: bool,
    pub completed: bool,
}

impl PasswordResetState {
    pub fn error_for(&self, field: Field) -> Option<&ValidationError> {
        self.errors.iter().find(|err| err.field() == Some(field))
    }

    fn clear_errors_for(&mut self, field: Field) {
        self.errors.retain(|err| err.field() != Some(field));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordResetEvent {
    EmailChanged(String),
    PasswordChanged(SecretString),
    ConfirmPasswordChanged(SecretString),
    EnterDigit { index: usize, value: String },
    /// Step 1 submit.
    SendCode,
    CodeSent,
    CodeSendFailed { error: AuthError },
    /// Step 2 submit.
    VerifyCode,
    /// Step 3 submit.
    ResetPassword,
    ResetSucceeded,
    ResetFailed { error: AuthError },
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordResetAction {
    SendResetCode { email: String },
    FocusCodeCell { index: usize },
    ResetPassword { request: PasswordResetRequest },
    ShowAlert { title: String, message: String },
    /// Replace the current route with the login screen.
    ReturnToLogin,
    ExitFlow,
}

impl PasswordResetAction {
    fn alert(title: impl Into<String>, message: impl Into<String>) -> Self {
        PasswordResetAction::ShowAlert {
            title: title.into(),
            message: message.into(),
        }
    }
}

const RESET_FAILED_FALLBACK: &str = "Password reset failed";
const SEND_CODE_FAILED_FALLBACK: &str = "Could not send verification code";

pub struct PasswordResetStateMachine;

impl PasswordResetStateMachine {
    pub fn transition(
        mut state: PasswordResetState,
        event: PasswordResetEvent,
    ) -> (PasswordResetState, Vec<PasswordResetAction>) {
        if state.completed {
            #[cfg(feature = "tracing")]
            tracing::debug!(?event, "password reset already completed, event ignored");
            return (state, Vec::new());
        }

        let actions = match event {
            PasswordResetEvent::EmailChanged(email) => {
                state.email = email;
                state.clear_errors_for(Field::Email);
                Vec::new()
            }
            PasswordResetEvent::PasswordChanged(password) => {
                state.password = password;
                state.clear_errors_for(Field::Password);
                Vec::new()
            }
            PasswordResetEvent::ConfirmPasswordChanged(confirm) => {
                state.confirm_password = confirm;
                state.clear_errors_for(Field::ConfirmPassword);
                Vec::new()
            }
            PasswordResetEvent::EnterDigit { index, value } => {
                if state.step != ResetStep::Code {
                    Vec::new()
                } else {
                    match state.code.set(index, &value) {
                        CodeInput::Set if index + 1 < CODE_LENGTH => {
                            vec![PasswordResetAction::FocusCodeCell { index: index + 1 }]
                        }
                        _ => Vec::new(),
                    }
                }
            }
            PasswordResetEvent::SendCode => {
                if state.submitting || state.step != ResetStep::Email {
                    Vec::new()
                } else {
                    let checked = require(Field::Email, &state.email)
                        .and_then(|()| validate_email(&state.email));
                    match checked {
                        Err(err) => {
                            state.errors = vec![err];
                            Vec::new()
                        }
                        Ok(()) => {
                            state.errors.clear();
                            state.submitting = true;
                            vec![PasswordResetAction::SendResetCode {
                                email: state.email.clone(),
                            }]
                        }
                    }
                }
            }
            PasswordResetEvent::CodeSent => {
                state.submitting = false;
                state.step = ResetStep::Code;
                vec![
                    PasswordResetAction::alert(
                        "Success",
                        format!("Verification code sent to {}", state.email),
                    ),
                    PasswordResetAction::FocusCodeCell { index: 0 },
                ]
            }
            PasswordResetEvent::CodeSendFailed { error } => {
                state.submitting = false;
                vec![PasswordResetAction::alert(
                    "Error",
                    error.user_message(SEND_CODE_FAILED_FALLBACK),
                )]
            }
            PasswordResetEvent::VerifyCode => {
                if state.step != ResetStep::Code {
                    Vec::new()
                } else {
                    match validate_code_complete(&state.code) {
                        Err(err) => vec![PasswordResetAction::alert(err.title(), err.to_string())],
                        Ok(()) => {
                            state.step = ResetStep::NewPassword;
                            Vec::new()
                        }
                    }
                }
            }
            PasswordResetEvent::ResetPassword => {
                if state.submitting || state.step != ResetStep::NewPassword {
                    Vec::new()
                } else {
                    let errors = new_password_errors(&state.password, &state.confirm_password);
                    if errors.is_empty() {
                        state.errors.clear();
                        state.submitting = true;
                        vec![PasswordResetAction::ResetPassword {
                            request: PasswordResetRequest {
                                email: state.email.clone(),
                                password: state.password.clone(),
                            },
                        }]
                    } else {
                        state.errors = errors;
                        Vec::new()
                    }
                }
            }
            PasswordResetEvent::ResetSucceeded => {
                state.submitting = false;
                state.completed = true;
                vec![
                    PasswordResetAction::alert("Success", "Password reset successfully!"),
                    PasswordResetAction::ReturnToLogin,
                ]
            }
            PasswordResetEvent::ResetFailed { error } => {
                state.submitting = false;
                vec![PasswordResetAction::alert(
                    "Error",
                    error.user_message(RESET_FAILED_FALLBACK),
                )]
            }
            PasswordResetEvent::Back => {
                if state.submitting {
                    Vec::new()
                } else {
                    match state.step.previous() {
                        Some(previous) => {
                            state.step = previous;
                            state.errors.clear();
                            Vec::new()
                        }
                        None => vec![PasswordResetAction::ExitFlow],
                    }
                }
            }
        };

        (state, actions)
    }
}

/// Both fields are checked so the form can show every problem at once.
fn new_password_errors(
    password: &SecretString,
    confirm_password: &SecretString,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let password_check = require(Field::Password, password)
        .and_then(|()| validate_password(password).map(|_| ()));
    if let Err(err) = password_check {
        errors.push(err);
    }
    if let Err(err) = validate_password_confirmation(password, confirm_password) {
        errors.push(err);
    }

    errors
}
