//! Registration state machine.
//!
//! Defines a pure state transition function for the registration flow.
//! Side effects (sending codes, calling the auth backend, navigation,
//! alerts) are returned as actions for the orchestrator to execute.

use chrono::NaiveDate;

use super::draft::DraftUpdate;
use super::flow::{RegistrationFlow, RegistrationStep, Retreat};
use crate::auth::{AuthError, AuthSession, SignupRequest};

/// Registration flow state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationState {
    pub flow: RegistrationFlow,
    /// A collaborator call (send code or signup) is in flight.
    pub submitting: bool,
    /// Signup succeeded; the flow accepts no further events.
    pub completed: bool,
}

/// Events that drive the registration flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationEvent {
    /// Form field edited.
    Update(DraftUpdate),
    /// User asks for a verification code.
    RequestCode,
    /// Send call resolved (network).
    CodeSent,
    /// Resend call resolved (network).
    CodeResent,
    /// First send failed (network).
    CodeSendFailed { error: AuthError },
    /// Resend failed (network).
    CodeResendFailed { error: AuthError },
    /// A code cell changed.
    EnterDigit { index: usize, value: String },
    /// User taps "Resend Code".
    ResendCode,
    /// One second of resend cooldown elapsed.
    ResendTick,
    /// User taps "Change Phone Number".
    ChangeNumber,
    /// User taps the step's continue/verify button.
    Continue,
    /// Navigate back.
    Back,
    /// User taps "Create Account".
    Submit,
    /// Signup succeeded (network).
    SignupSucceeded { session: AuthSession },
    /// Signup failed (network).
    SignupFailed { error: AuthError },
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationAction {
    /// Send a verification code to the given phone number.
    SendCode { phone_number: String, resend: bool },
    /// Start (or restart) the one-second resend countdown.
    StartResendCountdown,
    /// Stop the resend countdown.
    StopResendCountdown,
    /// Move input focus to a code cell.
    FocusCodeCell { index: usize },
    /// Call the auth backend's signup.
    Signup { request: SignupRequest },
    /// Persist the new session.
    EstablishSession { session: AuthSession },
    /// Replace the navigation stack with the authenticated area.
    EnterAuthenticatedArea,
    /// Leave the registration screen.
    ExitFlow,
    /// Blocking alert.
    ShowAlert { title: String, message: String },
}

impl RegistrationAction {
    fn alert(title: impl Into<String>, message: impl Into<String>) -> Self {
        RegistrationAction::ShowAlert {
            title: title.into(),
            message: message.into(),
        }
    }
}

const SIGNUP_FAILED_FALLBACK: &str = "Account creation failed";
const SEND_CODE_FAILED_FALLBACK: &str = "Could not send verification code";

/// Pure registration state machine.
pub struct RegistrationStateMachine;

impl RegistrationStateMachine {
    pub fn transition(
        mut state: RegistrationState,
        event: RegistrationEvent,
        today: NaiveDate,
    ) -> (RegistrationState, Vec<RegistrationAction>) {
        if state.completed {
            #[cfg(feature = "tracing")]
            tracing::debug!(?event, "registration already completed, event ignored");
            return (state, Vec::new());
        }

        let actions = match event {
            RegistrationEvent::Update(update) => {
                state.flow.update(update, today);
                Vec::new()
            }
            RegistrationEvent::RequestCode => {
                let awaiting_send = state
                    .flow
                    .verification()
                    .is_some_and(|v| !v.is_awaiting_entry());
                if state.submitting || !awaiting_send {
                    Vec::new()
                } else {
                    match state.flow.validate_code_request() {
                        Err(err) => vec![RegistrationAction::alert(err.title(), err.to_string())],
                        Ok(()) => {
                            state.submitting = true;
                            vec![RegistrationAction::SendCode {
                                phone_number: state.flow.draft().full_phone_number(),
                                resend: false,
                            }]
                        }
                    }
                }
            }
            RegistrationEvent::CodeSent => {
                state.submitting = false;
                state.flow.code_sent();
                vec![
                    RegistrationAction::alert(
                        "Code Sent!",
                        format!(
                            "We've sent a 4-digit verification code to {}",
                            state.flow.draft().full_phone_number()
                        ),
                    ),
                    RegistrationAction::StartResendCountdown,
                    RegistrationAction::FocusCodeCell { index: 0 },
                ]
            }
            RegistrationEvent::CodeResent => {
                state.submitting = false;
                vec![RegistrationAction::alert("Success", "Verification code sent!")]
            }
            RegistrationEvent::CodeResendFailed { error } => {
                state.submitting = false;
                state.flow.clear_resend_cooldown();
                vec![
                    RegistrationAction::StopResendCountdown,
                    RegistrationAction::alert(
                        "Error",
                        error.user_message(SEND_CODE_FAILED_FALLBACK),
                    ),
                ]
            }
            RegistrationEvent::CodeSendFailed { error } => {
                state.submitting = false;
                vec![RegistrationAction::alert(
                    "Error",
                    error.user_message(SEND_CODE_FAILED_FALLBACK),
                )]
            }
            RegistrationEvent::EnterDigit { index, value } => {
                match state.flow.enter_digit(index, &value) {
                    Some(next) => vec![RegistrationAction::FocusCodeCell { index: next }],
                    None => Vec::new(),
                }
            }
            RegistrationEvent::ResendCode => {
                if !state.submitting && state.flow.resend() {
                    // The cooldown runs from the tap, not from the send's completion.
                    state.submitting = true;
                    vec![
                        RegistrationAction::StartResendCountdown,
                        RegistrationAction::SendCode {
                            phone_number: state.flow.draft().full_phone_number(),
                            resend: true,
                        },
                    ]
                } else {
                    Vec::new()
                }
            }
            RegistrationEvent::ResendTick => {
                if state.flow.tick() == 0 {
                    vec![RegistrationAction::StopResendCountdown]
                } else {
                    Vec::new()
                }
            }
            RegistrationEvent::ChangeNumber => {
                if state.submitting {
                    Vec::new()
                } else {
                    state.flow.change_number();
                    vec![RegistrationAction::StopResendCountdown]
                }
            }
            RegistrationEvent::Continue => {
                if state.submitting {
                    Vec::new()
                } else {
                    match state.flow.validate_current_step(today) {
                        Err(err) => vec![RegistrationAction::alert(err.title(), err.to_string())],
                        Ok(()) => {
                            let leaving_identity = matches!(
                                state.flow.step(),
                                RegistrationStep::Identity { .. }
                            );
                            if state.flow.advance(today) && leaving_identity {
                                vec![RegistrationAction::StopResendCountdown]
                            } else {
                                Vec::new()
                            }
                        }
                    }
                }
            }
            RegistrationEvent::Back => {
                if state.submitting {
                    Vec::new()
                } else {
                    match state.flow.retreat() {
                        Retreat::ExitFlow => vec![
                            RegistrationAction::StopResendCountdown,
                            RegistrationAction::ExitFlow,
                        ],
                        Retreat::Moved { .. } => Vec::new(),
                    }
                }
            }
            RegistrationEvent::Submit => {
                let on_credentials =
                    matches!(state.flow.step(), RegistrationStep::Credentials);
                if state.submitting || !on_credentials {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        submitting = state.submitting,
                        step = state.flow.step_number(),
                        "submit ignored"
                    );
                    Vec::new()
                } else {
                    match state.flow.submission(today) {
                        Err(err) => vec![RegistrationAction::alert(err.title(), err.to_string())],
                        Ok(request) => {
                            state.submitting = true;
                            vec![RegistrationAction::Signup { request }]
                        }
                    }
                }
            }
            RegistrationEvent::SignupSucceeded { session } => {
                state.submitting = false;
                state.completed = true;
                vec![
                    RegistrationAction::EstablishSession { session },
                    RegistrationAction::EnterAuthenticatedArea,
                ]
            }
            RegistrationEvent::SignupFailed { error } => {
                state.submitting = false;
                vec![RegistrationAction::alert(
                    "Error",
                    error.user_message(SIGNUP_FAILED_FALLBACK),
                )]
            }
        };

        (state, actions)
    }
}
