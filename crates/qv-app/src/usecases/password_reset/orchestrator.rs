//! Password reset orchestrator.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use qv_core::{
    password_reset::{
        PasswordResetAction, PasswordResetEvent, PasswordResetState, PasswordResetStateMachine,
    },
    ports::{AlertPort, AuthPort, NavigationPort, Route},
    security::SecretString,
};

#[derive(Debug, thiserror::Error)]
pub enum PasswordResetError {
    #[error("navigation failed: {0}")]
    Navigation(#[source] anyhow::Error),
    #[error("alert failed: {0}")]
    Alert(#[source] anyhow::Error),
}

pub struct PasswordResetOrchestrator {
    state: Mutex<PasswordResetState>,
    focused_cell: Mutex<Option<usize>>,

    auth: Arc<dyn AuthPort>,
    navigation: Arc<dyn NavigationPort>,
    alerts: Arc<dyn AlertPort>,
}

impl PasswordResetOrchestrator {
    pub fn new(
        auth: Arc<dyn AuthPort>,
        navigation: Arc<dyn NavigationPort>,
        alerts: Arc<dyn AlertPort>,
    ) -> Self {
        Self {
            state: Mutex::new(PasswordResetState::default()),
            focused_cell: Mutex::new(None),
            auth,
            navigation,
            alerts,
        }
    }

    pub async fn set_email(
        &self,
        email: impl Into<String>,
    ) -> Result<PasswordResetState, PasswordResetError> {
        self.dispatch(PasswordResetEvent::EmailChanged(email.into()))
            .await
    }

    pub async fn set_password(
        &self,
        password: SecretString,
    ) -> Result<PasswordResetState, PasswordResetError> {
        self.dispatch(PasswordResetEvent::PasswordChanged(password))
            .await
    }

    pub async fn set_confirm_password(
        &self,
        confirm: SecretString,
    ) -> Result<PasswordResetState, PasswordResetError> {
        self.dispatch(PasswordResetEvent::ConfirmPasswordChanged(confirm))
            .await
    }

    pub async fn enter_digit(
        &self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<PasswordResetState, PasswordResetError> {
        let event = PasswordResetEvent::EnterDigit {
            index,
            value: value.into(),
        };
        self.dispatch(event).await
    }

    pub async fn send_code(&self) -> Result<PasswordResetState, PasswordResetError> {
        self.dispatch(PasswordResetEvent::SendCode).await
    }

    pub async fn verify_code(&self) -> Result<PasswordResetState, PasswordResetError> {
        self.dispatch(PasswordResetEvent::VerifyCode).await
    }

    pub async fn reset_password(&self) -> Result<PasswordResetState, PasswordResetError> {
        self.dispatch(PasswordResetEvent::ResetPassword).await
    }

    pub async fn back(&self) -> Result<PasswordResetState, PasswordResetError> {
        self.dispatch(PasswordResetEvent::Back).await
    }

    /// "Back to login" link, available on every step.
    pub async fn back_to_login(&self) -> Result<(), PasswordResetError> {
        self.navigation
            .replace_route(Route::Login)
            .await
            .map_err(PasswordResetError::Navigation)
    }

    pub async fn get_state(&self) -> PasswordResetState {
        self.state.lock().await.clone()
    }

    pub async fn focused_code_cell(&self) -> Option<usize> {
        *self.focused_cell.lock().await
    }

    pub async fn dispatch(
        &self,
        event: PasswordResetEvent,
    ) -> Result<PasswordResetState, PasswordResetError> {
        let span = info_span!("usecase.password_reset_orchestrator.dispatch", event = ?event);
        async {
            let mut pending = VecDeque::from([event]);

            while let Some(event) = pending.pop_front() {
                let actions = {
                    let mut state = self.state.lock().await;
                    let from = state.step;
                    let (next, actions) =
                        PasswordResetStateMachine::transition(state.clone(), event);
                    if from != next.step {
                        info!(from = ?from, to = ?next.step, "password reset step changed");
                    }
                    *state = next;
                    actions
                };

                for action in actions {
                    if let Some(follow_up) = self.execute_action(action).await? {
                        pending.push_back(follow_up);
                    }
                }
            }

            Ok(self.get_state().await)
        }
        .instrument(span)
        .await
    }

    async fn execute_action(
        &self,
        action: PasswordResetAction,
    ) -> Result<Option<PasswordResetEvent>, PasswordResetError> {
        debug!(?action, "password reset executing action");
        let follow_up = match action {
            PasswordResetAction::SendResetCode { email } => {
                Some(match self.auth.send_verification_code(&email).await {
                    Ok(()) => PasswordResetEvent::CodeSent,
                    Err(error) => {
                        warn!(error = %error, "sending reset code failed");
                        PasswordResetEvent::CodeSendFailed { error }
                    }
                })
            }
            PasswordResetAction::FocusCodeCell { index } => {
                *self.focused_cell.lock().await = Some(index);
                None
            }
            PasswordResetAction::ResetPassword { request } => {
                Some(match self.auth.reset_password(&request).await {
                    Ok(()) => {
                        info!(email = %request.email, "password reset");
                        PasswordResetEvent::ResetSucceeded
                    }
                    Err(error) => {
                        warn!(error = %error, "password reset failed");
                        PasswordResetEvent::ResetFailed { error }
                    }
                })
            }
            PasswordResetAction::ShowAlert { title, message } => {
                self.alerts
                    .show_alert(&title, &message)
                    .await
                    .map_err(PasswordResetError::Alert)?;
                None
            }
            PasswordResetAction::ReturnToLogin => {
                self.navigation
                    .replace_route(Route::Login)
                    .await
                    .map_err(PasswordResetError::Navigation)?;
                None
            }
            PasswordResetAction::ExitFlow => {
                self.navigation
                    .go_back()
                    .await
                    .map_err(PasswordResetError::Navigation)?;
                None
            }
        };
        Ok(follow_up)
    }
}
