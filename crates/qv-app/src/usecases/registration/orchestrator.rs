//! Registration orchestrator.
//!
//! This module coordinates the registration state machine and side effects.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, error, info, info_span, warn, Instrument};

use qv_core::{
    ports::{AlertPort, AuthPort, ClockPort, NavigationPort},
    registration::{
        DraftUpdate, RegistrationAction, RegistrationEvent, RegistrationState, RegistrationView,
    },
};

use super::context::RegistrationContext;
use super::countdown::ResendCountdown;
use crate::usecases::session::SessionService;

/// Errors produced by the registration orchestrator.
///
/// Validation problems and auth failures are not errors here: they are
/// shown to the user as alerts and the flow carries on.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("navigation failed: {0}")]
    Navigation(#[source] anyhow::Error),
    #[error("alert failed: {0}")]
    Alert(#[source] anyhow::Error),
}

/// Orchestrator that drives registration state and side effects.
pub struct RegistrationOrchestrator {
    context: Arc<RegistrationContext>,
    countdown: ResendCountdown,

    auth: Arc<dyn AuthPort>,
    navigation: Arc<dyn NavigationPort>,
    alerts: Arc<dyn AlertPort>,
    clock: Arc<dyn ClockPort>,
    session: Arc<SessionService>,
}

impl RegistrationOrchestrator {
    pub fn new(
        auth: Arc<dyn AuthPort>,
        navigation: Arc<dyn NavigationPort>,
        alerts: Arc<dyn AlertPort>,
        clock: Arc<dyn ClockPort>,
        session: Arc<SessionService>,
    ) -> Self {
        Self {
            context: Arc::new(RegistrationContext::default()),
            countdown: ResendCountdown::default(),
            auth,
            navigation,
            alerts,
            clock,
            session,
        }
    }

    pub async fn update(&self, update: DraftUpdate) -> Result<RegistrationView, RegistrationError> {
        self.dispatch(RegistrationEvent::Update(update)).await
    }

    pub async fn request_code(&self) -> Result<RegistrationView, RegistrationError> {
        self.dispatch(RegistrationEvent::RequestCode).await
    }

    pub async fn enter_digit(
        &self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<RegistrationView, RegistrationError> {
        let event = RegistrationEvent::EnterDigit {
            index,
            value: value.into(),
        };
        self.dispatch(event).await
    }

    pub async fn resend_code(&self) -> Result<RegistrationView, RegistrationError> {
        self.dispatch(RegistrationEvent::ResendCode).await
    }

    pub async fn change_number(&self) -> Result<RegistrationView, RegistrationError> {
        self.dispatch(RegistrationEvent::ChangeNumber).await
    }

    /// The step's primary button: verify on step 1, continue on step 2.
    pub async fn continue_step(&self) -> Result<RegistrationView, RegistrationError> {
        self.dispatch(RegistrationEvent::Continue).await
    }

    pub async fn back(&self) -> Result<RegistrationView, RegistrationError> {
        self.dispatch(RegistrationEvent::Back).await
    }

    pub async fn submit(&self) -> Result<RegistrationView, RegistrationError> {
        self.dispatch(RegistrationEvent::Submit).await
    }

    pub async fn view(&self) -> RegistrationView {
        self.context.view(self.clock.today()).await
    }

    pub async fn get_state(&self) -> RegistrationState {
        self.context.get_state().await
    }

    pub async fn focused_code_cell(&self) -> Option<usize> {
        self.context.focused_cell().await
    }

    pub async fn is_countdown_running(&self) -> bool {
        self.countdown.is_running().await
    }

    /// Stops background work. Called when the registration screen goes away.
    pub async fn close(&self) {
        self.countdown.stop().await;
        debug!("registration orchestrator closed");
    }

    /// Applies `event` and runs the resulting actions until no follow-up
    /// events remain.
    pub async fn dispatch(
        &self,
        event: RegistrationEvent,
    ) -> Result<RegistrationView, RegistrationError> {
        let span = info_span!("usecase.registration_orchestrator.dispatch", event = ?event);
        async {
            let mut pending = VecDeque::from([event]);

            while let Some(event) = pending.pop_front() {
                let actions = self.context.transition(event, self.clock.today()).await;
                for action in actions {
                    if let Some(follow_up) = self.execute_action(action).await? {
                        pending.push_back(follow_up);
                    }
                }
            }

            Ok(self.view().await)
        }
        .instrument(span)
        .await
    }

    async fn execute_action(
        &self,
        action: RegistrationAction,
    ) -> Result<Option<RegistrationEvent>, RegistrationError> {
        debug!(?action, "registration executing action");
        let follow_up = match action {
            RegistrationAction::SendCode {
                phone_number,
                resend,
            } => {
                let result = self.auth.send_verification_code(&phone_number).await;
                Some(match result {
                    Ok(()) if resend => RegistrationEvent::CodeResent,
                    Ok(()) => RegistrationEvent::CodeSent,
                    Err(error) if resend => {
                        warn!(error = %error, "resending verification code failed");
                        RegistrationEvent::CodeResendFailed { error }
                    }
                    Err(error) => {
                        warn!(error = %error, "sending verification code failed");
                        RegistrationEvent::CodeSendFailed { error }
                    }
                })
            }
            RegistrationAction::StartResendCountdown => {
                self.countdown
                    .start(self.context.clone(), self.clock.clone())
                    .await;
                None
            }
            RegistrationAction::StopResendCountdown => {
                self.countdown.stop().await;
                None
            }
            RegistrationAction::FocusCodeCell { index } => {
                self.context.set_focused_cell(Some(index)).await;
                None
            }
            RegistrationAction::Signup { request } => {
                info!(email = %request.email, "creating account");
                Some(match self.auth.signup(&request).await {
                    Ok(session) => RegistrationEvent::SignupSucceeded { session },
                    Err(error) => {
                        warn!(error = %error, "account creation failed");
                        RegistrationEvent::SignupFailed { error }
                    }
                })
            }
            RegistrationAction::EstablishSession { session } => {
                if let Err(err) = self.session.establish(&session).await {
                    error!(error = %err, "failed to persist new session");
                }
                None
            }
            RegistrationAction::EnterAuthenticatedArea => {
                self.countdown.stop().await;
                self.navigation
                    .replace_with_authenticated_area()
                    .await
                    .map_err(RegistrationError::Navigation)?;
                None
            }
            RegistrationAction::ExitFlow => {
                self.navigation
                    .go_back()
                    .await
                    .map_err(RegistrationError::Navigation)?;
                None
            }
            RegistrationAction::ShowAlert { title, message } => {
                self.alerts
                    .show_alert(&title, &message)
                    .await
                    .map_err(RegistrationError::Alert)?;
                None
            }
        };
        Ok(follow_up)
    }
}
