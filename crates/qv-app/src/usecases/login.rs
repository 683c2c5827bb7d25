use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, info_span, warn, Instrument};

use qv_core::auth::{AuthError, AuthSession, Credentials};
use qv_core::ports::{AlertPort, AuthPort, NavigationPort};
use qv_core::security::SecretString;
use qv_core::validation::{require, Field, ValidationError};

use super::session::SessionService;

const LOGIN_FAILED_TITLE: &str = "Login Failed";
const LOGIN_FAILED_FALLBACK: &str = "Please try again";

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("navigation failed: {0}")]
    Navigation(#[source] anyhow::Error),
    #[error("alert failed: {0}")]
    Alert(#[source] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Form errors to show inline; nothing was sent.
    InvalidFields(Vec<ValidationError>),
    SignedIn(AuthSession),
    /// The backend refused or failed; an alert was shown.
    Failed(AuthError),
    /// Another login attempt is still in flight.
    AlreadySubmitting,
}

/// Use case for signing in with email (or phone) and password.
pub struct LoginUser {
    auth: Arc<dyn AuthPort>,
    navigation: Arc<dyn NavigationPort>,
    alerts: Arc<dyn AlertPort>,
    session: Arc<SessionService>,
    submitting: AtomicBool,
}

impl LoginUser {
    pub fn new(
        auth: Arc<dyn AuthPort>,
        navigation: Arc<dyn NavigationPort>,
        alerts: Arc<dyn AlertPort>,
        session: Arc<SessionService>,
    ) -> Self {
        Self {
            auth,
            navigation,
            alerts,
            session,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub async fn execute(
        &self,
        email_or_phone: &str,
        password: SecretString,
    ) -> Result<LoginOutcome, LoginError> {
        let errors: Vec<ValidationError> = [
            require(Field::EmailOrPhone, email_or_phone),
            require(Field::Password, &password),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();
        if !errors.is_empty() {
            return Ok(LoginOutcome::InvalidFields(errors));
        }

        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(LoginOutcome::AlreadySubmitting);
        }

        let credentials = Credentials {
            email: email_or_phone.to_string(),
            password,
        };
        let span = info_span!("usecase.login_user.execute", email = %credentials.email);
        let result = self.sign_in(credentials).instrument(span).await;
        self.submitting.store(false, Ordering::Release);
        result
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<LoginOutcome, LoginError> {
        match self.auth.login(&credentials).await {
            Ok(session) => {
                info!(user_id = %session.user.id, "login succeeded");
                if let Err(err) = self.session.establish(&session).await {
                    error!(error = %err, "failed to persist login session");
                }
                self.navigation
                    .replace_with_authenticated_area()
                    .await
                    .map_err(LoginError::Navigation)?;
                Ok(LoginOutcome::SignedIn(session))
            }
            Err(error) => {
                warn!(error = %error, "login failed");
                self.alerts
                    .show_alert(
                        error.alert_title(LOGIN_FAILED_TITLE),
                        &error.user_message(LOGIN_FAILED_FALLBACK),
                    )
                    .await
                    .map_err(LoginError::Alert)?;
                Ok(LoginOutcome::Failed(error))
            }
        }
    }
}
