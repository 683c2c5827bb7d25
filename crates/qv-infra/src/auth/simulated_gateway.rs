//! In-process stand-in for the auth backend.
//!
//! Validates each request the way the backend schema does, waits for the
//! configured latency and answers with a freshly minted session. Schema
//! failures come back as [`AuthError::Rejected`] with the first problem's
//! message, before any waiting.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use qv_core::auth::{AuthError, AuthSession, Credentials, PasswordResetRequest, SignupRequest, User};
use qv_core::config::AuthDelays;
use qv_core::ids::{AuthToken, UserId};
use qv_core::ports::{AuthPort, ClockPort};
use qv_core::validation::{
    validate_email, validate_phone_number, PasswordChecks, PasswordRule, MIN_NAME_LEN,
    MIN_PASSWORD_LEN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulatedDelays {
    pub send_code: Duration,
    pub login: Duration,
    pub signup: Duration,
    pub reset_password: Duration,
}

impl From<AuthDelays> for SimulatedDelays {
    fn from(delays: AuthDelays) -> Self {
        Self {
            send_code: Duration::from_millis(delays.send_code_ms),
            login: Duration::from_millis(delays.login_ms),
            signup: Duration::from_millis(delays.signup_ms),
            reset_password: Duration::from_millis(delays.reset_password_ms),
        }
    }
}

pub struct SimulatedAuthGateway {
    delays: SimulatedDelays,
    clock: Arc<dyn ClockPort>,
}

impl SimulatedAuthGateway {
    pub fn new(delays: SimulatedDelays, clock: Arc<dyn ClockPort>) -> Self {
        Self { delays, clock }
    }

    /// Gateway that answers without waiting.
    pub fn instant(clock: Arc<dyn ClockPort>) -> Self {
        Self::new(SimulatedDelays::default(), clock)
    }
}

fn reject(message: &str) -> AuthError {
    AuthError::Rejected(message.to_string())
}

fn check_email(email: &str) -> Result<(), AuthError> {
    validate_email(email).map_err(|_| reject("Invalid email format"))
}

fn check_min_password_len(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(reject("Password must be at least 8 characters"));
    }
    Ok(())
}

fn check_name(name: &str, message: &str) -> Result<(), AuthError> {
    if name.chars().count() < MIN_NAME_LEN {
        return Err(reject(message));
    }
    Ok(())
}

fn check_signup(request: &SignupRequest) -> Result<(), AuthError> {
    check_name(
        &request.first_name,
        "First name must be at least 2 characters",
    )?;
    check_name(&request.last_name, "Last name must be at least 2 characters")?;
    validate_phone_number(&request.phone_number)
        .map_err(|_| reject("Phone number must be 10 digits"))?;
    check_email(&request.email)?;

    let checks = PasswordChecks::evaluate(&request.password);
    if let Some(rule) = checks.first_failure() {
        let message = match rule {
            PasswordRule::MinLength => "Password must be at least 8 characters",
            PasswordRule::Uppercase => "Password must contain uppercase letter",
            PasswordRule::Lowercase => "Password must contain lowercase letter",
            PasswordRule::Digit => "Password must contain a number",
            PasswordRule::SpecialChar => "Password must contain special character",
        };
        return Err(reject(message));
    }

    if !request.agree_to_terms {
        return Err(reject("You must agree to terms"));
    }
    if request.password != request.confirm_password {
        return Err(reject("Passwords don't match"));
    }
    Ok(())
}

#[async_trait]
impl AuthPort for SimulatedAuthGateway {
    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession, AuthError> {
        check_signup(request)?;
        tokio::time::sleep(self.delays.signup).await;

        let user = User {
            id: UserId::generate(),
            email: request.email.clone(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            phone_number: request.phone_number.clone(),
            created_at: self.clock.now(),
        };
        info!(user_id = %user.id, "simulated signup accepted");
        Ok(AuthSession {
            token: AuthToken::generate(),
            user,
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        check_email(&credentials.email)?;
        check_min_password_len(&credentials.password)?;
        tokio::time::sleep(self.delays.login).await;

        let user = User {
            id: UserId::from("user_123"),
            email: credentials.email.clone(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            phone_number: "1234567890".to_string(),
            created_at: self.clock.now(),
        };
        info!(user_id = %user.id, "simulated login accepted");
        Ok(AuthSession {
            token: AuthToken::generate(),
            user,
        })
    }

    async fn reset_password(&self, request: &PasswordResetRequest) -> Result<(), AuthError> {
        check_email(&request.email)?;
        check_min_password_len(&request.password)?;
        tokio::time::sleep(self.delays.reset_password).await;

        info!(email = %request.email, "simulated password reset accepted");
        Ok(())
    }

    async fn send_verification_code(&self, destination: &str) -> Result<(), AuthError> {
        if destination.trim().is_empty() {
            return Err(reject("Destination is required"));
        }
        tokio::time::sleep(self.delays.send_code).await;

        debug!(destination, "simulated verification code sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use chrono::NaiveDate;
    use qv_core::registration::{Gender, DEFAULT_COUNTRY_CODE};
    use qv_core::security::SecretString;

    fn clock() -> Arc<dyn ClockPort> {
        Arc::new(FixedClock::new(
            NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
        ))
    }

    fn delays() -> SimulatedDelays {
        SimulatedDelays::from(AuthDelays {
            send_code_ms: 1500,
            login_ms: 1500,
            signup_ms: 2000,
            reset_password_ms: 1500,
        })
    }

    fn signup_request() -> SignupRequest {
        SignupRequest {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            phone_number: "9876543210".into(),
            country_code: DEFAULT_COUNTRY_CODE.into(),
            email: "asha@example.com".into(),
            password: SecretString::new("Abcdef1!"),
            confirm_password: SecretString::new("Abcdef1!"),
            gender: Gender::Female,
            birthdate: NaiveDate::from_ymd_opt(1999, 3, 14).unwrap(),
            agree_to_terms: true,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn signup_waits_then_returns_session() {
        let gateway = SimulatedAuthGateway::new(delays(), clock());
        let started = tokio::time::Instant::now();

        let session = gateway.signup(&signup_request()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(2000));
        assert!(session.user.id.as_str().starts_with("user_"));
        assert!(session.token.as_str().starts_with("token_"));
        assert_eq!(session.user.first_name, "Asha");
        assert_eq!(session.user.created_at, clock().now());
    }

    #[tokio::test]
    async fn signup_rejects_short_name_first() {
        let gateway = SimulatedAuthGateway::instant(clock());
        let mut request = signup_request();
        request.first_name = "A".into();
        request.email = "broken".into();

        let err = gateway.signup(&request).await.unwrap_err();
        assert_eq!(
            err,
            AuthError::Rejected("First name must be at least 2 characters".into())
        );
    }

    #[tokio::test]
    async fn signup_rejects_mismatch_after_field_rules() {
        let gateway = SimulatedAuthGateway::instant(clock());
        let mut request = signup_request();
        request.confirm_password = SecretString::new("Abcdef1?");

        let err = gateway.signup(&request).await.unwrap_err();
        assert_eq!(err, AuthError::Rejected("Passwords don't match".into()));
    }

    #[tokio::test]
    async fn login_answers_with_demo_profile() {
        let gateway = SimulatedAuthGateway::instant(clock());
        let credentials = Credentials {
            email: "john@example.com".into(),
            password: SecretString::new("whatever1"),
        };

        let session = gateway.login(&credentials).await.unwrap();
        assert_eq!(session.user.id, UserId::from("user_123"));
        assert_eq!(session.user.first_name, "John");
        assert_eq!(session.user.last_name, "Doe");
    }

    #[tokio::test]
    async fn login_requires_email_format() {
        let gateway = SimulatedAuthGateway::instant(clock());
        let credentials = Credentials {
            email: "9876543210".into(),
            password: SecretString::new("whatever1"),
        };

        let err = gateway.login(&credentials).await.unwrap_err();
        assert_eq!(err.user_message("Please try again"), "Invalid email format");
    }

    #[tokio::test]
    async fn reset_password_checks_length() {
        let gateway = SimulatedAuthGateway::instant(clock());
        let request = PasswordResetRequest {
            email: "asha@example.com".into(),
            password: SecretString::new("short"),
        };

        let err = gateway.reset_password(&request).await.unwrap_err();
        assert_eq!(
            err,
            AuthError::Rejected("Password must be at least 8 characters".into())
        );
    }

    #[tokio::test]
    async fn send_code_requires_destination() {
        let gateway = SimulatedAuthGateway::instant(clock());
        assert!(gateway.send_verification_code("  ").await.is_err());
        assert!(gateway.send_verification_code("+91 9876543210").await.is_ok());
    }
}
