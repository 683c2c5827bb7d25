//! Auth backend port
//!
//! Every call resolves to either a value or an [`AuthError`]. A
//! [`AuthError::Rejected`] carries a message meant for the user; anything
//! else is reported as [`AuthError::Unexpected`].

use async_trait::async_trait;

use crate::auth::{AuthError, AuthSession, Credentials, PasswordResetRequest, SignupRequest};

#[async_trait]
pub trait AuthPort: Send + Sync {
    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession, AuthError>;

    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, AuthError>;

    async fn reset_password(&self, request: &PasswordResetRequest) -> Result<(), AuthError>;

    /// Send a one-time code to a phone number or email address.
    async fn send_verification_code(&self, destination: &str) -> Result<(), AuthError>;
}
