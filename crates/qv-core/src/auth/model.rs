use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AuthToken, UserId};
use crate::registration::Gender;
use crate::security::SecretString;

/// Account profile returned by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

/// Token plus the profile it was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: AuthToken,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// Completed registration form handed to the auth backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub country_code: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub gender: Gender,
    pub birthdate: NaiveDate,
    pub agree_to_terms: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetRequest {
    pub email: String,
    pub password: SecretString,
}

/// Failure reported by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The backend answered and refused; the message is shown as-is.
    #[error("{0}")]
    Rejected(String),
    /// The call itself failed.
    #[error("unexpected auth failure: {0}")]
    Unexpected(String),
}

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

impl AuthError {
    /// Text for the alert body; `fallback` covers rejections without a message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AuthError::Rejected(message) if message.trim().is_empty() => fallback.to_string(),
            AuthError::Rejected(message) => message.clone(),
            AuthError::Unexpected(_) => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }

    /// Alert title paired with [`AuthError::user_message`].
    pub fn alert_title<'a>(&self, rejected_title: &'a str) -> &'a str {
        match self {
            AuthError::Rejected(_) => rejected_title,
            AuthError::Unexpected(_) => "Error",
        }
    }
}
