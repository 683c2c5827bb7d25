//! ID type wrappers for type safety.

mod id_macro;

use serde::{Deserialize, Serialize};

use id_macro::impl_id;

/// Account identifier handed out by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

/// Opaque bearer token for an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

/// Business listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessId(String);

/// Service offered by one business.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl_id!(UserId, AuthToken, BusinessId, ServiceId, TicketId);

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const USER_ID_SUFFIX_LEN: usize = 9;

/// Lowest `len` base-36 digits of `value`, least significant first.
fn base36(mut value: u128, len: usize) -> String {
    (0..len)
        .map(|_| {
            let digit = BASE36_DIGITS[(value % 36) as usize] as char;
            value /= 36;
            digit
        })
        .collect()
}

impl UserId {
    /// Random id in the backend's `user_<9 base-36 chars>` shape.
    pub fn generate() -> Self {
        let entropy = uuid::Uuid::new_v4().as_u128();
        Self(format!("user_{}", base36(entropy, USER_ID_SUFFIX_LEN)))
    }
}

impl AuthToken {
    pub fn generate() -> Self {
        Self(format!("token_{}", uuid::Uuid::new_v4().simple()))
    }
}

impl TicketId {
    /// `<join time in epoch millis>-<service id>`.
    pub fn for_service(joined_at: chrono::DateTime<chrono::Utc>, service: &ServiceId) -> Self {
        Self(format!("{}-{}", joined_at.timestamp_millis(), service))
    }
}
