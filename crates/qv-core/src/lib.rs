//! # qv-core
//!
//! Core domain models and business logic for the QVuew account flows.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: validation, the registration and password-reset state
//! machines, the auth, preference, catalog and queue models, and the ports
//! adapters implement.

pub mod auth;
pub mod config;
pub mod explore;
pub mod ids;
pub mod password_reset;
pub mod ports;
pub mod preferences;
pub mod queue;
pub mod registration;
pub mod security;
pub mod validation;

// Re-export commonly used types at the crate root
pub use auth::{AuthError, AuthSession, Credentials, PasswordResetRequest, SignupRequest, User};
pub use config::AppConfig;
pub use explore::{Business, ExploreQuery};
pub use ids::{AuthToken, BusinessId, ServiceId, TicketId, UserId};
pub use preferences::Theme;
pub use queue::{ActiveQueues, QueueTicket};
pub use registration::{RegistrationFlow, RegistrationStep};
pub use security::SecretString;
pub use validation::ValidationError;
