//! Password reset use cases.

pub mod orchestrator;

pub use orchestrator::{PasswordResetError, PasswordResetOrchestrator};
