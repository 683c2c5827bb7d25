//! Registration use cases.
//!
//! This module exposes the registration orchestrator.

mod context;
mod countdown;
pub mod orchestrator;

pub use orchestrator::{RegistrationError, RegistrationOrchestrator};
