//! QVuew Application Orchestration Layer
//!
//! This crate contains the account use cases and the runtime orchestration
//! around the pure state machines in `qv-core`.

mod context;
pub mod deps;
pub mod usecases;

pub use context::{AppContext, AppStartup};
pub use deps::AppDeps;
pub use usecases::{
    ChangePassword, ChangePasswordOutcome, ExploreService, LoginOutcome, LoginUser,
    PasswordResetOrchestrator, QueueService, QueueServiceError, RegistrationOrchestrator,
    SessionService, ThemeService,
};
