//! Account use cases.
//!
//! Multi-step flows (registration, password reset) are orchestrators over a
//! pure state machine from `qv-core`; single-shot actions (login, session,
//! theme, password change, explore, queues) are plain use case structs.

pub mod change_password;
pub mod explore;
pub mod login;
pub mod password_reset;
pub mod queue;
pub mod registration;
pub mod session;
pub mod theme;

pub use change_password::{ChangePassword, ChangePasswordOutcome};
pub use explore::ExploreService;
pub use login::{LoginError, LoginOutcome, LoginUser};
pub use password_reset::{PasswordResetError, PasswordResetOrchestrator};
pub use queue::{QueueService, QueueServiceError};
pub use registration::{RegistrationError, RegistrationOrchestrator};
pub use session::SessionService;
pub use theme::ThemeService;
