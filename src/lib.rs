//! QVuew
//!
//! Account flows for the QVuew app: phone-verified registration, login,
//! password reset, session persistence and theme preference.

pub mod bootstrap;

pub use bootstrap::{load_config, resolve_config, run_app};
