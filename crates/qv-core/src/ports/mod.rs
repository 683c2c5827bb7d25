//! Port interfaces for the application layer
//!
//! Ports are the contract between the use cases in `qv-app` and the
//! adapters in `qv-infra`. Everything that reaches outside the process goes
//! through one of these traits: the auth backend, the business catalog,
//! navigation, persistent storage, alerts, the wall clock and randomness.

mod alert;
pub mod auth;
mod catalog;
mod clock;
pub mod navigation;
mod preferences;
mod random;

pub use alert::AlertPort;
pub use auth::AuthPort;
pub use catalog::BusinessCatalogPort;
pub use clock::ClockPort;
pub use navigation::{NavigationPort, Route};
pub use preferences::PreferenceStorePort;
pub use random::RandomPort;
