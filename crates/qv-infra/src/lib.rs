pub mod auth;
pub mod catalog;
pub mod fs;
pub mod preferences;
pub mod presentation;
pub mod random;
pub mod time;

pub use auth::SimulatedAuthGateway;
pub use catalog::{FileBusinessCatalog, InMemoryBusinessCatalog};
pub use preferences::{FilePreferenceStore, InMemoryPreferenceStore};
pub use presentation::{RouteStackNavigator, TracingAlertSink};
pub use random::ThreadRandom;
pub use time::{FixedClock, SystemClock};
