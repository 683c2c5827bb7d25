//! # Application Dependencies
//!
//! This module defines the dependency grouping for [`crate::AppContext`]
//! construction.
//!
//! **Note**: This is NOT a Builder pattern.
//! - No build steps
//! - No default values
//! - Just parameter grouping

use std::sync::Arc;

use qv_core::ports::*;

/// Application dependency grouping (non-Builder, just parameter grouping)
///
/// All dependencies are required - no defaults, no optional fields.
#[derive(Clone)]
pub struct AppDeps {
    // Backends
    pub auth: Arc<dyn AuthPort>,
    pub catalog: Arc<dyn BusinessCatalogPort>,

    // Presentation
    pub navigation: Arc<dyn NavigationPort>,
    pub alerts: Arc<dyn AlertPort>,

    // Storage
    pub preferences: Arc<dyn PreferenceStorePort>,

    // System
    pub clock: Arc<dyn ClockPort>,
    pub random: Arc<dyn RandomPort>,
}
