//! # Dependency Injection
//!
//! Creates the infra adapters and groups them into [`AppDeps`]. This is the
//! only place that depends on `qv-infra` and `qv-app` together; it assembles
//! and never decides.

use std::sync::Arc;

use qv_app::AppDeps;
use qv_core::config::AppConfig;
use qv_core::ports::{BusinessCatalogPort, ClockPort, Route};
use qv_infra::auth::SimulatedDelays;
use qv_infra::{
    FileBusinessCatalog, FilePreferenceStore, InMemoryBusinessCatalog, RouteStackNavigator,
    SimulatedAuthGateway, SystemClock, ThreadRandom, TracingAlertSink,
};
use tracing::info;

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("preferences path is empty; resolve the config before wiring")]
    MissingPreferencesPath,
}

/// Builds every port implementation from a resolved config.
pub fn wire_dependencies(config: &AppConfig) -> WiringResult<AppDeps> {
    if config.preferences_path.as_os_str().is_empty() {
        return Err(WiringError::MissingPreferencesPath);
    }

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let delays = SimulatedDelays::from(config.auth);
    info!(
        preferences = %config.preferences_path.display(),
        catalog = %config.catalog_path.display(),
        ?delays,
        "wiring dependencies"
    );

    // No catalog file configured: nothing to explore or queue at.
    let catalog: Arc<dyn BusinessCatalogPort> = if config.catalog_path.as_os_str().is_empty() {
        Arc::new(InMemoryBusinessCatalog::default())
    } else {
        Arc::new(FileBusinessCatalog::new(config.catalog_path.clone()))
    };

    Ok(AppDeps {
        auth: Arc::new(SimulatedAuthGateway::new(delays, clock.clone())),
        catalog,
        navigation: Arc::new(RouteStackNavigator::new(Route::Splash)),
        alerts: Arc::new(TracingAlertSink::new()),
        preferences: Arc::new(FilePreferenceStore::new(config.preferences_path.clone())),
        clock,
        random: Arc::new(ThreadRandom),
    })
}
