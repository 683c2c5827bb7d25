use qv_app::{AppContext, AppStartup};
use qv_core::config::AppConfig;
use qv_core::ports::NavigationPort;
use tracing::{info, info_span, Instrument};

use super::wiring::wire_dependencies;

/// Builds and initializes the application context.
///
/// When a stored session is restored the navigator is moved straight to
/// the authenticated area.
pub async fn start_app(config: &AppConfig) -> anyhow::Result<(AppContext, AppStartup)> {
    let deps = wire_dependencies(config)?;
    let navigation = deps.navigation.clone();
    let context = AppContext::new(deps);

    let startup = context.init().await;
    if startup.session.is_some() {
        navigation.replace_with_authenticated_area().await?;
    }

    info!(
        route = startup.initial_route.path(),
        theme = %startup.theme,
        "app started"
    );
    Ok((context, startup))
}

/// Runs the app until Ctrl-C, then shuts the context down.
pub async fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let span = info_span!("bootstrap.run_app");
    async {
        let (context, _startup) = start_app(&config).await?;

        tokio::signal::ctrl_c().await?;
        info!("shutdown requested");
        context.shutdown().await;
        Ok(())
    }
    .instrument(span)
    .await
}
