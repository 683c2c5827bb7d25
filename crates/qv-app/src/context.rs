//! Application-root context.
//!
//! Owns the session, theme, explore and queue services and the currently
//! open account flow. Created once by the bootstrap, initialized with [`AppContext::init`]
//! and torn down with [`AppContext::shutdown`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Mutex;
use tracing::{info, info_span, Instrument};

use qv_core::auth::AuthSession;
use qv_core::ports::Route;
use qv_core::preferences::Theme;

use crate::deps::AppDeps;
use crate::usecases::{
    ChangePassword, ExploreService, LoginUser, PasswordResetOrchestrator, QueueService,
    RegistrationOrchestrator, SessionService, ThemeService,
};

/// What the app knows once startup has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppStartup {
    pub theme: Theme,
    pub session: Option<AuthSession>,
    /// First screen: the signed-in area when a session was restored.
    pub initial_route: Route,
}

pub struct AppContext {
    deps: AppDeps,
    session: Arc<SessionService>,
    theme: Arc<ThemeService>,
    login: LoginUser,
    change_password: ChangePassword,
    explore: ExploreService,
    queue: QueueService,
    loading: AtomicBool,
    registration: Mutex<Option<Arc<RegistrationOrchestrator>>>,
    password_reset: Mutex<Option<Arc<PasswordResetOrchestrator>>>,
}

impl AppContext {
    pub fn new(deps: AppDeps) -> Self {
        let session = Arc::new(SessionService::new(deps.preferences.clone()));
        let theme = Arc::new(ThemeService::new(deps.preferences.clone()));
        let login = LoginUser::new(
            deps.auth.clone(),
            deps.navigation.clone(),
            deps.alerts.clone(),
            session.clone(),
        );
        let change_password = ChangePassword::new(deps.alerts.clone());
        let explore = ExploreService::new(deps.catalog.clone());
        let queue = QueueService::new(
            deps.catalog.clone(),
            deps.random.clone(),
            deps.clock.clone(),
        );

        Self {
            deps,
            session,
            theme,
            login,
            change_password,
            explore,
            queue,
            loading: AtomicBool::new(true),
            registration: Mutex::new(None),
            password_reset: Mutex::new(None),
        }
    }

    /// Restores the theme and the stored session.
    pub async fn init(&self) -> AppStartup {
        let span = info_span!("app_context.init");
        async {
            let theme = self.theme.load().await;
            let session = self.session.restore().await;
            let initial_route = if session.is_some() {
                Route::Home
            } else {
                Route::Splash
            };
            self.loading.store(false, Ordering::Release);

            info!(%theme, authenticated = session.is_some(), "app context initialized");
            AppStartup {
                theme,
                session,
                initial_route,
            }
        }
        .instrument(span)
        .await
    }

    /// True until [`AppContext::init`] has finished.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub fn session(&self) -> &Arc<SessionService> {
        &self.session
    }

    pub fn theme(&self) -> &Arc<ThemeService> {
        &self.theme
    }

    pub fn login(&self) -> &LoginUser {
        &self.login
    }

    pub fn change_password(&self) -> &ChangePassword {
        &self.change_password
    }

    pub fn explore(&self) -> &ExploreService {
        &self.explore
    }

    pub fn queue(&self) -> &QueueService {
        &self.queue
    }

    pub async fn open_login(&self) -> anyhow::Result<()> {
        self.deps.navigation.push_route(Route::Login).await
    }

    /// Opens the signup screen with a fresh registration flow, replacing
    /// any flow left open.
    pub async fn start_registration(&self) -> anyhow::Result<Arc<RegistrationOrchestrator>> {
        let orchestrator = Arc::new(RegistrationOrchestrator::new(
            self.deps.auth.clone(),
            self.deps.navigation.clone(),
            self.deps.alerts.clone(),
            self.deps.clock.clone(),
            self.session.clone(),
        ));

        let previous = self.registration.lock().await.replace(orchestrator.clone());
        if let Some(previous) = previous {
            previous.close().await;
        }

        self.deps
            .navigation
            .push_route(Route::Signup)
            .await
            .context("failed to open signup screen")?;
        Ok(orchestrator)
    }

    /// Drops the registration flow; its draft is discarded with it.
    pub async fn finish_registration(&self) {
        if let Some(orchestrator) = self.registration.lock().await.take() {
            orchestrator.close().await;
        }
    }

    pub async fn start_password_reset(&self) -> anyhow::Result<Arc<PasswordResetOrchestrator>> {
        let orchestrator = Arc::new(PasswordResetOrchestrator::new(
            self.deps.auth.clone(),
            self.deps.navigation.clone(),
            self.deps.alerts.clone(),
        ));
        *self.password_reset.lock().await = Some(orchestrator.clone());

        self.deps
            .navigation
            .push_route(Route::ForgotPassword)
            .await
            .context("failed to open password reset screen")?;
        Ok(orchestrator)
    }

    pub async fn finish_password_reset(&self) {
        self.password_reset.lock().await.take();
    }

    /// Signs out and returns to the login screen.
    pub async fn logout(&self) -> anyhow::Result<()> {
        self.session.logout().await?;
        self.deps
            .navigation
            .replace_route(Route::Login)
            .await
            .context("failed to show login after logout")
    }

    /// Closes any open flow and stops its background work.
    pub async fn shutdown(&self) {
        self.finish_registration().await;
        self.finish_password_reset().await;
        info!("app context shut down");
    }
}
