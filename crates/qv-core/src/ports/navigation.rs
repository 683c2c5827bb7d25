use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Screens the account flows can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Splash,
    Login,
    Signup,
    ForgotPassword,
    /// The signed-in tab area.
    Home,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Splash => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::ForgotPassword => "/forgot-password",
            Route::Home => "/(tabs)",
        }
    }
}

/// Fire-and-forget navigation requests.
#[async_trait]
pub trait NavigationPort: Send + Sync {
    /// Clear the stack and show the signed-in area.
    async fn replace_with_authenticated_area(&self) -> anyhow::Result<()>;

    async fn go_back(&self) -> anyhow::Result<()>;

    async fn push_route(&self, route: Route) -> anyhow::Result<()>;

    async fn replace_route(&self, route: Route) -> anyhow::Result<()>;
}
