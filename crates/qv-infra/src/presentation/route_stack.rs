use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, warn};

use qv_core::ports::{NavigationPort, Route};

/// Navigation stack kept in memory. The last route is the visible screen.
pub struct RouteStackNavigator {
    stack: Mutex<Vec<Route>>,
}

impl RouteStackNavigator {
    pub fn new(initial: Route) -> Self {
        Self {
            stack: Mutex::new(vec![initial]),
        }
    }

    pub async fn current(&self) -> Option<Route> {
        self.stack.lock().await.last().copied()
    }

    pub async fn stack(&self) -> Vec<Route> {
        self.stack.lock().await.clone()
    }
}

impl Default for RouteStackNavigator {
    fn default() -> Self {
        Self::new(Route::Splash)
    }
}

#[async_trait]
impl NavigationPort for RouteStackNavigator {
    async fn replace_with_authenticated_area(&self) -> anyhow::Result<()> {
        let mut stack = self.stack.lock().await;
        stack.clear();
        stack.push(Route::Home);
        info!(route = Route::Home.path(), "entered authenticated area");
        Ok(())
    }

    async fn go_back(&self) -> anyhow::Result<()> {
        let mut stack = self.stack.lock().await;
        if stack.len() > 1 {
            stack.pop();
            info!(route = ?stack.last().map(Route::path), "navigated back");
        } else {
            warn!("go_back at the root route ignored");
        }
        Ok(())
    }

    async fn push_route(&self, route: Route) -> anyhow::Result<()> {
        self.stack.lock().await.push(route);
        info!(route = route.path(), "pushed route");
        Ok(())
    }

    async fn replace_route(&self, route: Route) -> anyhow::Result<()> {
        let mut stack = self.stack.lock().await;
        stack.pop();
        stack.push(route);
        info!(route = route.path(), "replaced route");
        Ok(())
    }
}
