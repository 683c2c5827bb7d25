use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use qv_core::ports::PreferenceStorePort;
use qv_core::preferences::{Theme, THEME_KEY};

/// Light/dark preference, persisted under [`THEME_KEY`].
pub struct ThemeService {
    store: Arc<dyn PreferenceStorePort>,
    current: RwLock<Theme>,
}

impl ThemeService {
    pub fn new(store: Arc<dyn PreferenceStorePort>) -> Self {
        Self {
            store,
            current: RwLock::new(Theme::default()),
        }
    }

    /// Reads the saved theme. Missing, unknown or unreadable values keep the
    /// current theme.
    pub async fn load(&self) -> Theme {
        match self.store.get(THEME_KEY).await {
            Ok(Some(saved)) => match saved.parse::<Theme>() {
                Ok(theme) => {
                    *self.current.write().await = theme;
                }
                Err(err) => warn!(error = %err, "ignoring saved theme"),
            },
            Ok(None) => {}
            Err(err) => error!(error = %err, "error loading theme"),
        }
        *self.current.read().await
    }

    /// Flips the theme and persists it. The in-memory value flips even when
    /// saving fails.
    pub async fn toggle(&self) -> Theme {
        let next = {
            let mut current = self.current.write().await;
            *current = current.toggled();
            *current
        };

        match self.store.set(THEME_KEY, next.as_str()).await {
            Ok(()) => info!(theme = %next, "theme changed"),
            Err(err) => error!(error = %err, theme = %next, "error saving theme"),
        }
        next
    }

    pub async fn current(&self) -> Theme {
        *self.current.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Store {}

        #[async_trait::async_trait]
        impl PreferenceStorePort for Store {
            async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
            async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
            async fn remove(&self, key: &str) -> anyhow::Result<()>;
        }
    }

    #[tokio::test]
    async fn load_defaults_to_light_when_missing() {
        let mut store = MockStore::new();
        store.expect_get().with(eq(THEME_KEY)).returning(|_| Ok(None));

        let service = ThemeService::new(Arc::new(store));
        assert_eq!(service.load().await, Theme::Light);
    }

    #[tokio::test]
    async fn load_reads_dark() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some("dark".to_string())));

        let service = ThemeService::new(Arc::new(store));
        assert_eq!(service.load().await, Theme::Dark);
    }

    #[tokio::test]
    async fn toggle_persists_new_value() {
        let mut store = MockStore::new();
        store
            .expect_set()
            .withf(|key, value| key == THEME_KEY && value == "dark")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ThemeService::new(Arc::new(store));
        assert_eq!(service.toggle().await, Theme::Dark);
    }

    #[tokio::test]
    async fn toggle_flips_even_when_save_fails() {
        let mut store = MockStore::new();
        store
            .expect_set()
            .returning(|_, _| Err(anyhow::anyhow!("read-only")));

        let service = ThemeService::new(Arc::new(store));
        assert_eq!(service.toggle().await, Theme::Dark);
        assert_eq!(service.current().await, Theme::Dark);
    }
}
