//! Persisted auth session.
//!
//! The token and the user profile live under separate preference keys; a
//! session is only restored when both are present and the profile parses.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::RwLock;
use tracing::{info, warn};

use qv_core::auth::{AuthSession, User};
use qv_core::ids::AuthToken;
use qv_core::ports::PreferenceStorePort;
use qv_core::preferences::{AUTH_TOKEN_KEY, USER_DATA_KEY};

pub struct SessionService {
    store: Arc<dyn PreferenceStorePort>,
    current: RwLock<Option<AuthSession>>,
}

impl SessionService {
    pub fn new(store: Arc<dyn PreferenceStorePort>) -> Self {
        Self {
            store,
            current: RwLock::new(None),
        }
    }

    /// Loads the stored session, if any.
    ///
    /// Storage failures and unreadable profiles are logged and treated as
    /// signed out.
    pub async fn restore(&self) -> Option<AuthSession> {
        let restored = match self.read_stored().await {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "failed to restore auth session, treating as signed out");
                None
            }
        };

        if let Some(session) = &restored {
            info!(user_id = %session.user.id, "auth session restored");
        }
        *self.current.write().await = restored.clone();
        restored
    }

    async fn read_stored(&self) -> anyhow::Result<Option<AuthSession>> {
        let token = self.store.get(AUTH_TOKEN_KEY).await?;
        let user_data = self.store.get(USER_DATA_KEY).await?;

        let (Some(token), Some(user_data)) = (token, user_data) else {
            return Ok(None);
        };
        let user: User =
            serde_json::from_str(&user_data).context("stored user data is not valid JSON")?;

        Ok(Some(AuthSession {
            token: AuthToken::new(token),
            user,
        }))
    }

    /// Makes `session` current and persists it.
    ///
    /// The in-memory session is set even when persisting fails.
    pub async fn establish(&self, session: &AuthSession) -> anyhow::Result<()> {
        *self.current.write().await = Some(session.clone());

        let user_data =
            serde_json::to_string(&session.user).context("failed to serialize user data")?;
        self.store
            .set(AUTH_TOKEN_KEY, session.token.as_str())
            .await
            .context("failed to persist auth token")?;
        self.store
            .set(USER_DATA_KEY, &user_data)
            .await
            .context("failed to persist user data")?;

        info!(user_id = %session.user.id, "auth session established");
        Ok(())
    }

    /// Clears the session from memory and storage.
    pub async fn logout(&self) -> anyhow::Result<()> {
        let previous = self.current.write().await.take();

        let token_removed = self.store.remove(AUTH_TOKEN_KEY).await;
        let user_removed = self.store.remove(USER_DATA_KEY).await;
        token_removed.context("failed to remove auth token")?;
        user_removed.context("failed to remove user data")?;

        if let Some(session) = previous {
            info!(user_id = %session.user.id, "signed out");
        }
        Ok(())
    }

    pub async fn current(&self) -> Option<AuthSession> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }
}
