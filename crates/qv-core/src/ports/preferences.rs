//! Key-value preference storage port
//!
//! Small string values that must survive restarts: the theme and the
//! signed-in session. Implementations are provided by the infrastructure
//! layer (file-backed JSON, or in-memory for tests).

use async_trait::async_trait;

#[async_trait]
pub trait PreferenceStorePort: Send + Sync {
    /// Value stored under `key`, `None` when absent.
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Store `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> anyhow::Result<()>;

    /// Whether a value is stored under `key`.
    async fn contains(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}

#[cfg(test)]
mockall::mock! {
    pub PreferenceStore {}

    #[async_trait]
    impl PreferenceStorePort for PreferenceStore {
        async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
        async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
        async fn remove(&self, key: &str) -> anyhow::Result<()>;
    }
}
