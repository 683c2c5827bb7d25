use async_trait::async_trait;

use crate::explore::Business;

/// Businesses a user can browse and queue at.
#[async_trait]
pub trait BusinessCatalogPort: Send + Sync {
    async fn businesses(&self) -> anyhow::Result<Vec<Business>>;
}
