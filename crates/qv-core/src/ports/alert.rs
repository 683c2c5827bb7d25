use async_trait::async_trait;

/// Blocking user-facing dialog with a title and a message.
#[async_trait]
pub trait AlertPort: Send + Sync {
    async fn show_alert(&self, title: &str, message: &str) -> anyhow::Result<()>;
}
