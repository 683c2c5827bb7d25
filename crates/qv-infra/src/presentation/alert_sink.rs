use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use qv_core::ports::AlertPort;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// Logs each alert and keeps the history for inspection.
#[derive(Default)]
pub struct TracingAlertSink {
    shown: Mutex<Vec<Alert>>,
}

impl TracingAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn shown(&self) -> Vec<Alert> {
        self.shown.lock().await.clone()
    }

    pub async fn last(&self) -> Option<Alert> {
        self.shown.lock().await.last().cloned()
    }
}

#[async_trait]
impl AlertPort for TracingAlertSink {
    async fn show_alert(&self, title: &str, message: &str) -> anyhow::Result<()> {
        info!(title, message, "alert");
        self.shown.lock().await.push(Alert {
            title: title.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}
