//! File-backed preference store
//!
//! All preferences live in one JSON object file. Writes go through a
//! temporary file and a rename so a crash never leaves a half-written file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use qv_core::ports::PreferenceStorePort;

type Preferences = BTreeMap<String, String>;

pub struct FilePreferenceStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Preferences> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Preferences::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read preferences failed: {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(Preferences::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("parse preferences failed: {}", self.path.display()))
    }

    async fn atomic_write(&self, preferences: &Preferences) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create preferences dir failed: {}", dir.display()))?;
        }

        let content =
            serde_json::to_string_pretty(preferences).context("serialize preferences failed")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp preferences failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp preferences to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl PreferenceStorePort for FilePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut preferences = self.read_all().await?;
        preferences.insert(key.to_string(), value.to_string());
        self.atomic_write(&preferences).await?;
        debug!(key, "preference saved");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut preferences = self.read_all().await?;
        if preferences.remove(key).is_some() {
            self.atomic_write(&preferences).await?;
            debug!(key, "preference removed");
        }
        Ok(())
    }
}
