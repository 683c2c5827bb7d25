//! JSON-file business catalog
//!
//! The file holds a JSON array of businesses. It is read on every call so
//! edits show up without a restart.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use qv_core::explore::Business;
use qv_core::ports::BusinessCatalogPort;

pub struct FileBusinessCatalog {
    path: PathBuf,
}

impl FileBusinessCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BusinessCatalogPort for FileBusinessCatalog {
    async fn businesses(&self) -> Result<Vec<Business>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no catalog file");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read catalog failed: {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("parse catalog failed: {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_is_an_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let catalog = FileBusinessCatalog::new(dir.path().join("catalog.json"));

        assert!(catalog.businesses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_camel_case_businesses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{
                "id": "1",
                "name": "Glow & Glam Salon",
                "category": "Beauty & Wellness",
                "rating": 4.8,
                "reviewCount": 127,
                "distance": 0.8,
                "services": [
                    {"id": "s1", "name": "Haircut", "price": 500, "duration": 45, "description": "Cut and style"}
                ]
            }]"#,
        )
        .unwrap();

        let businesses = FileBusinessCatalog::new(&path).businesses().await.unwrap();

        assert_eq!(businesses.len(), 1);
        assert_eq!(businesses[0].review_count, 127);
        assert_eq!(businesses[0].distance_km, 0.8);
        assert_eq!(businesses[0].services[0].price, 500.0);
        assert_eq!(businesses[0].services[0].duration, 45);
    }

    #[tokio::test]
    async fn malformed_file_reports_its_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = FileBusinessCatalog::new(&path).businesses().await.unwrap_err();

        assert!(err.to_string().contains("parse catalog failed"));
    }
}
