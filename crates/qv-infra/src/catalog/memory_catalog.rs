use async_trait::async_trait;
use tokio::sync::RwLock;

use qv_core::explore::Business;
use qv_core::ports::BusinessCatalogPort;

/// Fixed list of businesses held in memory.
#[derive(Default)]
pub struct InMemoryBusinessCatalog {
    businesses: RwLock<Vec<Business>>,
}

impl InMemoryBusinessCatalog {
    pub fn new(businesses: Vec<Business>) -> Self {
        Self {
            businesses: RwLock::new(businesses),
        }
    }

    pub async fn replace(&self, businesses: Vec<Business>) {
        *self.businesses.write().await = businesses;
    }
}

#[async_trait]
impl BusinessCatalogPort for InMemoryBusinessCatalog {
    async fn businesses(&self) -> anyhow::Result<Vec<Business>> {
        Ok(self.businesses.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qv_core::ids::BusinessId;

    fn business(id: &str) -> Business {
        Business {
            id: BusinessId::from(id),
            name: format!("Business {id}"),
            category: "Retail".into(),
            rating: 4.0,
            review_count: 10,
            distance_km: 1.0,
            services: Vec::new(),
        }
    }

    #[tokio::test]
    async fn lists_and_replaces_businesses() {
        let catalog = InMemoryBusinessCatalog::new(vec![business("1")]);
        assert_eq!(catalog.businesses().await.unwrap(), vec![business("1")]);

        catalog.replace(vec![business("2"), business("3")]).await;
        let ids: Vec<String> = catalog
            .businesses()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id.into_inner())
            .collect();
        assert_eq!(ids, ["2", "3"]);
    }

    #[tokio::test]
    async fn default_catalog_is_empty() {
        let catalog = InMemoryBusinessCatalog::default();
        assert!(catalog.businesses().await.unwrap().is_empty());
    }
}
