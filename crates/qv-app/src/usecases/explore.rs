use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use qv_core::explore::{Business, ExploreQuery, SortBy, ALL_SERVICES};
use qv_core::ports::BusinessCatalogPort;

/// Explore screen state: the current query over the business catalog.
pub struct ExploreService {
    catalog: Arc<dyn BusinessCatalogPort>,
    query: RwLock<ExploreQuery>,
}

impl ExploreService {
    pub fn new(catalog: Arc<dyn BusinessCatalogPort>) -> Self {
        Self {
            catalog,
            query: RwLock::new(ExploreQuery::default()),
        }
    }

    pub async fn query(&self) -> ExploreQuery {
        self.query.read().await.clone()
    }

    pub async fn set_search(&self, search: impl Into<String>) {
        self.query.write().await.search = search.into();
    }

    /// `None` or [`ALL_SERVICES`] clears the category filter.
    pub async fn set_category(&self, category: Option<&str>) {
        self.query.write().await.category = category.unwrap_or(ALL_SERVICES).to_string();
    }

    pub async fn set_max_distance(&self, km: f64) {
        self.query.write().await.max_distance_km = km;
    }

    pub async fn set_sort_by(&self, sort_by: SortBy) {
        self.query.write().await.sort_by = sort_by;
    }

    /// Catalog entries matching the current query, in its order.
    pub async fn results(&self) -> anyhow::Result<Vec<Business>> {
        let businesses = self.catalog.businesses().await?;
        let query = self.query().await;
        let results: Vec<Business> = query.apply(&businesses).into_iter().cloned().collect();
        debug!(
            search = %query.search,
            category = %query.category,
            sort_by = ?query.sort_by,
            total = businesses.len(),
            matched = results.len(),
            "explore results"
        );
        Ok(results)
    }
}
