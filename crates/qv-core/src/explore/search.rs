use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Business;

/// Category entry that disables the category filter.
pub const ALL_SERVICES: &str = "All Services";

pub const SERVICE_CATEGORIES: [&str; 8] = [
    ALL_SERVICES,
    "Beauty & Wellness",
    "Restaurant",
    "Healthcare",
    "Retail",
    "Entertainment",
    "Automotive",
    "Professional Services",
];

pub const DEFAULT_MAX_DISTANCE_KM: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Nearest first.
    #[default]
    Distance,
    /// Best rated first.
    Rating,
    /// Most reviewed first.
    Popularity,
}

impl SortBy {
    fn compare(&self, a: &Business, b: &Business) -> Ordering {
        match self {
            SortBy::Distance => a.distance_km.total_cmp(&b.distance_km),
            SortBy::Rating => b.rating.total_cmp(&a.rating),
            SortBy::Popularity => b.review_count.cmp(&a.review_count),
        }
    }
}

/// Search text, category, distance cap and ordering for the explore list.
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreQuery {
    pub search: String,
    pub category: String,
    pub max_distance_km: f64,
    pub sort_by: SortBy,
}

impl Default for ExploreQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_SERVICES.to_string(),
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            sort_by: SortBy::default(),
        }
    }
}

impl ExploreQuery {
    /// Case-insensitive substring match on name or category, exact category
    /// match unless [`ALL_SERVICES`], and distance within the cap.
    pub fn matches(&self, business: &Business) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = business.name.to_lowercase().contains(&needle)
            || business.category.to_lowercase().contains(&needle);
        let matches_category = self.category == ALL_SERVICES || business.category == self.category;

        matches_search && matches_category && business.distance_km <= self.max_distance_km
    }

    /// Matching businesses in `sort_by` order. Ties keep catalog order.
    pub fn apply<'a>(&self, businesses: &'a [Business]) -> Vec<&'a Business> {
        let mut results: Vec<&Business> = businesses
            .iter()
            .filter(|business| self.matches(business))
            .collect();
        results.sort_by(|a, b| self.sort_by.compare(a, b));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::BusinessId;

    fn business(
        id: &str,
        name: &str,
        category: &str,
        rating: f32,
        reviews: u32,
        km: f64,
    ) -> Business {
        Business {
            id: BusinessId::from(id),
            name: name.to_string(),
            category: category.to_string(),
            rating,
            review_count: reviews,
            distance_km: km,
            services: Vec::new(),
        }
    }

    fn catalog() -> Vec<Business> {
        vec![
            business("1", "Glow & Glam Salon", "Beauty & Wellness", 4.8, 120, 2.5),
            business("2", "Spice Route", "Restaurant", 4.2, 340, 0.8),
            business("3", "City Care Clinic", "Healthcare", 4.9, 80, 5.0),
            business("4", "Quick Lube", "Automotive", 3.9, 40, 12.0),
            business("5", "Glam Studio", "Beauty & Wellness", 4.5, 200, 10.0),
        ]
    }

    fn ids(results: &[&Business]) -> Vec<String> {
        results.iter().map(|b| b.id.to_string()).collect()
    }

    #[test]
    fn default_query_sorts_by_distance_within_ten_km() {
        let catalog = catalog();
        let results = ExploreQuery::default().apply(&catalog);
        // 12 km is out, exactly 10 km is in
        assert_eq!(ids(&results), ["2", "1", "3", "5"]);
    }

    #[test]
    fn search_matches_name_or_category_ignoring_case() {
        let catalog = catalog();
        let query = ExploreQuery {
            search: "GLAM".into(),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&catalog)), ["1", "5"]);

        let query = ExploreQuery {
            search: "health".into(),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&catalog)), ["3"]);
    }

    #[test]
    fn category_filter_is_exact_unless_all_services() {
        let catalog = catalog();
        let query = ExploreQuery {
            category: "Beauty & Wellness".into(),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&catalog)), ["1", "5"]);

        let query = ExploreQuery {
            category: "beauty & wellness".into(),
            ..Default::default()
        };
        assert!(query.apply(&catalog).is_empty());
    }

    #[test]
    fn rating_and_popularity_sort_descending() {
        let catalog = catalog();
        let query = ExploreQuery {
            sort_by: SortBy::Rating,
            max_distance_km: 50.0,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&catalog)), ["3", "1", "5", "2", "4"]);

        let query = ExploreQuery {
            sort_by: SortBy::Popularity,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&catalog)), ["2", "5", "1", "3"]);
    }

    #[test]
    fn categories_start_with_all_services() {
        assert_eq!(SERVICE_CATEGORIES[0], ALL_SERVICES);
        assert_eq!(SERVICE_CATEGORIES.len(), 8);
    }
}
