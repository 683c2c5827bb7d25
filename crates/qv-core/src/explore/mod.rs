//! Business catalog model and the explore screen's search.

mod business;
mod search;

pub use business::{Business, BusinessService};
pub use search::{
    ExploreQuery, SortBy, ALL_SERVICES, DEFAULT_MAX_DISTANCE_KM, SERVICE_CATEGORIES,
};
