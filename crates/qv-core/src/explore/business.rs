use serde::{Deserialize, Serialize};

use crate::ids::{BusinessId, ServiceId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessService {
    pub id: ServiceId,
    pub name: String,
    pub price: f64,
    /// Minutes.
    pub duration: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: BusinessId,
    pub name: String,
    pub category: String,
    pub rating: f32,
    pub review_count: u32,
    #[serde(rename = "distance")]
    pub distance_km: f64,
    #[serde(default)]
    pub services: Vec<BusinessService>,
}

impl Business {
    pub fn service(&self, id: &ServiceId) -> Option<&BusinessService> {
        self.services.iter().find(|service| &service.id == id)
    }
}
