use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::servicemodel::ServiceType;

/// Flight capability profile for a vendor/operator org: where it is based,
/// how far it will fly, and which services it can perform.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct OperatorProfile {
    pub id: Uuid,
    pub org_id: Uuid,
    pub display_name: String,
    pub service_types: Json<Vec<ServiceType>>,
    pub base_lat: f64,
    pub base_lon: f64,
    pub service_radius_km: f64,
    pub rating: Option<f32>,         // Database has DEFAULT 0.0, can be NULL
    pub completed_jobs: Option<i32>, // Database has DEFAULT 0, can be NULL
    pub is_available: Option<bool>,  // Database has DEFAULT TRUE, can be NULL
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
