use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::utils::geo::Ring;

/// A reusable field polygon saved by a buyer org. The boundary is stored as
/// GeoJSON-style rings ([lon, lat] pairs); the first ring is the outer
/// boundary, further rings are holes.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct SavedField {
    pub id: Uuid,
    pub org_id: Uuid,
    pub name: String,
    pub crop: Option<String>,
    pub boundary: Json<Vec<Ring>>,
    pub area_ha: f64,
    pub centroid_lat: f64,
    pub centroid_lon: f64,
    pub created_at: Option<DateTime<Utc>>, // Database has DEFAULT NOW(), can be NULL
    pub updated_at: Option<DateTime<Utc>>,
}
