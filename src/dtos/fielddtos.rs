use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::fieldmodel::SavedField;
use crate::utils::geo::Ring;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateFieldDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 100, message = "Crop must be at most 100 characters"))]
    pub crop: Option<String>,

    /// GeoJSON-style rings of [lon, lat] pairs; first ring is the outer
    /// boundary. Ring geometry is validated server-side.
    pub boundary: Vec<Ring>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FieldResponseDto {
    pub id: Uuid,
    pub org_id: Uuid,
    pub name: String,
    pub crop: Option<String>,
    pub boundary: Vec<Ring>,
    pub area_ha: f64,
    pub centroid_lat: f64,
    pub centroid_lon: f64,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<SavedField> for FieldResponseDto {
    fn from(field: SavedField) -> Self {
        FieldResponseDto {
            id: field.id,
            org_id: field.org_id,
            name: field.name,
            crop: field.crop,
            boundary: field.boundary.0,
            area_ha: field.area_ha,
            centroid_lat: field.centroid_lat,
            centroid_lon: field.centroid_lon,
            created_at: field.created_at,
        }
    }
}
