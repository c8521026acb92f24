use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::servicemodel::ServiceType;
use crate::utils::geo::Ring;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct QuoteRequestDto {
    pub vendor_org_id: Uuid,
    pub service_type: ServiceType,

    /// Either a direct area or a boundary ring set. When both are supplied
    /// the boundary wins and the area is recomputed from it.
    #[validate(range(min = 0.0001, message = "Area must be positive"))]
    pub area_ha: Option<f64>,
    pub boundary: Option<Vec<Ring>>,

    #[validate(range(min = 0.0, max = 20000.0, message = "Distance must be between 0 and 20000 km"))]
    #[serde(default)]
    pub distance_km: f64,

    pub season: Option<String>,
    pub terrain: Option<String>,
    pub risk: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CompareQuotesDto {
    pub service_type: ServiceType,

    #[validate(range(min = 0.0001, message = "Area must be positive"))]
    pub area_ha: Option<f64>,
    pub boundary: Option<Vec<Ring>>,

    #[validate(range(min = 0.0, max = 20000.0, message = "Distance must be between 0 and 20000 km"))]
    #[serde(default)]
    pub distance_km: f64,

    pub season: Option<String>,
    pub terrain: Option<String>,
    pub risk: Option<String>,
}

/// Full arithmetic breakdown of a quote so the storefront can show its work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteBreakdownDto {
    pub service_type: ServiceType,
    pub area_ha: f64,
    pub distance_km: f64,
    pub rate_per_ha: f64,
    pub base: f64,
    pub seasonal_multiplier: f64,
    pub terrain_multiplier: f64,
    pub risk_multiplier: f64,
    pub multiplied: f64,
    pub travel: f64,
    pub min_charge: f64,
    pub min_charge_applied: bool,
    pub total: f64,
    pub currency: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VendorQuoteDto {
    pub vendor_org_id: Uuid,
    pub quote: QuoteBreakdownDto,
}
