use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::models::ratemodel::RateCard;
use crate::models::servicemodel::ServiceType;
use crate::utils::money;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpsertRateCardDto {
    pub service_type: ServiceType,

    #[validate(range(min = 0.0, message = "Rate per hectare must be non-negative"))]
    pub rate_per_ha: f64,

    #[validate(range(min = 0.0, message = "Minimum charge must be non-negative"))]
    pub min_charge: f64,

    #[validate(range(min = 0.0, message = "Fixed travel cost must be non-negative"))]
    pub travel_fixed: f64,

    #[validate(range(min = 0.0, message = "Travel rate must be non-negative"))]
    pub travel_rate_per_km: f64,

    #[serde(default)]
    pub seasonal_multipliers: HashMap<String, f64>,

    #[serde(default)]
    pub terrain_multipliers: HashMap<String, f64>,

    #[serde(default)]
    pub risk_multipliers: HashMap<String, f64>,

    #[validate(length(min = 3, max = 3, message = "Currency must be a 3-letter code"))]
    pub currency: String,
}

impl UpsertRateCardDto {
    /// Multiplier maps are free-keyed, so range checks live outside validator.
    pub fn validate_multipliers(&self) -> Result<(), String> {
        for (kind, map) in [
            ("seasonal", &self.seasonal_multipliers),
            ("terrain", &self.terrain_multipliers),
            ("risk", &self.risk_multipliers),
        ] {
            for (key, value) in map {
                if !value.is_finite() || *value < 0.0 {
                    return Err(format!("Invalid {} multiplier for key '{}'", kind, key));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RateCardResponseDto {
    pub id: Uuid,
    pub org_id: Uuid,
    pub service_type: ServiceType,
    pub rate_per_ha: f64,
    pub min_charge: f64,
    pub travel_fixed: f64,
    pub travel_rate_per_km: f64,
    pub seasonal_multipliers: HashMap<String, f64>,
    pub terrain_multipliers: HashMap<String, f64>,
    pub risk_multipliers: HashMap<String, f64>,
    pub currency: String,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<RateCard> for RateCardResponseDto {
    fn from(card: RateCard) -> Self {
        RateCardResponseDto {
            id: card.id,
            org_id: card.org_id,
            service_type: card.service_type,
            rate_per_ha: money::to_f64(&card.rate_per_ha),
            min_charge: money::to_f64(&card.min_charge),
            travel_fixed: money::to_f64(&card.travel_fixed),
            travel_rate_per_km: money::to_f64(&card.travel_rate_per_km),
            seasonal_multipliers: card.seasonal_multipliers.0,
            terrain_multipliers: card.terrain_multipliers.0,
            risk_multipliers: card.risk_multipliers.0,
            currency: card.currency,
            active: card.active.unwrap_or(true),
            created_at: card.created_at,
            updated_at: card.updated_at,
        }
    }
}
