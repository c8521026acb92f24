use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::{BigDecimal, Json};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::servicemodel::ServiceType;

/// Per-org, per-service pricing configuration. The multiplier maps key plain
/// strings ("spring", "hilly", "near_water", ...) to factors applied on top of
/// the base area price.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct RateCard {
    pub id: Uuid,
    pub org_id: Uuid,
    pub service_type: ServiceType,
    pub rate_per_ha: BigDecimal,
    pub min_charge: BigDecimal,
    pub travel_fixed: BigDecimal,
    pub travel_rate_per_km: BigDecimal,
    pub seasonal_multipliers: Json<HashMap<String, f64>>,
    pub terrain_multipliers: Json<HashMap<String, f64>>,
    pub risk_multipliers: Json<HashMap<String, f64>>,
    pub currency: String,
    pub active: Option<bool>, // Database has DEFAULT TRUE, can be NULL
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
