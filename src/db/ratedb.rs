use async_trait::async_trait;
use sqlx::types::{BigDecimal, Json};
use sqlx::Error;
use std::collections::HashMap;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::ratemodel::RateCard;
use crate::models::servicemodel::ServiceType;

const RATE_CARD_COLUMNS: &str = r#"
    id, org_id, service_type,
    rate_per_ha, min_charge, travel_fixed, travel_rate_per_km,
    seasonal_multipliers, terrain_multipliers, risk_multipliers,
    currency, active, created_at, updated_at
"#;

#[async_trait]
pub trait RateCardExt {
    /// One active card per (org, service_type); an upsert replaces the
    /// previous configuration in place.
    #[allow(clippy::too_many_arguments)]
    async fn upsert_rate_card(
        &self,
        org_id: Uuid,
        service_type: ServiceType,
        rate_per_ha: BigDecimal,
        min_charge: BigDecimal,
        travel_fixed: BigDecimal,
        travel_rate_per_km: BigDecimal,
        seasonal_multipliers: HashMap<String, f64>,
        terrain_multipliers: HashMap<String, f64>,
        risk_multipliers: HashMap<String, f64>,
        currency: String,
    ) -> Result<RateCard, Error>;

    async fn get_rate_cards(&self, org_id: Uuid) -> Result<Vec<RateCard>, Error>;

    async fn get_rate_card_by_id(&self, card_id: Uuid) -> Result<Option<RateCard>, Error>;

    async fn get_active_rate_card(
        &self,
        org_id: Uuid,
        service_type: ServiceType,
    ) -> Result<Option<RateCard>, Error>;

    async fn get_active_rate_cards_by_service(
        &self,
        service_type: ServiceType,
    ) -> Result<Vec<RateCard>, Error>;
}

#[async_trait]
impl RateCardExt for DBClient {
    async fn upsert_rate_card(
        &self,
        org_id: Uuid,
        service_type: ServiceType,
        rate_per_ha: BigDecimal,
        min_charge: BigDecimal,
        travel_fixed: BigDecimal,
        travel_rate_per_km: BigDecimal,
        seasonal_multipliers: HashMap<String, f64>,
        terrain_multipliers: HashMap<String, f64>,
        risk_multipliers: HashMap<String, f64>,
        currency: String,
    ) -> Result<RateCard, Error> {
        let query = format!(
            r#"
            INSERT INTO rate_cards
            (org_id, service_type, rate_per_ha, min_charge, travel_fixed, travel_rate_per_km,
             seasonal_multipliers, terrain_multipliers, risk_multipliers, currency)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (org_id, service_type) DO UPDATE SET
                rate_per_ha = EXCLUDED.rate_per_ha,
                min_charge = EXCLUDED.min_charge,
                travel_fixed = EXCLUDED.travel_fixed,
                travel_rate_per_km = EXCLUDED.travel_rate_per_km,
                seasonal_multipliers = EXCLUDED.seasonal_multipliers,
                terrain_multipliers = EXCLUDED.terrain_multipliers,
                risk_multipliers = EXCLUDED.risk_multipliers,
                currency = EXCLUDED.currency,
                active = TRUE,
                updated_at = NOW()
            RETURNING {RATE_CARD_COLUMNS}
            "#
        );

        sqlx::query_as::<_, RateCard>(&query)
            .bind(org_id)
            .bind(service_type)
            .bind(rate_per_ha)
            .bind(min_charge)
            .bind(travel_fixed)
            .bind(travel_rate_per_km)
            .bind(Json(seasonal_multipliers))
            .bind(Json(terrain_multipliers))
            .bind(Json(risk_multipliers))
            .bind(currency)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_rate_cards(&self, org_id: Uuid) -> Result<Vec<RateCard>, Error> {
        let query = format!(
            r#"
            SELECT {RATE_CARD_COLUMNS}
            FROM rate_cards
            WHERE org_id = $1
            ORDER BY service_type
            "#
        );

        sqlx::query_as::<_, RateCard>(&query)
            .bind(org_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_rate_card_by_id(&self, card_id: Uuid) -> Result<Option<RateCard>, Error> {
        let query = format!(
            r#"
            SELECT {RATE_CARD_COLUMNS}
            FROM rate_cards
            WHERE id = $1
            "#
        );

        sqlx::query_as::<_, RateCard>(&query)
            .bind(card_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_active_rate_card(
        &self,
        org_id: Uuid,
        service_type: ServiceType,
    ) -> Result<Option<RateCard>, Error> {
        let query = format!(
            r#"
            SELECT {RATE_CARD_COLUMNS}
            FROM rate_cards
            WHERE org_id = $1 AND service_type = $2 AND active IS NOT FALSE
            "#
        );

        sqlx::query_as::<_, RateCard>(&query)
            .bind(org_id)
            .bind(service_type)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_active_rate_cards_by_service(
        &self,
        service_type: ServiceType,
    ) -> Result<Vec<RateCard>, Error> {
        let query = format!(
            r#"
            SELECT {RATE_CARD_COLUMNS}
            FROM rate_cards
            WHERE service_type = $1 AND active IS NOT FALSE
            "#
        );

        sqlx::query_as::<_, RateCard>(&query)
            .bind(service_type)
            .fetch_all(&self.pool)
            .await
    }
}
