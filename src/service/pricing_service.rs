use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, ratedb::RateCardExt},
    dtos::quotedtos::{QuoteBreakdownDto, VendorQuoteDto},
    models::{ratemodel::RateCard, servicemodel::ServiceType},
    service::error::ServiceError,
    utils::money,
};

/// Normalized quote inputs after area resolution (direct or from a boundary).
#[derive(Debug, Clone)]
pub struct QuoteInput {
    pub area_ha: f64,
    pub distance_km: f64,
    pub season: Option<String>,
    pub terrain: Option<String>,
    pub risk: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PricingService {
    db_client: Arc<DBClient>,
}

impl PricingService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Quote one vendor's active rate card for a service request.
    pub async fn quote_for_vendor(
        &self,
        vendor_org_id: Uuid,
        service_type: ServiceType,
        input: &QuoteInput,
    ) -> Result<QuoteBreakdownDto, ServiceError> {
        let card = self
            .db_client
            .get_active_rate_card(vendor_org_id, service_type)
            .await?
            .ok_or(ServiceError::RateCardNotFound {
                org_id: vendor_org_id,
                service_type,
            })?;

        compute_quote(&card, input)
    }

    /// Quote every vendor holding an active card for the service, cheapest
    /// first.
    pub async fn compare_quotes(
        &self,
        service_type: ServiceType,
        input: &QuoteInput,
    ) -> Result<Vec<VendorQuoteDto>, ServiceError> {
        let cards = self
            .db_client
            .get_active_rate_cards_by_service(service_type)
            .await?;

        quote_cards(&cards, input)
    }
}

/// Price a request against a set of cards. Vendors whose card cannot price it
/// (e.g. a season key their card does not define) are skipped, but when every
/// card fails the last error is surfaced instead of an empty success: an
/// unpriceable request and "no vendors serve this" must look different.
pub fn quote_cards(
    cards: &[RateCard],
    input: &QuoteInput,
) -> Result<Vec<VendorQuoteDto>, ServiceError> {
    let mut quotes: Vec<VendorQuoteDto> = Vec::with_capacity(cards.len());
    let mut last_err: Option<ServiceError> = None;

    for card in cards {
        match compute_quote(card, input) {
            Ok(quote) => quotes.push(VendorQuoteDto {
                vendor_org_id: card.org_id,
                quote,
            }),
            Err(err) => last_err = Some(err),
        }
    }

    if quotes.is_empty() {
        if let Some(err) = last_err {
            return Err(err);
        }
    }

    quotes.sort_by(|a, b| {
        a.quote
            .total
            .partial_cmp(&b.quote.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(quotes)
}

/// The estimator itself: linear rate times area, multiplier composition,
/// travel cost, floored by the card's minimum charge.
pub fn compute_quote(card: &RateCard, input: &QuoteInput) -> Result<QuoteBreakdownDto, ServiceError> {
    if !input.area_ha.is_finite() || input.area_ha <= 0.0 {
        return Err(ServiceError::Validation("Area must be positive".to_string()));
    }
    if !input.distance_km.is_finite() || input.distance_km < 0.0 {
        return Err(ServiceError::Validation(
            "Distance must be non-negative".to_string(),
        ));
    }

    let rate_per_ha = money::to_f64(&card.rate_per_ha);
    let min_charge = money::to_f64(&card.min_charge);
    let travel_fixed = money::to_f64(&card.travel_fixed);
    let travel_rate_per_km = money::to_f64(&card.travel_rate_per_km);

    let seasonal_multiplier = lookup_multiplier(&card.seasonal_multipliers.0, &input.season, "season")?;
    let terrain_multiplier = lookup_multiplier(&card.terrain_multipliers.0, &input.terrain, "terrain")?;
    let risk_multiplier = lookup_multiplier(&card.risk_multipliers.0, &input.risk, "risk")?;

    let base = rate_per_ha * input.area_ha;
    let multiplied = base * seasonal_multiplier * terrain_multiplier * risk_multiplier;
    let travel = travel_fixed + input.distance_km * travel_rate_per_km;

    let raw_total = multiplied + travel;
    let min_charge_applied = raw_total < min_charge;
    let total = if min_charge_applied { min_charge } else { raw_total };

    Ok(QuoteBreakdownDto {
        service_type: card.service_type,
        area_ha: input.area_ha,
        distance_km: input.distance_km,
        rate_per_ha,
        base: money::round_to_cents(base),
        seasonal_multiplier,
        terrain_multiplier,
        risk_multiplier,
        multiplied: money::round_to_cents(multiplied),
        travel: money::round_to_cents(travel),
        min_charge,
        min_charge_applied,
        total: money::round_to_cents(total),
        currency: card.currency.clone(),
    })
}

/// No key means no adjustment. A key the card does not define is an input
/// error, not a silent 1.0: a typo must never misprice a quote.
fn lookup_multiplier(
    map: &HashMap<String, f64>,
    key: &Option<String>,
    kind: &str,
) -> Result<f64, ServiceError> {
    match key {
        None => Ok(1.0),
        Some(k) => {
            let factor = map.get(k).copied().ok_or_else(|| {
                ServiceError::Validation(format!("Unknown {} key '{}'", kind, k))
            })?;
            if !factor.is_finite() || factor < 0.0 {
                return Err(ServiceError::Validation(format!(
                    "Invalid {} multiplier for key '{}'",
                    kind, k
                )));
            }
            Ok(factor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::{BigDecimal, Json};

    fn test_card() -> RateCard {
        RateCard {
            id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            service_type: ServiceType::Spraying,
            rate_per_ha: BigDecimal::try_from(18.0).unwrap(),
            min_charge: BigDecimal::try_from(250.0).unwrap(),
            travel_fixed: BigDecimal::try_from(40.0).unwrap(),
            travel_rate_per_km: BigDecimal::try_from(1.5).unwrap(),
            seasonal_multipliers: Json(HashMap::from([
                ("spring".to_string(), 1.25),
                ("winter".to_string(), 0.9),
            ])),
            terrain_multipliers: Json(HashMap::from([("hilly".to_string(), 1.3)])),
            risk_multipliers: Json(HashMap::from([("near_water".to_string(), 1.15)])),
            currency: "EUR".to_string(),
            active: Some(true),
            created_at: None,
            updated_at: None,
        }
    }

    fn input(area_ha: f64, distance_km: f64) -> QuoteInput {
        QuoteInput {
            area_ha,
            distance_km,
            season: None,
            terrain: None,
            risk: None,
        }
    }

    #[test]
    fn test_base_quote_without_multipliers() {
        let quote = compute_quote(&test_card(), &input(50.0, 20.0)).unwrap();
        // base 18 * 50 = 900, travel 40 + 20 * 1.5 = 70
        assert_eq!(quote.base, 900.0);
        assert_eq!(quote.travel, 70.0);
        assert_eq!(quote.total, 970.0);
        assert!(!quote.min_charge_applied);
        assert_eq!(quote.seasonal_multiplier, 1.0);
        assert_eq!(quote.currency, "EUR");
    }

    #[test]
    fn test_multiplier_composition() {
        let mut req = input(50.0, 0.0);
        req.season = Some("spring".to_string());
        req.terrain = Some("hilly".to_string());
        req.risk = Some("near_water".to_string());

        let quote = compute_quote(&test_card(), &req).unwrap();
        // 900 * 1.25 * 1.3 * 1.15 = 1681.875, plus fixed travel 40
        assert!((quote.multiplied - 1681.88).abs() <= 0.01);
        assert!((quote.total - 1721.88).abs() <= 0.01);
    }

    #[test]
    fn test_min_charge_floor() {
        let quote = compute_quote(&test_card(), &input(1.0, 0.0)).unwrap();
        // 18 + 40 = 58 < 250
        assert!(quote.min_charge_applied);
        assert_eq!(quote.total, 250.0);
    }

    #[test]
    fn test_discount_multiplier_below_one() {
        let mut req = input(100.0, 0.0);
        req.season = Some("winter".to_string());
        let quote = compute_quote(&test_card(), &req).unwrap();
        // 1800 * 0.9 = 1620, plus fixed travel 40
        assert_eq!(quote.total, 1660.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut req = input(50.0, 0.0);
        req.season = Some("monsoon".to_string());
        let err = compute_quote(&test_card(), &req).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_invalid_area_rejected() {
        assert!(compute_quote(&test_card(), &input(0.0, 0.0)).is_err());
        assert!(compute_quote(&test_card(), &input(-5.0, 0.0)).is_err());
        assert!(compute_quote(&test_card(), &input(f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn test_negative_distance_rejected() {
        assert!(compute_quote(&test_card(), &input(10.0, -1.0)).is_err());
    }

    #[test]
    fn test_quote_cards_sorts_cheapest_first() {
        let cheap = test_card();
        let mut dear = test_card();
        dear.rate_per_ha = BigDecimal::try_from(30.0).unwrap();

        let quotes = quote_cards(&[dear.clone(), cheap.clone()], &input(50.0, 0.0)).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].vendor_org_id, cheap.org_id);
        assert!(quotes[0].quote.total <= quotes[1].quote.total);
    }

    #[test]
    fn test_quote_cards_skips_unquotable_vendor_when_others_price() {
        let with_season = test_card();
        let mut without_season = test_card();
        without_season.seasonal_multipliers = Json(HashMap::new());

        let mut req = input(50.0, 0.0);
        req.season = Some("spring".to_string());

        let quotes = quote_cards(&[with_season.clone(), without_season], &req).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].vendor_org_id, with_season.org_id);
    }

    #[test]
    fn test_quote_cards_surfaces_error_when_no_vendor_can_price() {
        let mut card_a = test_card();
        card_a.seasonal_multipliers = Json(HashMap::new());
        let mut card_b = test_card();
        card_b.seasonal_multipliers = Json(HashMap::new());

        let mut req = input(50.0, 0.0);
        req.season = Some("spring".to_string());

        let err = quote_cards(&[card_a, card_b], &req).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_quote_cards_no_vendors_is_empty_success() {
        let quotes = quote_cards(&[], &input(50.0, 0.0)).unwrap();
        assert!(quotes.is_empty());
    }
}
