use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, operatordb::OperatorExt},
    models::{jobmodel::Job, operatormodel::OperatorProfile},
    service::{
        error::ServiceError,
        pricing_service::{PricingService, QuoteInput},
    },
    utils::geo,
};

#[derive(Debug, Clone)]
pub struct MatchingService {
    db_client: Arc<DBClient>,
    pricing_service: Arc<PricingService>,
}

#[derive(Debug, Serialize)]
pub struct OperatorMatch {
    pub operator: OperatorProfile,
    pub vendor_org_id: Uuid,
    pub distance_km: f64,
    pub quote_total: Option<f64>,
    pub score: f32,
    pub match_reasons: Vec<String>,
}

impl MatchingService {
    pub fn new(db_client: Arc<DBClient>, pricing_service: Arc<PricingService>) -> Self {
        Self {
            db_client,
            pricing_service,
        }
    }

    /// Rank operators able to fly a job: capability and radius are hard
    /// filters, then distance, rating, track record, availability and price
    /// feed a 0-100 score.
    pub async fn find_operators_for_job(
        &self,
        job: &Job,
        limit: usize,
    ) -> Result<Vec<OperatorMatch>, ServiceError> {
        let candidates = self
            .db_client
            .get_operators_by_service(job.service_type)
            .await?;

        // Distance and quote per candidate before scoring, so price
        // competitiveness can be judged against the cheapest quote.
        let mut prepared: Vec<(OperatorProfile, f64, Option<f64>)> = Vec::new();
        for operator in candidates {
            let distance_km = geo::haversine_km(
                operator.base_lat,
                operator.base_lon,
                job.centroid_lat,
                job.centroid_lon,
            );
            if distance_km > operator.service_radius_km {
                continue;
            }

            let quote_total = self
                .pricing_service
                .quote_for_vendor(
                    operator.org_id,
                    job.service_type,
                    &QuoteInput {
                        area_ha: job.area_ha,
                        distance_km,
                        season: None,
                        terrain: None,
                        risk: None,
                    },
                )
                .await
                .ok()
                .map(|quote| quote.total);

            prepared.push((operator, distance_km, quote_total));
        }

        let cheapest_total = prepared
            .iter()
            .filter_map(|(_, _, total)| *total)
            .fold(None::<f64>, |acc, t| match acc {
                Some(best) if best <= t => Some(best),
                _ => Some(t),
            });

        let mut matches: Vec<OperatorMatch> = prepared
            .into_iter()
            .filter_map(|(operator, distance_km, quote_total)| {
                score_operator(&operator, distance_km, quote_total, cheapest_total).map(
                    |(score, match_reasons)| OperatorMatch {
                        vendor_org_id: operator.org_id,
                        operator,
                        distance_km,
                        quote_total,
                        score,
                        match_reasons,
                    },
                )
            })
            .collect();

        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        matches.truncate(limit);

        Ok(matches)
    }
}

/// Pure scoring for one candidate. Returns None when the job sits outside the
/// operator's service radius.
///
/// Weights: distance 35, rating 25, completed jobs 15, availability 15,
/// price competitiveness 10.
pub fn score_operator(
    operator: &OperatorProfile,
    distance_km: f64,
    quote_total: Option<f64>,
    cheapest_total: Option<f64>,
) -> Option<(f32, Vec<String>)> {
    if operator.service_radius_km <= 0.0 || distance_km > operator.service_radius_km {
        return None;
    }

    let mut score: f32 = 0.0;
    let mut match_reasons = Vec::new();

    let proximity = 1.0 - (distance_km / operator.service_radius_km).clamp(0.0, 1.0);
    score += (proximity as f32) * 35.0;
    if distance_km <= operator.service_radius_km * 0.25 {
        match_reasons.push("Close to field".to_string());
    }

    if let Some(rating) = operator.rating {
        score += (rating / 5.0).clamp(0.0, 1.0) * 25.0;
        if rating >= 4.0 {
            match_reasons.push("High rating".to_string());
        }
    }

    if let Some(completed) = operator.completed_jobs {
        score += (completed as f32 / 20.0).min(1.0) * 15.0;
        if completed >= 10 {
            match_reasons.push("Proven track record".to_string());
        }
    }

    if operator.is_available.unwrap_or(false) {
        score += 15.0;
        match_reasons.push("Available now".to_string());
    }

    if let (Some(total), Some(cheapest)) = (quote_total, cheapest_total) {
        if total > 0.0 {
            score += ((cheapest / total).clamp(0.0, 1.0) as f32) * 10.0;
            if (total - cheapest).abs() < f64::EPSILON {
                match_reasons.push("Best price".to_string());
            }
        }
    }

    Some((score.min(100.0), match_reasons))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::servicemodel::ServiceType;
    use sqlx::types::Json;

    fn operator(radius_km: f64, rating: f32, completed: i32, available: bool) -> OperatorProfile {
        OperatorProfile {
            id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            display_name: "AgDrone One".to_string(),
            service_types: Json(vec![ServiceType::Spraying]),
            base_lat: 52.0,
            base_lon: 5.0,
            service_radius_km: radius_km,
            rating: Some(rating),
            completed_jobs: Some(completed),
            is_available: Some(available),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_outside_radius_excluded() {
        let op = operator(50.0, 5.0, 100, true);
        assert!(score_operator(&op, 51.0, None, None).is_none());
        assert!(score_operator(&op, 50.0, None, None).is_some());
    }

    #[test]
    fn test_closer_scores_higher() {
        let op = operator(100.0, 3.0, 5, true);
        let (near, _) = score_operator(&op, 10.0, None, None).unwrap();
        let (far, _) = score_operator(&op, 90.0, None, None).unwrap();
        assert!(near > far);
    }

    #[test]
    fn test_rating_and_track_record_contribute() {
        let strong = operator(100.0, 5.0, 50, true);
        let weak = operator(100.0, 1.0, 0, true);
        let (s, reasons) = score_operator(&strong, 20.0, None, None).unwrap();
        let (w, _) = score_operator(&weak, 20.0, None, None).unwrap();
        assert!(s > w);
        assert!(reasons.contains(&"High rating".to_string()));
        assert!(reasons.contains(&"Proven track record".to_string()));
    }

    #[test]
    fn test_cheapest_gets_full_price_score() {
        let op = operator(100.0, 3.0, 5, false);
        let (cheap, reasons) = score_operator(&op, 20.0, Some(500.0), Some(500.0)).unwrap();
        let (dear, _) = score_operator(&op, 20.0, Some(1000.0), Some(500.0)).unwrap();
        assert!(cheap > dear);
        assert!(reasons.contains(&"Best price".to_string()));
    }

    #[test]
    fn test_score_capped_at_100() {
        let op = operator(100.0, 5.0, 1000, true);
        let (score, _) = score_operator(&op, 0.0, Some(100.0), Some(100.0)).unwrap();
        assert!(score <= 100.0);
    }
}
