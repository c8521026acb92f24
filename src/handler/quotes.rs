use std::sync::Arc;

use axum::{routing::post, Extension, Json, Router};
use validator::Validate;

use crate::{
    dtos::{
        jobdtos::ApiResponse,
        quotedtos::{CompareQuotesDto, QuoteBreakdownDto, QuoteRequestDto, VendorQuoteDto},
    },
    error::HttpError,
    service::pricing_service::QuoteInput,
    utils::geo::{self, Ring},
    AppState,
};

pub fn quotes_handler() -> Router {
    Router::new()
        .route("/", post(get_quote))
        .route("/compare", post(compare_quotes))
}

/// Boundary wins over a directly supplied area; one of the two is required.
fn resolve_area(area_ha: Option<f64>, boundary: &Option<Vec<Ring>>) -> Result<f64, HttpError> {
    match boundary {
        Some(rings) => geo::polygon_area_ha(rings).map_err(HttpError::bad_request),
        None => area_ha.ok_or_else(|| {
            HttpError::bad_request("Either area_ha or boundary is required".to_string())
        }),
    }
}

pub async fn get_quote(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<QuoteRequestDto>,
) -> Result<Json<ApiResponse<QuoteBreakdownDto>>, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let area_ha = resolve_area(body.area_ha, &body.boundary)?;
    let input = QuoteInput {
        area_ha,
        distance_km: body.distance_km,
        season: body.season,
        terrain: body.terrain,
        risk: body.risk,
    };

    let quote = app_state
        .pricing_service
        .quote_for_vendor(body.vendor_org_id, body.service_type, &input)
        .await?;

    Ok(Json(ApiResponse::success("Quote", quote)))
}

pub async fn compare_quotes(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CompareQuotesDto>,
) -> Result<Json<ApiResponse<Vec<VendorQuoteDto>>>, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let area_ha = resolve_area(body.area_ha, &body.boundary)?;
    let input = QuoteInput {
        area_ha,
        distance_km: body.distance_km,
        season: body.season,
        terrain: body.terrain,
        risk: body.risk,
    };

    let quotes = app_state
        .pricing_service
        .compare_quotes(body.service_type, &input)
        .await?;

    Ok(Json(ApiResponse::success("Vendor quotes", quotes)))
}
