use std::sync::Arc;

use axum::{
    extract::Path,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::ratedb::RateCardExt,
    dtos::{
        jobdtos::ApiResponse,
        ratedtos::{RateCardResponseDto, UpsertRateCardDto},
    },
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddleware,
    models::orgmodel::UserRole,
    utils::money,
    AppState,
};

pub fn rate_cards_handler() -> Router {
    Router::new()
        .route("/", post(upsert_rate_card).get(list_rate_cards))
        .route("/:card_id", get(get_rate_card))
}

pub async fn upsert_rate_card(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<UpsertRateCardDto>,
) -> Result<Json<ApiResponse<RateCardResponseDto>>, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    body.validate_multipliers().map_err(HttpError::bad_request)?;

    if !auth.org.org_type.is_supplier() {
        return Err(HttpError::forbidden(
            "Only vendor or operator orgs carry rate cards".to_string(),
        ));
    }
    if auth.user.role != UserRole::Admin {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let card = app_state
        .db_client
        .upsert_rate_card(
            auth.org.id,
            body.service_type,
            money::to_bigdecimal(body.rate_per_ha),
            money::to_bigdecimal(body.min_charge),
            money::to_bigdecimal(body.travel_fixed),
            money::to_bigdecimal(body.travel_rate_per_km),
            body.seasonal_multipliers,
            body.terrain_multipliers,
            body.risk_multipliers,
            body.currency,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(card_id = %card.id, service_type = card.service_type.to_str(), "rate card saved");
    Ok(Json(ApiResponse::success(
        "Rate card saved",
        RateCardResponseDto::from(card),
    )))
}

pub async fn list_rate_cards(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<Vec<RateCardResponseDto>>>, HttpError> {
    let cards = app_state
        .db_client
        .get_rate_cards(auth.org.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Rate cards",
        cards.into_iter().map(RateCardResponseDto::from).collect(),
    )))
}

pub async fn get_rate_card(
    Path(card_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<RateCardResponseDto>>, HttpError> {
    let card = app_state
        .db_client
        .get_rate_card_by_id(card_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .filter(|card| card.org_id == auth.org.id)
        .ok_or_else(|| HttpError::not_found("Rate card not found".to_string()))?;

    Ok(Json(ApiResponse::success(
        "Rate card",
        RateCardResponseDto::from(card),
    )))
}
