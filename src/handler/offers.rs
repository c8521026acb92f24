use std::sync::Arc;

use axum::{
    extract::Path,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{jobdb::JobExt, offerdb::OfferExt},
    dtos::{
        jobdtos::{ApiResponse, JobResponseDto},
        offerdtos::OfferResponseDto,
    },
    error::HttpError,
    middleware::JWTAuthMiddleware,
    AppState,
};

pub fn offers_handler() -> Router {
    Router::new()
        .route("/:offer_id", get(get_offer))
        .route("/:offer_id/accept", put(accept_offer))
        .route("/:offer_id/withdraw", put(withdraw_offer))
        .route("/:offer_id/complete", put(complete_offer))
}

/// Offer plus the job it moved, for the transitions that touch both.
#[derive(Debug, Serialize)]
pub struct OfferWithJobDto {
    pub offer: OfferResponseDto,
    pub job: JobResponseDto,
}

pub async fn get_offer(
    Path(offer_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<OfferResponseDto>>, HttpError> {
    let offer = app_state
        .db_client
        .get_offer_by_id(offer_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Offer not found".to_string()))?;

    let job = app_state
        .db_client
        .get_job_by_id(offer.job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Job not found".to_string()))?;

    if auth.org.id != offer.vendor_org_id && auth.org.id != job.buyer_org_id {
        return Err(HttpError::forbidden(
            "Offer belongs to another negotiation".to_string(),
        ));
    }

    Ok(Json(ApiResponse::success(
        "Offer",
        OfferResponseDto::from(offer),
    )))
}

pub async fn accept_offer(
    Path(offer_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<OfferWithJobDto>>, HttpError> {
    let (offer, job) = app_state
        .offer_service
        .accept_offer(auth.org.id, offer_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Offer accepted",
        OfferWithJobDto {
            offer: OfferResponseDto::from(offer),
            job: JobResponseDto::from(job),
        },
    )))
}

pub async fn withdraw_offer(
    Path(offer_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<OfferResponseDto>>, HttpError> {
    let offer = app_state
        .offer_service
        .withdraw_offer(auth.org.id, offer_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Offer withdrawn",
        OfferResponseDto::from(offer),
    )))
}

pub async fn complete_offer(
    Path(offer_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<OfferWithJobDto>>, HttpError> {
    let (offer, job) = app_state
        .offer_service
        .complete_offer(auth.org.id, offer_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Offer completed",
        OfferWithJobDto {
            offer: OfferResponseDto::from(offer),
            job: JobResponseDto::from(job),
        },
    )))
}
