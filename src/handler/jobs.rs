use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{fielddb::FieldExt, jobdb::JobExt, offerdb::OfferExt},
    dtos::{
        jobdtos::{
            page_offset, ApiResponse, CreateJobDto, JobResponseDto, MatchQueryDto,
            PaginatedResponse, SearchJobsDto,
        },
        offerdtos::{CreateOfferDto, OfferResponseDto},
    },
    error::HttpError,
    middleware::JWTAuthMiddleware,
    models::{jobmodel::JobStatus, orgmodel::OrgType},
    service::matching_service::OperatorMatch,
    utils::geo::{self, Ring},
    AppState,
};

pub fn jobs_handler() -> Router {
    Router::new()
        .route("/", post(create_job).get(search_jobs))
        .route("/:job_id", get(get_job))
        .route("/:job_id/cancel", put(cancel_job))
        .route("/:job_id/matches", get(job_matches))
        .route("/:job_id/offers", post(submit_offer).get(list_offers))
}

/// Resolved geometry for a job: boundary, area and centroid, whether it came
/// from a saved field or an inline ring set.
struct JobGeometry {
    field_id: Option<Uuid>,
    boundary: Vec<Ring>,
    area_ha: f64,
    centroid_lat: f64,
    centroid_lon: f64,
}

async fn resolve_geometry(
    app_state: &AppState,
    org_id: Uuid,
    field_id: Option<Uuid>,
    boundary: Option<Vec<Ring>>,
) -> Result<JobGeometry, HttpError> {
    if let Some(field_id) = field_id {
        let field = app_state
            .db_client
            .get_saved_field(field_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .filter(|field| field.org_id == org_id)
            .ok_or_else(|| HttpError::not_found("Field not found".to_string()))?;

        return Ok(JobGeometry {
            field_id: Some(field.id),
            boundary: field.boundary.0,
            area_ha: field.area_ha,
            centroid_lat: field.centroid_lat,
            centroid_lon: field.centroid_lon,
        });
    }

    let boundary = boundary.ok_or_else(|| {
        HttpError::bad_request("Either field_id or boundary is required".to_string())
    })?;
    let area_ha = geo::polygon_area_ha(&boundary).map_err(HttpError::bad_request)?;
    let (centroid_lat, centroid_lon) = geo::centroid(&boundary[0]);

    Ok(JobGeometry {
        field_id: None,
        boundary,
        area_ha,
        centroid_lat,
        centroid_lon,
    })
}

pub async fn create_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreateJobDto>,
) -> Result<Json<ApiResponse<JobResponseDto>>, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if auth.org.org_type != OrgType::Buyer {
        return Err(HttpError::forbidden(
            "Only buyer orgs can post jobs".to_string(),
        ));
    }

    if let (Some(start), Some(end)) = (body.window_start, body.window_end) {
        if end < start {
            return Err(HttpError::bad_request(
                "Window end must not precede window start".to_string(),
            ));
        }
    }

    let geometry = resolve_geometry(&app_state, auth.org.id, body.field_id, body.boundary).await?;

    let job = app_state
        .db_client
        .create_job(
            auth.org.id,
            geometry.field_id,
            body.service_type,
            body.title,
            body.notes,
            geometry.boundary,
            geometry.area_ha,
            geometry.centroid_lat,
            geometry.centroid_lon,
            body.region,
            body.window_start,
            body.window_end,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(job_id = %job.id, "job posted");
    Ok(Json(ApiResponse::success(
        "Job posted",
        JobResponseDto::from(job),
    )))
}

pub async fn search_jobs(
    Query(query_params): Query<SearchJobsDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<Json<PaginatedResponse<JobResponseDto>>, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(20);
    let offset = page_offset(page, limit);

    let jobs = app_state
        .db_client
        .search_jobs(
            query_params.status,
            query_params.service_type,
            query_params.region.clone(),
            limit as i64,
            offset,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .count_jobs(
            query_params.status,
            query_params.service_type,
            query_params.region,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PaginatedResponse::new(
        jobs.into_iter().map(JobResponseDto::from).collect(),
        total,
        page,
        limit,
    )))
}

pub async fn get_job(
    Path(job_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<Json<ApiResponse<JobResponseDto>>, HttpError> {
    let job = app_state
        .db_client
        .get_job_by_id(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Job not found".to_string()))?;

    Ok(Json(ApiResponse::success("Job", JobResponseDto::from(job))))
}

pub async fn cancel_job(
    Path(job_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<JobResponseDto>>, HttpError> {
    let job = app_state
        .db_client
        .get_job_by_id(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Job not found".to_string()))?;

    if job.buyer_org_id != auth.org.id {
        return Err(HttpError::forbidden(
            "Only the posting org can cancel a job".to_string(),
        ));
    }

    let status = job.status.unwrap_or(JobStatus::Open);
    if status != JobStatus::Open {
        return Err(HttpError::bad_request(format!(
            "Cannot cancel a job in status '{}'",
            status.to_str()
        )));
    }

    let cancelled = app_state
        .db_client
        .update_job_status(job_id, JobStatus::Cancelled)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(job_id = %job_id, "job cancelled");
    Ok(Json(ApiResponse::success(
        "Job cancelled",
        JobResponseDto::from(cancelled),
    )))
}

pub async fn job_matches(
    Path(job_id): Path<Uuid>,
    Query(query_params): Query<MatchQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<Vec<OperatorMatch>>>, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let job = app_state
        .db_client
        .get_job_by_id(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Job not found".to_string()))?;

    if job.buyer_org_id != auth.org.id {
        return Err(HttpError::forbidden(
            "Only the posting org can view matches".to_string(),
        ));
    }

    let limit = query_params.limit.unwrap_or(10) as usize;
    let matches = app_state
        .matching_service
        .find_operators_for_job(&job, limit)
        .await?;

    Ok(Json(ApiResponse::success("Operator matches", matches)))
}

pub async fn submit_offer(
    Path(job_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreateOfferDto>,
) -> Result<Json<ApiResponse<OfferResponseDto>>, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let offer = app_state
        .offer_service
        .submit_offer(&auth.org, job_id, body)
        .await?;

    Ok(Json(ApiResponse::success(
        "Offer submitted",
        OfferResponseDto::from(offer),
    )))
}

/// The buyer sees every offer on its job; a vendor sees only its own.
pub async fn list_offers(
    Path(job_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<Vec<OfferResponseDto>>>, HttpError> {
    let job = app_state
        .db_client
        .get_job_by_id(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Job not found".to_string()))?;

    let offers = if job.buyer_org_id == auth.org.id {
        app_state
            .db_client
            .get_offers_for_job(job_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
    } else {
        app_state
            .db_client
            .get_offers_for_job_and_vendor(job_id, auth.org.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
    };

    Ok(Json(ApiResponse::success(
        "Offers",
        offers.into_iter().map(OfferResponseDto::from).collect(),
    )))
}
