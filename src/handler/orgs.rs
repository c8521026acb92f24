use std::sync::Arc;

use axum::{extract::Path, routing::get, Extension, Json, Router};
use uuid::Uuid;

use crate::{
    db::operatordb::OperatorExt,
    dtos::{
        jobdtos::ApiResponse,
        orgdtos::{MeResponseDto, OperatorProfileResponseDto, OrgResponseDto, UserResponseDto},
    },
    error::HttpError,
    middleware::JWTAuthMiddleware,
    AppState,
};

pub fn orgs_handler() -> Router {
    Router::new().route("/me", get(get_me))
}

pub fn operators_handler() -> Router {
    Router::new().route("/:org_id", get(get_operator_profile))
}

pub async fn get_me(
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<MeResponseDto>>, HttpError> {
    let me = MeResponseDto {
        user: UserResponseDto::from(auth.user),
        org: OrgResponseDto::from(auth.org),
    };

    Ok(Json(ApiResponse::success("Authenticated org", me)))
}

pub async fn get_operator_profile(
    Path(org_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<Json<ApiResponse<OperatorProfileResponseDto>>, HttpError> {
    let profile = app_state
        .db_client
        .get_operator_profile_by_org(org_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Operator profile not found".to_string()))?;

    Ok(Json(ApiResponse::success(
        "Operator profile",
        OperatorProfileResponseDto::from(profile),
    )))
}
