use std::sync::Arc;

use axum::{
    extract::Path,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::fielddb::FieldExt,
    dtos::{
        fielddtos::{CreateFieldDto, FieldResponseDto},
        jobdtos::ApiResponse,
    },
    error::HttpError,
    middleware::JWTAuthMiddleware,
    utils::geo,
    AppState,
};

pub fn fields_handler() -> Router {
    Router::new()
        .route("/", post(create_field).get(list_fields))
        .route("/:field_id", get(get_field))
        .route("/:field_id", delete(delete_field))
}

pub async fn create_field(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreateFieldDto>,
) -> Result<Json<ApiResponse<FieldResponseDto>>, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let area_ha = geo::polygon_area_ha(&body.boundary).map_err(HttpError::bad_request)?;
    let outer = &body.boundary[0];
    let (centroid_lat, centroid_lon) = geo::centroid(outer);

    let field = app_state
        .db_client
        .create_saved_field(
            auth.org.id,
            body.name,
            body.crop,
            body.boundary,
            area_ha,
            centroid_lat,
            centroid_lon,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Field saved",
        FieldResponseDto::from(field),
    )))
}

pub async fn list_fields(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<Vec<FieldResponseDto>>>, HttpError> {
    let fields = app_state
        .db_client
        .get_saved_fields(auth.org.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Saved fields",
        fields.into_iter().map(FieldResponseDto::from).collect(),
    )))
}

pub async fn get_field(
    Path(field_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<FieldResponseDto>>, HttpError> {
    let field = app_state
        .db_client
        .get_saved_field(field_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .filter(|field| field.org_id == auth.org.id)
        .ok_or_else(|| HttpError::not_found("Field not found".to_string()))?;

    Ok(Json(ApiResponse::success(
        "Field",
        FieldResponseDto::from(field),
    )))
}

pub async fn delete_field(
    Path(field_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<Json<ApiResponse<()>>, HttpError> {
    let deleted = app_state
        .db_client
        .delete_saved_field(field_id, auth.org.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Field not found".to_string()));
    }

    Ok(Json(ApiResponse::success("Field deleted", ())))
}
