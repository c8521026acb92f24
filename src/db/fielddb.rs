use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::fieldmodel::SavedField;
use crate::utils::geo::Ring;

#[async_trait]
pub trait FieldExt {
    async fn create_saved_field(
        &self,
        org_id: Uuid,
        name: String,
        crop: Option<String>,
        boundary: Vec<Ring>,
        area_ha: f64,
        centroid_lat: f64,
        centroid_lon: f64,
    ) -> Result<SavedField, Error>;

    async fn get_saved_fields(&self, org_id: Uuid) -> Result<Vec<SavedField>, Error>;

    async fn get_saved_field(&self, field_id: Uuid) -> Result<Option<SavedField>, Error>;

    async fn delete_saved_field(&self, field_id: Uuid, org_id: Uuid) -> Result<u64, Error>;
}

#[async_trait]
impl FieldExt for DBClient {
    async fn create_saved_field(
        &self,
        org_id: Uuid,
        name: String,
        crop: Option<String>,
        boundary: Vec<Ring>,
        area_ha: f64,
        centroid_lat: f64,
        centroid_lon: f64,
    ) -> Result<SavedField, Error> {
        sqlx::query_as::<_, SavedField>(
            r#"
            INSERT INTO saved_fields
            (org_id, name, crop, boundary, area_ha, centroid_lat, centroid_lon)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, org_id, name, crop, boundary,
                area_ha, centroid_lat, centroid_lon,
                created_at, updated_at
            "#,
        )
        .bind(org_id)
        .bind(name)
        .bind(crop)
        .bind(Json(boundary))
        .bind(area_ha)
        .bind(centroid_lat)
        .bind(centroid_lon)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_saved_fields(&self, org_id: Uuid) -> Result<Vec<SavedField>, Error> {
        sqlx::query_as::<_, SavedField>(
            r#"
            SELECT
                id, org_id, name, crop, boundary,
                area_ha, centroid_lat, centroid_lon,
                created_at, updated_at
            FROM saved_fields
            WHERE org_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_saved_field(&self, field_id: Uuid) -> Result<Option<SavedField>, Error> {
        sqlx::query_as::<_, SavedField>(
            r#"
            SELECT
                id, org_id, name, crop, boundary,
                area_ha, centroid_lat, centroid_lon,
                created_at, updated_at
            FROM saved_fields
            WHERE id = $1
            "#,
        )
        .bind(field_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_saved_field(&self, field_id: Uuid, org_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM saved_fields
            WHERE id = $1 AND org_id = $2
            "#,
        )
        .bind(field_id)
        .bind(org_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
