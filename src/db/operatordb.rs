use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{Error, Postgres, Transaction};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::operatormodel::OperatorProfile;
use crate::models::servicemodel::ServiceType;

const OPERATOR_COLUMNS: &str = r#"
    id, org_id, display_name, service_types,
    base_lat, base_lon, service_radius_km,
    rating, completed_jobs, is_available,
    created_at, updated_at
"#;

#[async_trait]
pub trait OperatorExt {
    async fn get_operator_profile_by_org(
        &self,
        org_id: Uuid,
    ) -> Result<Option<OperatorProfile>, Error>;

    async fn get_operators_by_service(
        &self,
        service_type: ServiceType,
    ) -> Result<Vec<OperatorProfile>, Error>;

    async fn increment_completed_jobs_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        org_id: Uuid,
    ) -> Result<(), Error>;
}

#[async_trait]
impl OperatorExt for DBClient {
    async fn get_operator_profile_by_org(
        &self,
        org_id: Uuid,
    ) -> Result<Option<OperatorProfile>, Error> {
        let query = format!(
            r#"
            SELECT {OPERATOR_COLUMNS}
            FROM operator_profiles
            WHERE org_id = $1
            "#
        );

        sqlx::query_as::<_, OperatorProfile>(&query)
            .bind(org_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_operators_by_service(
        &self,
        service_type: ServiceType,
    ) -> Result<Vec<OperatorProfile>, Error> {
        let query = format!(
            r#"
            SELECT {OPERATOR_COLUMNS}
            FROM operator_profiles
            WHERE service_types @> $1
            "#
        );

        sqlx::query_as::<_, OperatorProfile>(&query)
            .bind(Json(vec![service_type]))
            .fetch_all(&self.pool)
            .await
    }

    async fn increment_completed_jobs_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        org_id: Uuid,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE operator_profiles
            SET completed_jobs = COALESCE(completed_jobs, 0) + 1, updated_at = NOW()
            WHERE org_id = $1
            "#,
        )
        .bind(org_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
