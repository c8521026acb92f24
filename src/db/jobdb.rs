use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::{BigDecimal, Json};
use sqlx::{Error, Postgres, Row, Transaction};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::jobmodel::{Job, JobStatus};
use crate::models::servicemodel::ServiceType;
use crate::utils::geo::Ring;

const JOB_COLUMNS: &str = r#"
    id, buyer_org_id, field_id, service_type, title, notes,
    boundary, area_ha, centroid_lat, centroid_lon, region,
    window_start, window_end, status, assigned_org_id, accepted_price,
    created_at, updated_at
"#;

// Shared by search and count so the two can never disagree. Without an
// explicit status filter the listing hides cancelled jobs.
const JOB_LISTING_FILTER: &str = r#"
    ($1::job_status IS NULL OR status = $1)
    AND ($1::job_status IS NOT NULL OR status IS DISTINCT FROM 'cancelled')
    AND ($2::service_type IS NULL OR service_type = $2)
    AND ($3::text IS NULL OR region = $3)
"#;

#[async_trait]
pub trait JobExt {
    #[allow(clippy::too_many_arguments)]
    async fn create_job(
        &self,
        buyer_org_id: Uuid,
        field_id: Option<Uuid>,
        service_type: ServiceType,
        title: String,
        notes: Option<String>,
        boundary: Vec<Ring>,
        area_ha: f64,
        centroid_lat: f64,
        centroid_lon: f64,
        region: String,
        window_start: Option<DateTime<Utc>>,
        window_end: Option<DateTime<Utc>>,
    ) -> Result<Job, Error>;

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error>;

    async fn search_jobs(
        &self,
        status: Option<JobStatus>,
        service_type: Option<ServiceType>,
        region: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Job>, Error>;

    async fn count_jobs(
        &self,
        status: Option<JobStatus>,
        service_type: Option<ServiceType>,
        region: Option<String>,
    ) -> Result<i64, Error>;

    async fn update_job_status(&self, job_id: Uuid, status: JobStatus) -> Result<Job, Error>;

    /// Mark the job assigned to the winning vendor inside an open transaction.
    /// Guarded on the job still being open; None means another accept won.
    async fn assign_job_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        job_id: Uuid,
        vendor_org_id: Uuid,
        accepted_price: BigDecimal,
    ) -> Result<Option<Job>, Error>;

    /// Guarded on the job being assigned; None means it already moved.
    async fn complete_job_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        job_id: Uuid,
    ) -> Result<Option<Job>, Error>;
}

#[async_trait]
impl JobExt for DBClient {
    async fn create_job(
        &self,
        buyer_org_id: Uuid,
        field_id: Option<Uuid>,
        service_type: ServiceType,
        title: String,
        notes: Option<String>,
        boundary: Vec<Ring>,
        area_ha: f64,
        centroid_lat: f64,
        centroid_lon: f64,
        region: String,
        window_start: Option<DateTime<Utc>>,
        window_end: Option<DateTime<Utc>>,
    ) -> Result<Job, Error> {
        let query = format!(
            r#"
            INSERT INTO jobs
            (buyer_org_id, field_id, service_type, title, notes, boundary,
             area_ha, centroid_lat, centroid_lon, region, window_start, window_end)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {JOB_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Job>(&query)
            .bind(buyer_org_id)
            .bind(field_id)
            .bind(service_type)
            .bind(title)
            .bind(notes)
            .bind(Json(boundary))
            .bind(area_ha)
            .bind(centroid_lat)
            .bind(centroid_lon)
            .bind(region)
            .bind(window_start)
            .bind(window_end)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error> {
        let query = format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE id = $1
            "#
        );

        sqlx::query_as::<_, Job>(&query)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn search_jobs(
        &self,
        status: Option<JobStatus>,
        service_type: Option<ServiceType>,
        region: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Job>, Error> {
        let query = format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE {JOB_LISTING_FILTER}
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#
        );

        sqlx::query_as::<_, Job>(&query)
            .bind(status)
            .bind(service_type)
            .bind(region)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    async fn count_jobs(
        &self,
        status: Option<JobStatus>,
        service_type: Option<ServiceType>,
        region: Option<String>,
    ) -> Result<i64, Error> {
        let query = format!(
            r#"
            SELECT COUNT(*) as count
            FROM jobs
            WHERE {JOB_LISTING_FILTER}
            "#
        );

        let row = sqlx::query(&query)
            .bind(status)
            .bind(service_type)
            .bind(region)
            .fetch_one(&self.pool)
            .await?;

        row.try_get("count")
    }

    async fn update_job_status(&self, job_id: Uuid, status: JobStatus) -> Result<Job, Error> {
        let query = format!(
            r#"
            UPDATE jobs
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Job>(&query)
            .bind(job_id)
            .bind(status)
            .fetch_one(&self.pool)
            .await
    }

    async fn assign_job_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        job_id: Uuid,
        vendor_org_id: Uuid,
        accepted_price: BigDecimal,
    ) -> Result<Option<Job>, Error> {
        let query = format!(
            r#"
            UPDATE jobs
            SET status = 'assigned', assigned_org_id = $2, accepted_price = $3, updated_at = NOW()
            WHERE id = $1 AND (status = 'open' OR status IS NULL)
            RETURNING {JOB_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Job>(&query)
            .bind(job_id)
            .bind(vendor_org_id)
            .bind(accepted_price)
            .fetch_optional(&mut **tx)
            .await
    }

    async fn complete_job_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        job_id: Uuid,
    ) -> Result<Option<Job>, Error> {
        let query = format!(
            r#"
            UPDATE jobs
            SET status = 'completed', updated_at = NOW()
            WHERE id = $1 AND status = 'assigned'
            RETURNING {JOB_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Job>(&query)
            .bind(job_id)
            .fetch_optional(&mut **tx)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_filter_hides_cancelled_by_default() {
        // Only the $1-IS-NULL branch may pull in the cancelled exclusion, so
        // an explicit status filter can still select cancelled jobs.
        assert!(JOB_LISTING_FILTER.contains("$1::job_status IS NOT NULL OR status IS DISTINCT FROM 'cancelled'"));
        assert!(JOB_LISTING_FILTER.contains("$1::job_status IS NULL OR status = $1"));
    }
}
