use async_trait::async_trait;
use sqlx::types::BigDecimal;
use sqlx::{Error, Postgres, Transaction};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::offermodel::{JobOffer, OfferStatus};

const OFFER_COLUMNS: &str = r#"
    id, job_id, vendor_org_id, price, estimated_days, message,
    status, created_at, updated_at
"#;

#[async_trait]
pub trait OfferExt {
    async fn create_offer(
        &self,
        job_id: Uuid,
        vendor_org_id: Uuid,
        price: BigDecimal,
        estimated_days: i32,
        message: String,
    ) -> Result<JobOffer, Error>;

    async fn get_offer_by_id(&self, offer_id: Uuid) -> Result<Option<JobOffer>, Error>;

    async fn get_offers_for_job(&self, job_id: Uuid) -> Result<Vec<JobOffer>, Error>;

    async fn get_offers_for_job_and_vendor(
        &self,
        job_id: Uuid,
        vendor_org_id: Uuid,
    ) -> Result<Vec<JobOffer>, Error>;

    /// A vendor's submitted or accepted offer on a job, if any.
    async fn get_live_offer(
        &self,
        job_id: Uuid,
        vendor_org_id: Uuid,
    ) -> Result<Option<JobOffer>, Error>;

    async fn update_offer_status_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer_id: Uuid,
        status: OfferStatus,
    ) -> Result<JobOffer, Error>;
}

#[async_trait]
impl OfferExt for DBClient {
    async fn create_offer(
        &self,
        job_id: Uuid,
        vendor_org_id: Uuid,
        price: BigDecimal,
        estimated_days: i32,
        message: String,
    ) -> Result<JobOffer, Error> {
        let query = format!(
            r#"
            INSERT INTO job_offers
            (job_id, vendor_org_id, price, estimated_days, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {OFFER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, JobOffer>(&query)
            .bind(job_id)
            .bind(vendor_org_id)
            .bind(price)
            .bind(estimated_days)
            .bind(message)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_offer_by_id(&self, offer_id: Uuid) -> Result<Option<JobOffer>, Error> {
        let query = format!(
            r#"
            SELECT {OFFER_COLUMNS}
            FROM job_offers
            WHERE id = $1
            "#
        );

        sqlx::query_as::<_, JobOffer>(&query)
            .bind(offer_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_offers_for_job(&self, job_id: Uuid) -> Result<Vec<JobOffer>, Error> {
        let query = format!(
            r#"
            SELECT {OFFER_COLUMNS}
            FROM job_offers
            WHERE job_id = $1
            ORDER BY created_at ASC
            "#
        );

        sqlx::query_as::<_, JobOffer>(&query)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_offers_for_job_and_vendor(
        &self,
        job_id: Uuid,
        vendor_org_id: Uuid,
    ) -> Result<Vec<JobOffer>, Error> {
        let query = format!(
            r#"
            SELECT {OFFER_COLUMNS}
            FROM job_offers
            WHERE job_id = $1 AND vendor_org_id = $2
            ORDER BY created_at ASC
            "#
        );

        sqlx::query_as::<_, JobOffer>(&query)
            .bind(job_id)
            .bind(vendor_org_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_live_offer(
        &self,
        job_id: Uuid,
        vendor_org_id: Uuid,
    ) -> Result<Option<JobOffer>, Error> {
        let query = format!(
            r#"
            SELECT {OFFER_COLUMNS}
            FROM job_offers
            WHERE job_id = $1 AND vendor_org_id = $2
              AND status IN ('submitted', 'accepted')
            LIMIT 1
            "#
        );

        sqlx::query_as::<_, JobOffer>(&query)
            .bind(job_id)
            .bind(vendor_org_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_offer_status_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer_id: Uuid,
        status: OfferStatus,
    ) -> Result<JobOffer, Error> {
        let query = format!(
            r#"
            UPDATE job_offers
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {OFFER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, JobOffer>(&query)
            .bind(offer_id)
            .bind(status)
            .fetch_one(&mut **tx)
            .await
    }
}
