use std::sync::Arc;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, jobdb::JobExt, offerdb::OfferExt, operatordb::OperatorExt},
    dtos::offerdtos::CreateOfferDto,
    models::{
        jobmodel::{Job, JobStatus},
        offermodel::{JobOffer, OfferStatus},
        orgmodel::Organization,
    },
    service::error::ServiceError,
    utils::money,
};

/// Owns the offer lifecycle. All status changes go through the transition
/// table on `OfferStatus`; accept and complete also move the parent job and
/// run inside a single transaction.
#[derive(Debug, Clone)]
pub struct OfferService {
    db_client: Arc<DBClient>,
}

impl OfferService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn submit_offer(
        &self,
        vendor_org: &Organization,
        job_id: Uuid,
        body: CreateOfferDto,
    ) -> Result<JobOffer, ServiceError> {
        if !vendor_org.org_type.is_supplier() {
            return Err(ServiceError::Forbidden(
                "Only vendor or operator orgs can submit offers".to_string(),
            ));
        }

        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.buyer_org_id == vendor_org.id {
            return Err(ServiceError::Validation(
                "Cannot submit an offer on your own job".to_string(),
            ));
        }

        let status = job.status.unwrap_or(JobStatus::Open);
        if status != JobStatus::Open {
            return Err(ServiceError::InvalidJobStatus(job_id, status));
        }

        if let Some(existing) = self.db_client.get_live_offer(job_id, vendor_org.id).await? {
            return Err(ServiceError::Validation(format!(
                "Org already has a live offer {} on this job",
                existing.id
            )));
        }

        let offer = self
            .db_client
            .create_offer(
                job_id,
                vendor_org.id,
                money::to_bigdecimal(body.price),
                body.estimated_days,
                body.message,
            )
            .await?;

        tracing::info!(offer_id = %offer.id, job_id = %job_id, "offer submitted");
        Ok(offer)
    }

    /// Buyer accepts a submitted offer; the job becomes assigned to the
    /// offer's vendor at the offered price.
    pub async fn accept_offer(
        &self,
        caller_org_id: Uuid,
        offer_id: Uuid,
    ) -> Result<(JobOffer, Job), ServiceError> {
        let offer = self.get_offer(offer_id).await?;
        let job = self
            .db_client
            .get_job_by_id(offer.job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(offer.job_id))?;

        if job.buyer_org_id != caller_org_id {
            return Err(ServiceError::UnauthorizedOfferAccess(caller_org_id, offer_id));
        }

        let job_status = job.status.unwrap_or(JobStatus::Open);
        if job_status != JobStatus::Open {
            return Err(ServiceError::InvalidJobStatus(job.id, job_status));
        }

        self.check_transition(&offer, OfferStatus::Accepted)?;

        let mut tx = self.db_client.pool.begin().await?;
        let updated_offer = self
            .db_client
            .update_offer_status_tx(&mut tx, offer_id, OfferStatus::Accepted)
            .await?;
        // The guarded UPDATE is the arbiter under concurrency: if a rival
        // accept assigned the job first, this returns None and the offer
        // update above rolls back with the dropped transaction.
        let updated_job = self
            .db_client
            .assign_job_tx(&mut tx, job.id, offer.vendor_org_id, offer.price.clone())
            .await?
            .ok_or(ServiceError::InvalidJobStatus(job.id, JobStatus::Assigned))?;
        tx.commit().await?;

        tracing::info!(offer_id = %offer_id, job_id = %job.id, "offer accepted");
        Ok((updated_offer, updated_job))
    }

    pub async fn withdraw_offer(
        &self,
        caller_org_id: Uuid,
        offer_id: Uuid,
    ) -> Result<JobOffer, ServiceError> {
        let offer = self.get_offer(offer_id).await?;

        if offer.vendor_org_id != caller_org_id {
            return Err(ServiceError::UnauthorizedOfferAccess(caller_org_id, offer_id));
        }

        self.check_transition(&offer, OfferStatus::Withdrawn)?;

        let mut tx = self.db_client.pool.begin().await?;
        let updated = self
            .db_client
            .update_offer_status_tx(&mut tx, offer_id, OfferStatus::Withdrawn)
            .await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Either party closes out an accepted offer once the flight is done.
    pub async fn complete_offer(
        &self,
        caller_org_id: Uuid,
        offer_id: Uuid,
    ) -> Result<(JobOffer, Job), ServiceError> {
        let offer = self.get_offer(offer_id).await?;
        let job = self
            .db_client
            .get_job_by_id(offer.job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(offer.job_id))?;

        if caller_org_id != offer.vendor_org_id && caller_org_id != job.buyer_org_id {
            return Err(ServiceError::UnauthorizedOfferAccess(caller_org_id, offer_id));
        }

        self.check_transition(&offer, OfferStatus::Completed)?;

        let mut tx = self.db_client.pool.begin().await?;
        let updated_offer = self
            .db_client
            .update_offer_status_tx(&mut tx, offer_id, OfferStatus::Completed)
            .await?;
        let updated_job = self
            .db_client
            .complete_job_tx(&mut tx, job.id)
            .await?
            .ok_or(ServiceError::InvalidJobStatus(job.id, JobStatus::Completed))?;
        // Operator orgs without a flight profile simply skip the counter
        self.db_client
            .increment_completed_jobs_tx(&mut tx, offer.vendor_org_id)
            .await?;
        tx.commit().await?;

        tracing::info!(offer_id = %offer_id, job_id = %job.id, "offer completed");
        Ok((updated_offer, updated_job))
    }

    async fn get_offer(&self, offer_id: Uuid) -> Result<JobOffer, ServiceError> {
        self.db_client
            .get_offer_by_id(offer_id)
            .await?
            .ok_or(ServiceError::OfferNotFound(offer_id))
    }

    fn check_transition(&self, offer: &JobOffer, to: OfferStatus) -> Result<(), ServiceError> {
        let from = offer.status.unwrap_or(OfferStatus::Submitted);
        if !from.can_transition(to) {
            return Err(ServiceError::InvalidOfferTransition {
                offer_id: offer.id,
                from,
                to,
            });
        }
        Ok(())
    }
}
