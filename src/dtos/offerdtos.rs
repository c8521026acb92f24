use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::offermodel::{JobOffer, OfferStatus};
use crate::utils::money;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateOfferDto {
    #[validate(range(min = 0.01, message = "Price must be positive"))]
    pub price: f64,

    #[validate(range(min = 1, max = 365, message = "Estimated days must be between 1 and 365"))]
    pub estimated_days: i32,

    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OfferResponseDto {
    pub id: Uuid,
    pub job_id: Uuid,
    pub vendor_org_id: Uuid,
    pub price: f64,
    pub estimated_days: i32,
    pub message: String,
    pub status: OfferStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<JobOffer> for OfferResponseDto {
    fn from(offer: JobOffer) -> Self {
        OfferResponseDto {
            id: offer.id,
            job_id: offer.job_id,
            vendor_org_id: offer.vendor_org_id,
            price: money::to_f64(&offer.price),
            estimated_days: offer.estimated_days,
            message: offer.message,
            status: offer.status.unwrap_or(OfferStatus::Submitted),
            created_at: offer.created_at,
            updated_at: offer.updated_at,
        }
    }
}
