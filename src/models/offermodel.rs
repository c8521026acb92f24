use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "offer_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Submitted,
    Accepted,
    Withdrawn,
    Completed,
}

impl OfferStatus {
    pub fn to_str(&self) -> &str {
        match self {
            OfferStatus::Submitted => "submitted",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Withdrawn => "withdrawn",
            OfferStatus::Completed => "completed",
        }
    }

    /// The offer lifecycle admits exactly three transitions:
    /// submitted -> accepted, submitted -> withdrawn, accepted -> completed.
    pub fn can_transition(&self, next: OfferStatus) -> bool {
        matches!(
            (self, next),
            (OfferStatus::Submitted, OfferStatus::Accepted)
                | (OfferStatus::Submitted, OfferStatus::Withdrawn)
                | (OfferStatus::Accepted, OfferStatus::Completed)
        )
    }

    /// Live offers hold a vendor's slot on a job.
    pub fn is_live(&self) -> bool {
        matches!(self, OfferStatus::Submitted | OfferStatus::Accepted)
    }
}

/// A vendor's priced response to a job.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct JobOffer {
    pub id: Uuid,
    pub job_id: Uuid,
    pub vendor_org_id: Uuid,
    pub price: BigDecimal,
    pub estimated_days: i32,
    pub message: String,
    pub status: Option<OfferStatus>, // Database has DEFAULT 'submitted', can be NULL
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(OfferStatus::Submitted.can_transition(OfferStatus::Accepted));
        assert!(OfferStatus::Submitted.can_transition(OfferStatus::Withdrawn));
        assert!(OfferStatus::Accepted.can_transition(OfferStatus::Completed));
    }

    #[test]
    fn test_illegal_transitions() {
        let all = [
            OfferStatus::Submitted,
            OfferStatus::Accepted,
            OfferStatus::Withdrawn,
            OfferStatus::Completed,
        ];
        let legal = [
            (OfferStatus::Submitted, OfferStatus::Accepted),
            (OfferStatus::Submitted, OfferStatus::Withdrawn),
            (OfferStatus::Accepted, OfferStatus::Completed),
        ];
        for from in all {
            for to in all {
                let expected = legal.contains(&(from, to));
                assert_eq!(from.can_transition(to), expected, "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn test_live_states() {
        assert!(OfferStatus::Submitted.is_live());
        assert!(OfferStatus::Accepted.is_live());
        assert!(!OfferStatus::Withdrawn.is_live());
        assert!(!OfferStatus::Completed.is_live());
    }
}
