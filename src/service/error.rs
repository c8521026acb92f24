use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::HttpError,
    models::{jobmodel::JobStatus, offermodel::OfferStatus, servicemodel::ServiceType},
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Job {0} not found")]
    JobNotFound(Uuid),

    #[error("Offer {0} not found")]
    OfferNotFound(Uuid),

    #[error("No active rate card for org {org_id} and service {}", .service_type.to_str())]
    RateCardNotFound { org_id: Uuid, service_type: ServiceType },

    #[error("Field {0} not found")]
    FieldNotFound(Uuid),

    #[error("Product {0} not found")]
    ProductNotFound(Uuid),

    #[error("Order {0} not found")]
    OrderNotFound(Uuid),

    #[error("Job {0} cannot be modified in status '{}'", .1.to_str())]
    InvalidJobStatus(Uuid, JobStatus),

    #[error("Offer {offer_id} cannot move from {from:?} to {to:?}")]
    InvalidOfferTransition {
        offer_id: Uuid,
        from: OfferStatus,
        to: OfferStatus,
    },

    #[error("Org {0} is not allowed to perform this action on job {1}")]
    UnauthorizedJobAccess(Uuid, Uuid),

    #[error("Org {0} is not allowed to perform this action on offer {1}")]
    UnauthorizedOfferAccess(Uuid, Uuid),

    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: Uuid,
        requested: i32,
        available: i32,
    },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::JobNotFound(_)
            | ServiceError::OfferNotFound(_)
            | ServiceError::RateCardNotFound { .. }
            | ServiceError::FieldNotFound(_)
            | ServiceError::ProductNotFound(_)
            | ServiceError::OrderNotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::InvalidJobStatus(_, _)
            | ServiceError::InvalidOfferTransition { .. }
            | ServiceError::InsufficientStock { .. }
            | ServiceError::EmptyCart
            | ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::UnauthorizedJobAccess(_, _)
            | ServiceError::UnauthorizedOfferAccess(_, _)
            | ServiceError::Forbidden(_) => HttpError::forbidden(error.to_string()),

            _ => HttpError::server_error(error.to_string()),
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::JobNotFound(_)
            | ServiceError::OfferNotFound(_)
            | ServiceError::RateCardNotFound { .. }
            | ServiceError::FieldNotFound(_)
            | ServiceError::ProductNotFound(_)
            | ServiceError::OrderNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::InvalidJobStatus(_, _)
            | ServiceError::InvalidOfferTransition { .. }
            | ServiceError::InsufficientStock { .. }
            | ServiceError::EmptyCart
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::UnauthorizedJobAccess(_, _)
            | ServiceError::UnauthorizedOfferAccess(_, _)
            | ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lost_accept_race_maps_to_bad_request() {
        // A guarded job update that matched no row surfaces as a 400, not a
        // silent success and not a 500.
        let err = ServiceError::InvalidJobStatus(Uuid::new_v4(), JobStatus::Assigned);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(HttpError::from(err).status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_cross_org_access_maps_to_forbidden() {
        let err = ServiceError::UnauthorizedOfferAccess(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_missing_resources_map_to_not_found() {
        assert_eq!(
            ServiceError::JobNotFound(Uuid::new_v4()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::RateCardNotFound {
                org_id: Uuid::new_v4(),
                service_type: ServiceType::Spraying,
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
