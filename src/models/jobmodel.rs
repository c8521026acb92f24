use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::{BigDecimal, Json};
use uuid::Uuid;

use crate::models::servicemodel::ServiceType;
use crate::utils::geo::Ring;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "job_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    Assigned,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn to_str(&self) -> &str {
        match self {
            JobStatus::Open => "open",
            JobStatus::Assigned => "assigned",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

/// A buyer's posted service request awaiting vendor offers.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub buyer_org_id: Uuid,
    pub field_id: Option<Uuid>,
    pub service_type: ServiceType,
    pub title: String,
    pub notes: Option<String>,
    pub boundary: Json<Vec<Ring>>,
    pub area_ha: f64,
    pub centroid_lat: f64,
    pub centroid_lon: f64,
    pub region: String,
    pub window_start: Option<DateTime<Utc>>,
    pub window_end: Option<DateTime<Utc>>,
    pub status: Option<JobStatus>, // Database has DEFAULT 'open', can be NULL
    pub assigned_org_id: Option<Uuid>,
    pub accepted_price: Option<BigDecimal>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
