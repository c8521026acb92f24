use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::jobmodel::*;
use crate::models::servicemodel::ServiceType;
use crate::utils::geo::Ring;
use crate::utils::money;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateJobDto {
    pub service_type: ServiceType,

    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,

    /// Either a saved field id or an inline boundary must be supplied.
    pub field_id: Option<Uuid>,
    pub boundary: Option<Vec<Ring>>,

    #[validate(length(min = 1, max = 100, message = "Region is required"))]
    pub region: String,

    pub window_start: Option<DateTime<Utc>>,
    pub window_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SearchJobsDto {
    pub status: Option<JobStatus>,
    pub service_type: Option<ServiceType>,
    pub region: Option<String>,

    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct MatchQueryDto {
    #[validate(range(min = 1, max = 50, message = "Limit must be between 1 and 50"))]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobResponseDto {
    pub id: Uuid,
    pub buyer_org_id: Uuid,
    pub field_id: Option<Uuid>,
    pub service_type: ServiceType,
    pub title: String,
    pub notes: Option<String>,
    pub boundary: Vec<Ring>,
    pub area_ha: f64,
    pub centroid_lat: f64,
    pub centroid_lon: f64,
    pub region: String,
    pub window_start: Option<DateTime<Utc>>,
    pub window_end: Option<DateTime<Utc>>,
    pub status: JobStatus,
    pub assigned_org_id: Option<Uuid>,
    pub accepted_price: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Job> for JobResponseDto {
    fn from(job: Job) -> Self {
        JobResponseDto {
            id: job.id,
            buyer_org_id: job.buyer_org_id,
            field_id: job.field_id,
            service_type: job.service_type,
            title: job.title,
            notes: job.notes,
            boundary: job.boundary.0,
            area_ha: job.area_ha,
            centroid_lat: job.centroid_lat,
            centroid_lon: job.centroid_lon,
            region: job.region,
            window_start: job.window_start,
            window_end: job.window_end,
            status: job.status.unwrap_or(JobStatus::Open),
            assigned_org_id: job.assigned_org_id,
            accepted_price: job.accepted_price.as_ref().map(money::to_f64),
            created_at: job.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }
}

/// SQL OFFSET for a 1-based page, computed in i64 so an absurd page number
/// cannot overflow 32-bit arithmetic.
pub fn page_offset(page: u32, limit: u32) -> i64 {
    (page as i64 - 1) * limit as i64
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub status: String,
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            ((total as f64) / (limit as f64)).ceil() as u32
        };
        Self {
            status: "success".to_string(),
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset_first_page() {
        assert_eq!(page_offset(1, 20), 0);
        assert_eq!(page_offset(2, 20), 20);
    }

    #[test]
    #[allow(arithmetic_overflow)]
    fn test_page_offset_huge_page_does_not_overflow() {
        assert_eq!(page_offset(50_000_000, 100), 4_999_999_900);
        assert_eq!(page_offset(u32::MAX, u32::MAX), (u32::MAX as i64 - 1) * u32::MAX as i64);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let resp = PaginatedResponse::new(vec![1, 2, 3], 41, 1, 20);
        assert_eq!(resp.total_pages, 3);
    }
}
