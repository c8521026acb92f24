use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::operatormodel::OperatorProfile;
use crate::models::orgmodel::{Organization, OrgType, User, UserRole};
use crate::models::servicemodel::ServiceType;

#[derive(Debug, Serialize, Deserialize)]
pub struct OrgResponseDto {
    pub id: Uuid,
    pub name: String,
    pub org_type: OrgType,
    pub region: String,
    pub contact_email: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Organization> for OrgResponseDto {
    fn from(org: Organization) -> Self {
        OrgResponseDto {
            id: org.id,
            name: org.name,
            org_type: org.org_type,
            region: org.region,
            contact_email: org.contact_email,
            created_at: org.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<User> for UserResponseDto {
    fn from(user: User) -> Self {
        UserResponseDto {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// The authenticated caller's own user and org in one payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponseDto {
    pub user: UserResponseDto,
    pub org: OrgResponseDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OperatorProfileResponseDto {
    pub id: Uuid,
    pub org_id: Uuid,
    pub display_name: String,
    pub service_types: Vec<ServiceType>,
    pub base_lat: f64,
    pub base_lon: f64,
    pub service_radius_km: f64,
    pub rating: f32,
    pub completed_jobs: i32,
    pub is_available: bool,
}

impl From<OperatorProfile> for OperatorProfileResponseDto {
    fn from(profile: OperatorProfile) -> Self {
        OperatorProfileResponseDto {
            id: profile.id,
            org_id: profile.org_id,
            display_name: profile.display_name,
            service_types: profile.service_types.0,
            base_lat: profile.base_lat,
            base_lon: profile.base_lon,
            service_radius_km: profile.service_radius_km,
            rating: profile.rating.unwrap_or(0.0),
            completed_jobs: profile.completed_jobs.unwrap_or(0),
            is_available: profile.is_available.unwrap_or(true),
        }
    }
}
