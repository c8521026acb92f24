use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "org_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrgType {
    Buyer,
    Vendor,
    Operator,
}

impl OrgType {
    pub fn to_str(&self) -> &str {
        match self {
            OrgType::Buyer => "buyer",
            OrgType::Vendor => "vendor",
            OrgType::Operator => "operator",
        }
    }

    /// Vendor and operator orgs both sell services and carry rate cards.
    pub fn is_supplier(&self) -> bool {
        matches!(self, OrgType::Vendor | OrgType::Operator)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Member,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Member => "member",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub org_type: OrgType,
    pub region: String,
    pub contact_email: String,
    pub created_at: Option<DateTime<Utc>>, // Database has DEFAULT NOW(), can be NULL
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub org_id: Uuid,
    pub role: UserRole,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
