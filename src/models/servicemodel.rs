use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "service_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Spraying,
    Spreading,
    Mapping,
    Scouting,
    Seeding,
}

impl ServiceType {
    pub fn to_str(&self) -> &str {
        match self {
            ServiceType::Spraying => "spraying",
            ServiceType::Spreading => "spreading",
            ServiceType::Mapping => "mapping",
            ServiceType::Scouting => "scouting",
            ServiceType::Seeding => "seeding",
        }
    }
}
