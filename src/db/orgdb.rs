use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::orgmodel::{Organization, User};

#[async_trait]
pub trait OrgExt {
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, Error>;

    async fn get_organization(&self, org_id: Uuid) -> Result<Option<Organization>, Error>;
}

#[async_trait]
impl OrgExt for DBClient {
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, org_id, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_organization(&self, org_id: Uuid) -> Result<Option<Organization>, Error> {
        sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, org_type, region, contact_email, created_at, updated_at
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(org_id)
        .fetch_optional(&self.pool)
        .await
    }
}
