use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::admins::{AdminEntity, InsertAdminEntity, UpdateAdminEntity};

#[async_trait]
#[automock]
pub trait AdminRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminEntity>>;
    async fn find_by_id(&self, admin_id: Uuid) -> Result<Option<AdminEntity>>;
    async fn list_all(&self) -> Result<Vec<AdminEntity>>;
    async fn create(&self, insert_admin_entity: InsertAdminEntity) -> Result<AdminEntity>;
    async fn update(
        &self,
        admin_id: Uuid,
        update_admin_entity: UpdateAdminEntity,
    ) -> Result<Option<AdminEntity>>;
    async fn update_password(
        &self,
        admin_id: Uuid,
        password_hash: String,
        updated_at: DateTime<Utc>,
    ) -> Result<bool>;
    async fn record_login(&self, admin_id: Uuid, logged_in_at: DateTime<Utc>) -> Result<()>;
    async fn delete(&self, admin_id: Uuid) -> Result<bool>;
    async fn count(&self, is_active: Option<bool>) -> Result<i64>;
}
