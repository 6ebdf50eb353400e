use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::contact_messages::{ContactMessageEntity, InsertContactMessageEntity};

#[async_trait]
#[automock]
pub trait ContactMessageRepository {
    async fn submit(
        &self,
        insert_message_entity: InsertContactMessageEntity,
    ) -> Result<ContactMessageEntity>;
    async fn list(&self, status: Option<String>) -> Result<Vec<ContactMessageEntity>>;
    async fn list_recent(&self, limit: i64) -> Result<Vec<ContactMessageEntity>>;
    async fn update_status(
        &self,
        message_id: Uuid,
        status: String,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<ContactMessageEntity>>;
    async fn delete(&self, message_id: Uuid) -> Result<bool>;
    async fn count(&self, status: Option<String>) -> Result<i64>;
}
