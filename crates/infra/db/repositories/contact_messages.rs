use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::pie_contact_messages},
};
use domain::{
    entities::contact_messages::{ContactMessageEntity, InsertContactMessageEntity},
    repositories::contact_messages::ContactMessageRepository,
};

pub struct ContactMessagePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ContactMessagePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ContactMessageRepository for ContactMessagePostgres {
    async fn submit(
        &self,
        insert_message_entity: InsertContactMessageEntity,
    ) -> Result<ContactMessageEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(pie_contact_messages::table)
            .values(&insert_message_entity)
            .returning(ContactMessageEntity::as_returning())
            .get_result::<ContactMessageEntity>(&mut conn)?;

        Ok(result)
    }

    async fn list(&self, status: Option<String>) -> Result<Vec<ContactMessageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = pie_contact_messages::table
            .order(pie_contact_messages::created_at.desc())
            .select(ContactMessageEntity::as_select())
            .into_boxed();

        if let Some(status) = status {
            query = query.filter(pie_contact_messages::status.eq(status));
        }

        let results = query.load::<ContactMessageEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<ContactMessageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = pie_contact_messages::table
            .order(pie_contact_messages::created_at.desc())
            .limit(limit)
            .select(ContactMessageEntity::as_select())
            .load::<ContactMessageEntity>(&mut conn)?;

        Ok(results)
    }

    async fn update_status(
        &self,
        message_id: Uuid,
        status: String,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<ContactMessageEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(pie_contact_messages::table.find(message_id))
            .set((
                pie_contact_messages::status.eq(status),
                pie_contact_messages::updated_at.eq(updated_at),
            ))
            .returning(ContactMessageEntity::as_returning())
            .get_result::<ContactMessageEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete(&self, message_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(pie_contact_messages::table.find(message_id)).execute(&mut conn)?;

        Ok(deleted > 0)
    }

    async fn count(&self, status: Option<String>) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = match status {
            Some(status) => pie_contact_messages::table
                .filter(pie_contact_messages::status.eq(status))
                .count()
                .get_result::<i64>(&mut conn)?,
            None => pie_contact_messages::table
                .count()
                .get_result::<i64>(&mut conn)?,
        };

        Ok(total)
    }
}
