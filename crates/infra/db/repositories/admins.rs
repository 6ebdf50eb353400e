use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{
        errors::map_unique_violation, postgres_connection::PgPoolSquad, schema::admins,
    },
};
use domain::{
    entities::admins::{AdminEntity, InsertAdminEntity, UpdateAdminEntity},
    repositories::admins::AdminRepository,
};

const EMAIL: &str = "email";

pub struct AdminPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AdminPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AdminRepository for AdminPostgres {
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = admins::table
            .filter(admins::email.eq(email))
            .select(AdminEntity::as_select())
            .first::<AdminEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_id(&self, admin_id: Uuid) -> Result<Option<AdminEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = admins::table
            .find(admin_id)
            .select(AdminEntity::as_select())
            .first::<AdminEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_all(&self) -> Result<Vec<AdminEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = admins::table
            .order(admins::created_at.desc())
            .select(AdminEntity::as_select())
            .load::<AdminEntity>(&mut conn)?;

        Ok(results)
    }

    async fn create(&self, insert_admin_entity: InsertAdminEntity) -> Result<AdminEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(admins::table)
            .values(&insert_admin_entity)
            .returning(AdminEntity::as_returning())
            .get_result::<AdminEntity>(&mut conn)
            .map_err(|err| map_unique_violation(err, EMAIL))?;

        Ok(result)
    }

    async fn update(
        &self,
        admin_id: Uuid,
        update_admin_entity: UpdateAdminEntity,
    ) -> Result<Option<AdminEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(admins::table.find(admin_id))
            .set(&update_admin_entity)
            .returning(AdminEntity::as_returning())
            .get_result::<AdminEntity>(&mut conn)
            .optional()
            .map_err(|err| map_unique_violation(err, EMAIL))?;

        Ok(result)
    }

    async fn update_password(
        &self,
        admin_id: Uuid,
        password_hash: String,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let updated = update(admins::table.find(admin_id))
            .set((
                admins::password_hash.eq(password_hash),
                admins::updated_at.eq(updated_at),
            ))
            .execute(&mut conn)?;

        Ok(updated > 0)
    }

    async fn record_login(&self, admin_id: Uuid, logged_in_at: DateTime<Utc>) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(admins::table.find(admin_id))
            .set(admins::last_login.eq(Some(logged_in_at)))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn delete(&self, admin_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(admins::table.find(admin_id)).execute(&mut conn)?;

        Ok(deleted > 0)
    }

    async fn count(&self, is_active: Option<bool>) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = match is_active {
            Some(is_active) => admins::table
                .filter(admins::is_active.eq(is_active))
                .count()
                .get_result::<i64>(&mut conn)?,
            None => admins::table.count().get_result::<i64>(&mut conn)?,
        };

        Ok(total)
    }
}
