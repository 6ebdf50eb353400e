use anyhow::Result;
use async_trait::async_trait;
use diesel::{Connection, RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{
        errors::{map_missing_parent, map_unique_violation},
        postgres_connection::PgPoolSquad,
        schema::{pie_tracking, pie_tracking_events},
    },
};
use domain::{
    entities::{
        shipment_events::{InsertShipmentEventEntity, ShipmentEventEntity},
        shipments::{InsertShipmentEntity, ShipmentEntity, UpdateShipmentEntity},
    },
    repositories::shipments::ShipmentRepository,
};

const TRACKING_NUMBER: &str = "tracking number";
const SHIPMENT: &str = "shipment";

pub struct ShipmentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ShipmentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ShipmentRepository for ShipmentPostgres {
    async fn find_by_tracking_number(
        &self,
        tracking_number: &str,
    ) -> Result<Option<ShipmentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = pie_tracking::table
            .filter(pie_tracking::tracking_number.eq(tracking_number))
            .select(ShipmentEntity::as_select())
            .first::<ShipmentEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_id(&self, shipment_id: Uuid) -> Result<Option<ShipmentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = pie_tracking::table
            .find(shipment_id)
            .select(ShipmentEntity::as_select())
            .first::<ShipmentEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_all(&self) -> Result<Vec<ShipmentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = pie_tracking::table
            .order(pie_tracking::created_at.desc())
            .select(ShipmentEntity::as_select())
            .load::<ShipmentEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_recently_updated(&self, limit: i64) -> Result<Vec<ShipmentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = pie_tracking::table
            .order(pie_tracking::updated_at.desc())
            .limit(limit)
            .select(ShipmentEntity::as_select())
            .load::<ShipmentEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_events(&self, shipment_id: Uuid) -> Result<Vec<ShipmentEventEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = pie_tracking_events::table
            .filter(pie_tracking_events::tracking_id.eq(shipment_id))
            .order((
                pie_tracking_events::event_date.desc(),
                pie_tracking_events::event_time.desc(),
            ))
            .select(ShipmentEventEntity::as_select())
            .load::<ShipmentEventEntity>(&mut conn)?;

        Ok(results)
    }

    async fn create(&self, insert_shipment_entity: InsertShipmentEntity) -> Result<ShipmentEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(pie_tracking::table)
            .values(&insert_shipment_entity)
            .returning(ShipmentEntity::as_returning())
            .get_result::<ShipmentEntity>(&mut conn)
            .map_err(|err| map_unique_violation(err, TRACKING_NUMBER))?;

        Ok(result)
    }

    async fn update(
        &self,
        shipment_id: Uuid,
        update_shipment_entity: UpdateShipmentEntity,
    ) -> Result<Option<ShipmentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(pie_tracking::table.find(shipment_id))
            .set(&update_shipment_entity)
            .returning(ShipmentEntity::as_returning())
            .get_result::<ShipmentEntity>(&mut conn)
            .optional()
            .map_err(|err| map_unique_violation(err, TRACKING_NUMBER))?;

        Ok(result)
    }

    async fn delete(&self, shipment_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(pie_tracking::table.find(shipment_id)).execute(&mut conn)?;

        Ok(deleted > 0)
    }

    async fn add_event(
        &self,
        insert_event_entity: InsertShipmentEventEntity,
    ) -> Result<ShipmentEventEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = conn.transaction::<ShipmentEventEntity, diesel::result::Error, _>(|tx| {
            let event = insert_into(pie_tracking_events::table)
                .values(&insert_event_entity)
                .returning(ShipmentEventEntity::as_returning())
                .get_result::<ShipmentEventEntity>(tx)?;

            // Last write wins: the record mirrors the newest insert, not the
            // chronologically latest event.
            let updated = update(pie_tracking::table.find(insert_event_entity.tracking_id))
                .set((
                    pie_tracking::status.eq(insert_event_entity.status.clone()),
                    pie_tracking::current_location
                        .eq(Some(insert_event_entity.location.clone())),
                    pie_tracking::updated_at.eq(insert_event_entity.created_at),
                ))
                .execute(tx)?;

            if updated == 0 {
                return Err(diesel::result::Error::NotFound);
            }

            Ok(event)
        })
        .map_err(|err| map_missing_parent(err, SHIPMENT))?;

        Ok(result)
    }

    async fn count(&self, status: Option<String>) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = match status {
            Some(status) => pie_tracking::table
                .filter(pie_tracking::status.eq(status))
                .count()
                .get_result::<i64>(&mut conn)?,
            None => pie_tracking::table.count().get_result::<i64>(&mut conn)?,
        };

        Ok(total)
    }
}
