use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::{
    shipment_events::{InsertShipmentEventEntity, ShipmentEventEntity},
    shipments::{InsertShipmentEntity, ShipmentEntity, UpdateShipmentEntity},
};

#[async_trait]
#[automock]
pub trait ShipmentRepository {
    async fn find_by_tracking_number(&self, tracking_number: &str)
    -> Result<Option<ShipmentEntity>>;
    async fn find_by_id(&self, shipment_id: Uuid) -> Result<Option<ShipmentEntity>>;
    async fn list_all(&self) -> Result<Vec<ShipmentEntity>>;
    async fn list_recently_updated(&self, limit: i64) -> Result<Vec<ShipmentEntity>>;
    async fn list_events(&self, shipment_id: Uuid) -> Result<Vec<ShipmentEventEntity>>;
    async fn create(&self, insert_shipment_entity: InsertShipmentEntity) -> Result<ShipmentEntity>;
    async fn update(
        &self,
        shipment_id: Uuid,
        update_shipment_entity: UpdateShipmentEntity,
    ) -> Result<Option<ShipmentEntity>>;
    async fn delete(&self, shipment_id: Uuid) -> Result<bool>;
    /// Inserts the event and copies its status and location onto the parent
    /// record in one transaction.
    async fn add_event(
        &self,
        insert_event_entity: InsertShipmentEventEntity,
    ) -> Result<ShipmentEventEntity>;
    async fn count(&self, status: Option<String>) -> Result<i64>;
}
