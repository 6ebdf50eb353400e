use std::sync::Arc;

use chrono::Utc;
use crates::domain::{
    errors::StoreError,
    repositories::shipments::ShipmentRepository,
    value_objects::{
        shipments::{
            InsertShipmentEventModel, InsertShipmentModel, ShipmentDto, TrackingEventDto,
            UpdateShipmentModel,
        },
        tracking::{TrackingDetailsDto, sort_events_latest_first},
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ShipmentError {
    #[error("shipment not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("tracking number already exists")]
    DuplicateTrackingNumber,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type UseCaseResult<T> = std::result::Result<T, ShipmentError>;

pub struct ShipmentUseCase<S>
where
    S: ShipmentRepository + Send + Sync + 'static,
{
    shipment_repository: Arc<S>,
}

impl<S> ShipmentUseCase<S>
where
    S: ShipmentRepository + Send + Sync + 'static,
{
    pub fn new(shipment_repository: Arc<S>) -> Self {
        Self {
            shipment_repository,
        }
    }

    pub async fn list(&self) -> UseCaseResult<Vec<ShipmentDto>> {
        let shipments = self.shipment_repository.list_all().await.map_err(|err| {
            error!(db_error = ?err, "shipments: failed to list shipments");
            ShipmentError::Internal(err)
        })?;
        info!(count = shipments.len(), "shipments: listed");
        Ok(shipments.into_iter().map(ShipmentDto::from).collect())
    }

    pub async fn get(&self, shipment_id: Uuid) -> UseCaseResult<TrackingDetailsDto> {
        let shipment = self
            .shipment_repository
            .find_by_id(shipment_id)
            .await?
            .ok_or(ShipmentError::NotFound)?;
        let events = self.shipment_repository.list_events(shipment_id).await?;
        Ok(TrackingDetailsDto::from_entities(shipment, events))
    }

    pub async fn create(&self, model: InsertShipmentModel) -> UseCaseResult<ShipmentDto> {
        let entity = model
            .to_entity(Utc::now())
            .map_err(|err| ShipmentError::Validation(err.to_string()))?;
        let tracking_number = entity.tracking_number.clone();

        let created = self
            .shipment_repository
            .create(entity)
            .await
            .map_err(|err| duplicate_or_internal(err, &tracking_number))?;

        info!(
            shipment_id = %created.id,
            tracking_number = %created.tracking_number,
            "shipments: created"
        );
        Ok(ShipmentDto::from(created))
    }

    pub async fn update(
        &self,
        shipment_id: Uuid,
        model: UpdateShipmentModel,
    ) -> UseCaseResult<ShipmentDto> {
        let entity = model
            .to_entity(Utc::now())
            .map_err(|err| ShipmentError::Validation(err.to_string()))?;
        let tracking_number = entity.tracking_number.clone().unwrap_or_default();

        let updated = self
            .shipment_repository
            .update(shipment_id, entity)
            .await
            .map_err(|err| duplicate_or_internal(err, &tracking_number))?
            .ok_or(ShipmentError::NotFound)?;

        info!(%shipment_id, status = %updated.status, "shipments: updated");
        Ok(ShipmentDto::from(updated))
    }

    pub async fn delete(&self, shipment_id: Uuid) -> UseCaseResult<()> {
        if !self.shipment_repository.delete(shipment_id).await? {
            return Err(ShipmentError::NotFound);
        }
        info!(%shipment_id, "shipments: deleted with its events");
        Ok(())
    }

    pub async fn list_events(&self, shipment_id: Uuid) -> UseCaseResult<Vec<TrackingEventDto>> {
        self.ensure_exists(shipment_id).await?;
        let mut events = self.shipment_repository.list_events(shipment_id).await?;
        sort_events_latest_first(&mut events);
        Ok(events.into_iter().map(TrackingEventDto::from).collect())
    }

    /// The new event's status and location become the record's current ones,
    /// whatever the event's own date.
    pub async fn add_event(
        &self,
        shipment_id: Uuid,
        model: InsertShipmentEventModel,
    ) -> UseCaseResult<TrackingEventDto> {
        let entity = model
            .to_entity(shipment_id, Utc::now())
            .map_err(|err| ShipmentError::Validation(err.to_string()))?;
        self.ensure_exists(shipment_id).await?;

        let event = self
            .shipment_repository
            .add_event(entity)
            .await
            .map_err(|err| {
                if StoreError::is_missing(&err) {
                    warn!(%shipment_id, "shipments: record removed before event was appended");
                    return ShipmentError::NotFound;
                }
                error!(%shipment_id, db_error = ?err, "shipments: failed to append event");
                ShipmentError::Internal(err)
            })?;

        info!(
            %shipment_id,
            event_id = %event.id,
            status = %event.status,
            "shipments: event appended"
        );
        Ok(TrackingEventDto::from(event))
    }

    async fn ensure_exists(&self, shipment_id: Uuid) -> UseCaseResult<()> {
        match self.shipment_repository.find_by_id(shipment_id).await? {
            Some(_) => Ok(()),
            None => Err(ShipmentError::NotFound),
        }
    }
}

fn duplicate_or_internal(err: anyhow::Error, tracking_number: &str) -> ShipmentError {
    if StoreError::is_duplicate(&err) {
        warn!(tracking_number, "shipments: tracking number already in use");
        ShipmentError::DuplicateTrackingNumber
    } else {
        error!(db_error = ?err, "shipments: write failed");
        ShipmentError::Internal(err)
    }
}
