use anyhow::Result;
use crates::domain::{
    repositories::shipments::ShipmentRepository, value_objects::tracking::TrackingDetailsDto,
};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum TrackingLookupOutcome {
    Found(TrackingDetailsDto),
    /// No record carries this tracking number. A user input mistake, not a failure.
    NotFound,
}

/// Public lookup of a shipment and its event history by tracking number.
/// Every call is a fresh round trip; nothing is cached.
pub struct TrackingLookupUseCase<S>
where
    S: ShipmentRepository + Send + Sync + 'static,
{
    shipment_repository: Arc<S>,
}

impl<S> TrackingLookupUseCase<S>
where
    S: ShipmentRepository + Send + Sync + 'static,
{
    pub fn new(shipment_repository: Arc<S>) -> Self {
        Self {
            shipment_repository,
        }
    }

    /// `tracking_number` is expected to be normalized already.
    pub async fn lookup(&self, tracking_number: &str) -> Result<TrackingLookupOutcome> {
        let Some(shipment) = self
            .shipment_repository
            .find_by_tracking_number(tracking_number)
            .await?
        else {
            info!(tracking_number, "tracking_lookup: tracking number not found");
            return Ok(TrackingLookupOutcome::NotFound);
        };

        let events = self.shipment_repository.list_events(shipment.id).await?;
        debug!(
            tracking_number,
            shipment_id = %shipment.id,
            events = events.len(),
            "tracking_lookup: shipment found"
        );

        Ok(TrackingLookupOutcome::Found(TrackingDetailsDto::from_entities(
            shipment, events,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use crates::domain::{
        entities::{shipment_events::ShipmentEventEntity, shipments::ShipmentEntity},
        repositories::shipments::MockShipmentRepository,
    };
    use mockall::predicate::eq;
    use uuid::Uuid;

    pub(crate) fn sample_shipment(tracking_number: &str) -> ShipmentEntity {
        let now = Utc::now();
        ShipmentEntity {
            id: Uuid::new_v4(),
            tracking_number: tracking_number.to_string(),
            customer_name: "Siam Textiles".to_string(),
            customer_email: Some("logistics@siamtextiles.example".to_string()),
            customer_phone: None,
            origin: "Bangkok".to_string(),
            destination: "Rotterdam".to_string(),
            status: "In Transit".to_string(),
            current_location: Some("Singapore".to_string()),
            estimated_delivery: NaiveDate::from_ymd_opt(2024, 4, 2),
            actual_delivery: None,
            weight: Some(1800.0),
            dimensions: Some("20ft container".to_string()),
            service_type: "ocean".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_event(shipment_id: Uuid, day: u32, hour: u32) -> ShipmentEventEntity {
        ShipmentEventEntity {
            id: Uuid::new_v4(),
            tracking_id: shipment_id,
            event_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            event_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            location: "Port Klang".to_string(),
            status: "In Transit".to_string(),
            description: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn returns_record_with_events_latest_first() {
        let shipment = sample_shipment("ABC123");
        let shipment_id = shipment.id;
        let events = vec![
            sample_event(shipment_id, 1, 9),
            sample_event(shipment_id, 3, 8),
            sample_event(shipment_id, 3, 17),
        ];

        let mut shipment_repo = MockShipmentRepository::new();
        shipment_repo
            .expect_find_by_tracking_number()
            .withf(|tracking_number| tracking_number == "ABC123")
            .times(1)
            .returning(move |_| {
                let shipment = shipment.clone();
                Box::pin(async move { Ok(Some(shipment)) })
            });
        shipment_repo
            .expect_list_events()
            .with(eq(shipment_id))
            .times(1)
            .returning(move |_| {
                let events = events.clone();
                Box::pin(async move { Ok(events) })
            });

        let usecase = TrackingLookupUseCase::new(Arc::new(shipment_repo));
        let outcome = usecase.lookup("ABC123").await.unwrap();

        let TrackingLookupOutcome::Found(details) = outcome else {
            panic!("expected shipment to be found");
        };
        assert_eq!(details.tracking.id, shipment_id);
        assert_eq!(details.events.len(), 3);
        let order: Vec<_> = details
            .events
            .iter()
            .map(|e| (e.event_date.to_string(), e.event_time.to_string()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("2024-03-03".to_string(), "17:00:00".to_string()),
                ("2024-03-03".to_string(), "08:00:00".to_string()),
                ("2024-03-01".to_string(), "09:00:00".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_tracking_number_is_not_found_not_error() {
        let mut shipment_repo = MockShipmentRepository::new();
        shipment_repo
            .expect_find_by_tracking_number()
            .returning(|_| Box::pin(async { Ok(None) }));
        shipment_repo.expect_list_events().never();

        let usecase = TrackingLookupUseCase::new(Arc::new(shipment_repo));
        let outcome = usecase.lookup("ABC123").await.unwrap();

        assert_eq!(outcome, TrackingLookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn backend_failure_is_an_error() {
        let mut shipment_repo = MockShipmentRepository::new();
        shipment_repo
            .expect_find_by_tracking_number()
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("connection reset")) }));

        let usecase = TrackingLookupUseCase::new(Arc::new(shipment_repo));

        assert!(usecase.lookup("ABC123").await.is_err());
    }

    #[tokio::test]
    async fn event_fetch_failure_is_an_error() {
        let shipment = sample_shipment("ABC123");

        let mut shipment_repo = MockShipmentRepository::new();
        shipment_repo
            .expect_find_by_tracking_number()
            .returning(move |_| {
                let shipment = shipment.clone();
                Box::pin(async move { Ok(Some(shipment)) })
            });
        shipment_repo
            .expect_list_events()
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("timeout")) }));

        let usecase = TrackingLookupUseCase::new(Arc::new(shipment_repo));

        assert!(usecase.lookup("ABC123").await.is_err());
    }

    #[tokio::test]
    async fn repeated_lookups_refetch() {
        let mut shipment_repo = MockShipmentRepository::new();
        shipment_repo
            .expect_find_by_tracking_number()
            .times(2)
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = TrackingLookupUseCase::new(Arc::new(shipment_repo));
        usecase.lookup("ABC123").await.unwrap();
        usecase.lookup("ABC123").await.unwrap();
    }
}
