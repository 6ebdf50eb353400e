use serde::Serialize;

use crate::domain::{
    entities::{shipment_events::ShipmentEventEntity, shipments::ShipmentEntity},
    value_objects::shipments::{ShipmentDto, TrackingEventDto},
};

pub const TRACKING_NOT_FOUND_MESSAGE: &str = "Tracking number not found";
pub const TRACKING_FAILURE_MESSAGE: &str = "Failed to fetch tracking information";

/// Body returned by the public lookup for every outcome: on success `error`
/// is omitted, otherwise `tracking` is null and `events` empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingLookupResponse {
    pub tracking: Option<ShipmentDto>,
    pub events: Vec<TrackingEventDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrackingLookupResponse {
    pub fn found(details: TrackingDetailsDto) -> Self {
        Self {
            tracking: Some(details.tracking),
            events: details.events,
            error: None,
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            tracking: None,
            events: Vec::new(),
            error: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingDetailsDto {
    pub tracking: ShipmentDto,
    pub events: Vec<TrackingEventDto>,
}

impl TrackingDetailsDto {
    pub fn from_entities(shipment: ShipmentEntity, mut events: Vec<ShipmentEventEntity>) -> Self {
        sort_events_latest_first(&mut events);
        Self {
            tracking: ShipmentDto::from(shipment),
            events: events.into_iter().map(TrackingEventDto::from).collect(),
        }
    }
}

/// Orders by event date, then event time, newest first.
pub fn sort_events_latest_first(events: &mut [ShipmentEventEntity]) {
    events.sort_by(|a, b| {
        (b.event_date, b.event_time).cmp(&(a.event_date, a.event_time))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use uuid::Uuid;

    fn event(date: (i32, u32, u32), time: (u32, u32)) -> ShipmentEventEntity {
        ShipmentEventEntity {
            id: Uuid::new_v4(),
            tracking_id: Uuid::nil(),
            event_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            event_time: NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap(),
            location: "Laem Chabang".to_string(),
            status: "In Transit".to_string(),
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn events_sort_by_date_then_time_descending() {
        let mut events = vec![
            event((2024, 3, 1), (8, 0)),
            event((2024, 3, 2), (7, 0)),
            event((2024, 3, 2), (18, 30)),
            event((2024, 2, 28), (23, 59)),
        ];
        sort_events_latest_first(&mut events);

        let keys: Vec<_> = events
            .iter()
            .map(|e| (e.event_date.to_string(), e.event_time.to_string()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2024-03-02".to_string(), "18:30:00".to_string()),
                ("2024-03-02".to_string(), "07:00:00".to_string()),
                ("2024-03-01".to_string(), "08:00:00".to_string()),
                ("2024-02-28".to_string(), "23:59:00".to_string()),
            ]
        );
    }

    #[test]
    fn not_found_body_has_null_tracking_and_error() {
        let body = serde_json::to_value(TrackingLookupResponse::failed(
            TRACKING_NOT_FOUND_MESSAGE,
        ))
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "tracking": null,
                "events": [],
                "error": "Tracking number not found"
            })
        );
    }
}
