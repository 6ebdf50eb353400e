use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    entities::{contact_messages::ContactMessageEntity, shipments::ShipmentEntity},
    value_objects::enums::activity_types::ActivityType,
};

/// How many rows each source contributes before merging.
pub const RECENT_ACTIVITY_SOURCE_LIMIT: i64 = 5;
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntryDto {
    pub id: Uuid,
    pub action: String,
    pub user: String,
    /// Serialized as RFC 3339; display formatting belongs to the client.
    pub time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ActivityType,
}

impl From<ContactMessageEntity> for ActivityEntryDto {
    fn from(value: ContactMessageEntity) -> Self {
        Self {
            id: value.id,
            action: "New message received".to_string(),
            user: value.name,
            time: value.created_at,
            kind: ActivityType::Message,
        }
    }
}

impl From<ShipmentEntity> for ActivityEntryDto {
    fn from(value: ShipmentEntity) -> Self {
        Self {
            id: value.id,
            action: format!("Shipment {}", value.status.to_lowercase()),
            user: value.customer_name,
            time: value.updated_at,
            kind: ActivityType::Tracking,
        }
    }
}

/// Newest first by instant, capped at [`RECENT_ACTIVITY_LIMIT`]. The sort is
/// stable, so on equal instants messages stay ahead of shipments.
pub fn merge_recent_activity(
    messages: Vec<ContactMessageEntity>,
    shipments: Vec<ShipmentEntity>,
) -> Vec<ActivityEntryDto> {
    let mut entries: Vec<ActivityEntryDto> = messages
        .into_iter()
        .map(ActivityEntryDto::from)
        .chain(shipments.into_iter().map(ActivityEntryDto::from))
        .collect();

    entries.sort_by(|a, b| b.time.cmp(&a.time));
    entries.truncate(RECENT_ACTIVITY_LIMIT);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 1, 9, 0, 0).unwrap()
    }

    fn message(name: &str, created_at: DateTime<Utc>) -> ContactMessageEntity {
        ContactMessageEntity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name),
            phone: None,
            message: "Need a quote".to_string(),
            status: "unread".to_string(),
            created_at,
            updated_at: created_at,
        }
    }

    fn shipment(customer: &str, status: &str, updated_at: DateTime<Utc>) -> ShipmentEntity {
        ShipmentEntity {
            id: Uuid::new_v4(),
            tracking_number: format!("PIE-{}", customer),
            customer_name: customer.to_string(),
            customer_email: None,
            customer_phone: None,
            origin: "Bangkok".to_string(),
            destination: "Hamburg".to_string(),
            status: status.to_string(),
            current_location: None,
            estimated_delivery: None,
            actual_delivery: None,
            weight: None,
            dimensions: None,
            service_type: "ocean".to_string(),
            created_at: updated_at,
            updated_at,
        }
    }

    #[test]
    fn newer_message_precedes_older_shipment() {
        let feed = merge_recent_activity(
            vec![message("anna", base() + Duration::hours(2))],
            vec![shipment("bo", "In Transit", base())],
        );

        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].kind, ActivityType::Message);
        assert_eq!(feed[0].action, "New message received");
        assert_eq!(feed[1].kind, ActivityType::Tracking);
        assert_eq!(feed[1].action, "Shipment in transit");
        assert_eq!(feed[1].user, "bo");
    }

    #[test]
    fn ordering_uses_instants_across_day_boundaries() {
        // As locale text "12/9/2024, ..." sorts after "12/10/2024, ...".
        let feed = merge_recent_activity(
            vec![message("early", base() + Duration::days(8))],
            vec![shipment("late", "Delivered", base() + Duration::days(9))],
        );
        assert_eq!(feed[0].user, "late");
        assert_eq!(feed[1].user, "early");
    }

    #[test]
    fn feed_is_capped_at_ten_entries() {
        let messages = (0..6)
            .map(|i| message(&format!("m{}", i), base() + Duration::minutes(i)))
            .collect();
        let shipments = (0..6)
            .map(|i| shipment(&format!("s{}", i), "Pending", base() + Duration::seconds(i)))
            .collect();

        let feed = merge_recent_activity(messages, shipments);

        assert_eq!(feed.len(), RECENT_ACTIVITY_LIMIT);
        assert!(feed.windows(2).all(|w| w[0].time >= w[1].time));
    }

    #[test]
    fn equal_instants_keep_messages_first() {
        let feed = merge_recent_activity(
            vec![message("anna", base())],
            vec![shipment("bo", "Pending", base())],
        );
        assert_eq!(feed[0].kind, ActivityType::Message);
    }

    #[test]
    fn entry_serializes_type_discriminator() {
        let entry = ActivityEntryDto::from(message("anna", base()));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "message");
        assert_eq!(json["time"], "2024-12-01T09:00:00Z");
    }
}
