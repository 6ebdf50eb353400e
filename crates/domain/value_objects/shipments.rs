use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{
        shipment_events::{InsertShipmentEventEntity, ShipmentEventEntity},
        shipments::{InsertShipmentEntity, ShipmentEntity, UpdateShipmentEntity},
    },
    value_objects::enums::service_types::ServiceType,
};

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_IN_TRANSIT: &str = "In Transit";
pub const STATUS_DELIVERED: &str = "Delivered";

pub const MAX_TRACKING_NUMBER_LEN: usize = 64;

const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";
const EVENT_TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentDto {
    pub id: Uuid,
    pub tracking_number: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub origin: String,
    pub destination: String,
    pub status: String,
    pub current_location: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
    pub actual_delivery: Option<NaiveDate>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub service_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShipmentEntity> for ShipmentDto {
    fn from(value: ShipmentEntity) -> Self {
        Self {
            id: value.id,
            tracking_number: value.tracking_number,
            customer_name: value.customer_name,
            customer_email: value.customer_email,
            customer_phone: value.customer_phone,
            origin: value.origin,
            destination: value.destination,
            status: value.status,
            current_location: value.current_location,
            estimated_delivery: value.estimated_delivery,
            actual_delivery: value.actual_delivery,
            weight: value.weight,
            dimensions: value.dimensions,
            service_type: value.service_type,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingEventDto {
    pub id: Uuid,
    pub tracking_id: Uuid,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub location: String,
    pub status: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ShipmentEventEntity> for TrackingEventDto {
    fn from(value: ShipmentEventEntity) -> Self {
        Self {
            id: value.id,
            tracking_id: value.tracking_id,
            event_date: value.event_date,
            event_time: value.event_time,
            location: value.location,
            status: value.status,
            description: value.description,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertShipmentModel {
    pub tracking_number: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub origin: String,
    pub destination: String,
    pub status: Option<String>,
    pub current_location: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
    pub service_type: ServiceType,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
}

impl InsertShipmentModel {
    pub fn to_entity(&self, now: DateTime<Utc>) -> Result<InsertShipmentEntity> {
        let status = match self.status.as_deref() {
            Some(status) => required("status", status)?,
            None => STATUS_PENDING.to_string(),
        };

        Ok(InsertShipmentEntity {
            tracking_number: normalize_tracking_number(&self.tracking_number)?,
            customer_name: required("customer_name", &self.customer_name)?,
            customer_email: optional(self.customer_email.as_deref()),
            customer_phone: optional(self.customer_phone.as_deref()),
            origin: required("origin", &self.origin)?,
            destination: required("destination", &self.destination)?,
            status,
            current_location: optional(self.current_location.as_deref()),
            estimated_delivery: self.estimated_delivery,
            weight: validate_weight(self.weight)?,
            dimensions: optional(self.dimensions.as_deref()),
            service_type: self.service_type.to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Blank optional text is treated as "not provided"; a partial update cannot
/// null a column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateShipmentModel {
    pub tracking_number: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub status: Option<String>,
    pub current_location: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
    pub actual_delivery: Option<NaiveDate>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub service_type: Option<ServiceType>,
}

impl UpdateShipmentModel {
    pub fn to_entity(&self, now: DateTime<Utc>) -> Result<UpdateShipmentEntity> {
        Ok(UpdateShipmentEntity {
            tracking_number: self
                .tracking_number
                .as_deref()
                .map(normalize_tracking_number)
                .transpose()?,
            customer_name: self
                .customer_name
                .as_deref()
                .map(|v| required("customer_name", v))
                .transpose()?,
            customer_email: optional(self.customer_email.as_deref()),
            customer_phone: optional(self.customer_phone.as_deref()),
            origin: self
                .origin
                .as_deref()
                .map(|v| required("origin", v))
                .transpose()?,
            destination: self
                .destination
                .as_deref()
                .map(|v| required("destination", v))
                .transpose()?,
            status: self
                .status
                .as_deref()
                .map(|v| required("status", v))
                .transpose()?,
            current_location: optional(self.current_location.as_deref()),
            estimated_delivery: self.estimated_delivery,
            actual_delivery: self.actual_delivery,
            weight: validate_weight(self.weight)?,
            dimensions: optional(self.dimensions.as_deref()),
            service_type: self.service_type.map(|v| v.to_string()),
            updated_at: Some(now),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertShipmentEventModel {
    pub event_date: String,
    pub event_time: String,
    pub location: String,
    pub status: String,
    pub description: Option<String>,
}

impl InsertShipmentEventModel {
    pub fn to_entity(
        &self,
        tracking_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<InsertShipmentEventEntity> {
        Ok(InsertShipmentEventEntity {
            tracking_id,
            event_date: parse_event_date(&self.event_date)?,
            event_time: parse_event_time(&self.event_time)?,
            location: required("location", &self.location)?,
            status: required("status", &self.status)?,
            description: optional(self.description.as_deref()),
            created_at: now,
        })
    }
}

pub fn normalize_tracking_number(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("tracking_number must not be empty");
    }
    if trimmed.len() > MAX_TRACKING_NUMBER_LEN {
        bail!("tracking_number is too long");
    }
    if trimmed.chars().any(|c| c.is_control()) {
        bail!("tracking_number contains control characters");
    }
    Ok(trimmed.to_string())
}

pub fn parse_event_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), EVENT_DATE_FORMAT)
        .map_err(|_| anyhow!("event_date must be formatted as YYYY-MM-DD"))
}

pub fn parse_event_time(raw: &str) -> Result<NaiveTime> {
    let trimmed = raw.trim();
    EVENT_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| anyhow!("event_time must be formatted as HH:MM or HH:MM:SS"))
}

pub(crate) fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        bail!("{} must not be empty", field);
    }
    Ok(trimmed.to_string())
}

pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn validate_weight(weight: Option<f64>) -> Result<Option<f64>> {
    match weight {
        Some(w) if !w.is_finite() || w < 0.0 => bail!("weight must be a non-negative number"),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert_model() -> InsertShipmentModel {
        InsertShipmentModel {
            tracking_number: "  PIE-0001 ".to_string(),
            customer_name: "Somchai".to_string(),
            customer_email: Some("".to_string()),
            customer_phone: None,
            origin: "Bangkok".to_string(),
            destination: "Rotterdam".to_string(),
            status: None,
            current_location: None,
            estimated_delivery: None,
            service_type: ServiceType::Ocean,
            weight: Some(1250.5),
            dimensions: None,
        }
    }

    #[test]
    fn insert_model_defaults_status_and_trims() {
        let now = Utc::now();
        let entity = insert_model().to_entity(now).unwrap();
        assert_eq!(entity.tracking_number, "PIE-0001");
        assert_eq!(entity.status, STATUS_PENDING);
        assert_eq!(entity.customer_email, None);
        assert_eq!(entity.service_type, "ocean");
        assert_eq!(entity.created_at, now);
    }

    #[test]
    fn insert_model_rejects_blank_required_fields() {
        let mut model = insert_model();
        model.origin = "   ".to_string();
        assert!(model.to_entity(Utc::now()).is_err());

        let mut model = insert_model();
        model.tracking_number = String::new();
        assert!(model.to_entity(Utc::now()).is_err());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut model = insert_model();
        model.weight = Some(-1.0);
        assert!(model.to_entity(Utc::now()).is_err());
    }

    #[test]
    fn update_model_only_sets_given_fields() {
        let now = Utc::now();
        let model = UpdateShipmentModel {
            status: Some(STATUS_IN_TRANSIT.to_string()),
            dimensions: Some(" ".to_string()),
            ..Default::default()
        };
        let entity = model.to_entity(now).unwrap();
        assert_eq!(entity.status.as_deref(), Some(STATUS_IN_TRANSIT));
        assert_eq!(entity.dimensions, None);
        assert_eq!(entity.origin, None);
        assert_eq!(entity.updated_at, Some(now));
    }

    #[test]
    fn event_time_accepts_minutes_and_seconds() {
        assert_eq!(
            parse_event_time("09:05").unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap()
        );
        assert_eq!(
            parse_event_time("23:59:30").unwrap(),
            NaiveTime::from_hms_opt(23, 59, 30).unwrap()
        );
        assert!(parse_event_time("9am").is_err());
    }

    #[test]
    fn event_date_requires_iso_format() {
        assert_eq!(
            parse_event_date("2024-03-09").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
        assert!(parse_event_date("09/03/2024").is_err());
    }
}
