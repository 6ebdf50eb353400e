use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::pie_tracking;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = pie_tracking)]
pub struct ShipmentEntity {
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

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = pie_tracking)]
pub struct InsertShipmentEntity {
    pub tracking_number: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub origin: String,
    pub destination: String,
    pub status: String,
    pub current_location: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub service_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = pie_tracking)]
pub struct UpdateShipmentEntity {
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
    pub service_type: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}
