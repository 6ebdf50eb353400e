use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::pie_tracking_events;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = pie_tracking_events)]
pub struct ShipmentEventEntity {
    pub id: Uuid,
    pub tracking_id: Uuid,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub location: String,
    pub status: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = pie_tracking_events)]
pub struct InsertShipmentEventEntity {
    pub tracking_id: Uuid,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub location: String,
    pub status: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
