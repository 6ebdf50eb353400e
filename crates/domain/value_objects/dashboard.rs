use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStatsDto {
    pub total_shipments: i64,
    /// Unread inbox messages.
    pub active_messages: i64,
    /// Active admin accounts.
    pub total_users: i64,
    pub delivered_shipments: i64,
    pub in_transit_shipments: i64,
    pub pending_shipments: i64,
}
