use std::sync::Arc;

use anyhow::Result;
use crates::domain::{
    repositories::{
        admins::AdminRepository, contact_messages::ContactMessageRepository,
        shipments::ShipmentRepository,
    },
    value_objects::{
        activity::{ActivityEntryDto, RECENT_ACTIVITY_SOURCE_LIMIT, merge_recent_activity},
        dashboard::DashboardStatsDto,
        enums::message_statuses::MessageStatus,
        shipments::{STATUS_DELIVERED, STATUS_IN_TRANSIT, STATUS_PENDING},
    },
};
use tracing::{debug, error};

pub struct DashboardUseCase<S, M, A>
where
    S: ShipmentRepository + Send + Sync + 'static,
    M: ContactMessageRepository + Send + Sync + 'static,
    A: AdminRepository + Send + Sync + 'static,
{
    shipment_repository: Arc<S>,
    message_repository: Arc<M>,
    admin_repository: Arc<A>,
}

impl<S, M, A> DashboardUseCase<S, M, A>
where
    S: ShipmentRepository + Send + Sync + 'static,
    M: ContactMessageRepository + Send + Sync + 'static,
    A: AdminRepository + Send + Sync + 'static,
{
    pub fn new(
        shipment_repository: Arc<S>,
        message_repository: Arc<M>,
        admin_repository: Arc<A>,
    ) -> Self {
        Self {
            shipment_repository,
            message_repository,
            admin_repository,
        }
    }

    /// Any failing count fails the whole call.
    pub async fn stats(&self) -> Result<DashboardStatsDto> {
        let (
            total_shipments,
            active_messages,
            total_users,
            delivered_shipments,
            in_transit_shipments,
            pending_shipments,
        ) = tokio::try_join!(
            self.shipment_repository.count(None),
            self.message_repository
                .count(Some(MessageStatus::Unread.to_string())),
            self.admin_repository.count(Some(true)),
            self.shipment_repository
                .count(Some(STATUS_DELIVERED.to_string())),
            self.shipment_repository
                .count(Some(STATUS_IN_TRANSIT.to_string())),
            self.shipment_repository
                .count(Some(STATUS_PENDING.to_string())),
        )
        .map_err(|err| {
            error!(db_error = ?err, "dashboard: failed to load counters");
            err
        })?;

        Ok(DashboardStatsDto {
            total_shipments,
            active_messages,
            total_users,
            delivered_shipments,
            in_transit_shipments,
            pending_shipments,
        })
    }

    pub async fn recent_activity(&self) -> Result<Vec<ActivityEntryDto>> {
        let (messages, shipments) = tokio::try_join!(
            self.message_repository
                .list_recent(RECENT_ACTIVITY_SOURCE_LIMIT),
            self.shipment_repository
                .list_recently_updated(RECENT_ACTIVITY_SOURCE_LIMIT),
        )
        .map_err(|err| {
            error!(db_error = ?err, "dashboard: failed to load recent activity");
            err
        })?;

        debug!(
            messages = messages.len(),
            shipments = shipments.len(),
            "dashboard: merging recent activity"
        );
        Ok(merge_recent_activity(messages, shipments))
    }
}
