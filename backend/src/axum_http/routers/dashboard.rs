use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use crates::{
    domain::repositories::{
        admins::AdminRepository, contact_messages::ContactMessageRepository,
        shipments::ShipmentRepository,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            admins::AdminPostgres, contact_messages::ContactMessagePostgres,
            shipments::ShipmentPostgres,
        },
    },
};

use crate::{
    auth::AuthAdmin, axum_http::error_responses::AppError, usecases::dashboard::DashboardUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let shipment_repository = ShipmentPostgres::new(Arc::clone(&db_pool));
    let message_repository = ContactMessagePostgres::new(Arc::clone(&db_pool));
    let admin_repository = AdminPostgres::new(Arc::clone(&db_pool));
    let dashboard_usecase = DashboardUseCase::new(
        Arc::new(shipment_repository),
        Arc::new(message_repository),
        Arc::new(admin_repository),
    );

    Router::new()
        .route("/stats", get(stats))
        .route("/activity", get(activity))
        .with_state(Arc::new(dashboard_usecase))
}

pub async fn stats<S, M, A>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<S, M, A>>>,
    _auth: AuthAdmin,
) -> Result<impl IntoResponse, AppError>
where
    S: ShipmentRepository + Send + Sync + 'static,
    M: ContactMessageRepository + Send + Sync + 'static,
    A: AdminRepository + Send + Sync + 'static,
{
    Ok(Json(dashboard_usecase.stats().await?))
}

pub async fn activity<S, M, A>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<S, M, A>>>,
    _auth: AuthAdmin,
) -> Result<impl IntoResponse, AppError>
where
    S: ShipmentRepository + Send + Sync + 'static,
    M: ContactMessageRepository + Send + Sync + 'static,
    A: AdminRepository + Send + Sync + 'static,
{
    Ok(Json(dashboard_usecase.recent_activity().await?))
}
