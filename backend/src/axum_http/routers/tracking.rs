use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use crates::{
    domain::{
        repositories::shipments::ShipmentRepository,
        value_objects::{
            shipments::normalize_tracking_number,
            tracking::{TRACKING_FAILURE_MESSAGE, TRACKING_NOT_FOUND_MESSAGE, TrackingLookupResponse},
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::shipments::ShipmentPostgres,
    },
};
use tracing::error;

use crate::usecases::tracking_lookup::{TrackingLookupOutcome, TrackingLookupUseCase};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let shipment_repository = ShipmentPostgres::new(Arc::clone(&db_pool));
    let tracking_lookup_usecase = TrackingLookupUseCase::new(Arc::new(shipment_repository));

    Router::new()
        .route("/:tracking_number", get(lookup))
        .with_state(Arc::new(tracking_lookup_usecase))
}

/// Every outcome answers with the same body shape; only `error` and the
/// status code tell them apart.
pub async fn lookup<T>(
    State(tracking_lookup_usecase): State<Arc<TrackingLookupUseCase<T>>>,
    Path(tracking_number): Path<String>,
) -> impl IntoResponse
where
    T: ShipmentRepository + Send + Sync + 'static,
{
    let tracking_number = match normalize_tracking_number(&tracking_number) {
        Ok(tracking_number) => tracking_number,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(TrackingLookupResponse::failed(&err.to_string())),
            );
        }
    };

    match tracking_lookup_usecase.lookup(&tracking_number).await {
        Ok(TrackingLookupOutcome::Found(details)) => {
            (StatusCode::OK, Json(TrackingLookupResponse::found(details)))
        }
        Ok(TrackingLookupOutcome::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(TrackingLookupResponse::failed(TRACKING_NOT_FOUND_MESSAGE)),
        ),
        Err(err) => {
            error!(%tracking_number, error = ?err, "tracking: lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TrackingLookupResponse::failed(TRACKING_FAILURE_MESSAGE)),
            )
        }
    }
}
