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
        value_objects::shipments::{
            InsertShipmentEventModel, InsertShipmentModel, UpdateShipmentModel,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::shipments::ShipmentPostgres,
    },
};
use uuid::Uuid;

use crate::{
    auth::AuthAdmin, axum_http::error_responses::AppError, usecases::shipments::ShipmentUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let shipment_repository = ShipmentPostgres::new(Arc::clone(&db_pool));
    let shipment_usecase = ShipmentUseCase::new(Arc::new(shipment_repository));

    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).patch(update).delete(remove))
        .route("/:id/events", get(list_events).post(add_event))
        .with_state(Arc::new(shipment_usecase))
}

pub async fn list<T>(
    State(shipment_usecase): State<Arc<ShipmentUseCase<T>>>,
    _auth: AuthAdmin,
) -> Result<impl IntoResponse, AppError>
where
    T: ShipmentRepository + Send + Sync + 'static,
{
    Ok(Json(shipment_usecase.list().await?))
}

pub async fn get_one<T>(
    State(shipment_usecase): State<Arc<ShipmentUseCase<T>>>,
    _auth: AuthAdmin,
    Path(shipment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    T: ShipmentRepository + Send + Sync + 'static,
{
    Ok(Json(shipment_usecase.get(shipment_id).await?))
}

pub async fn create<T>(
    State(shipment_usecase): State<Arc<ShipmentUseCase<T>>>,
    _auth: AuthAdmin,
    Json(insert_shipment_model): Json<InsertShipmentModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: ShipmentRepository + Send + Sync + 'static,
{
    let shipment = shipment_usecase.create(insert_shipment_model).await?;
    Ok((StatusCode::CREATED, Json(shipment)))
}

pub async fn update<T>(
    State(shipment_usecase): State<Arc<ShipmentUseCase<T>>>,
    _auth: AuthAdmin,
    Path(shipment_id): Path<Uuid>,
    Json(update_shipment_model): Json<UpdateShipmentModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: ShipmentRepository + Send + Sync + 'static,
{
    Ok(Json(
        shipment_usecase
            .update(shipment_id, update_shipment_model)
            .await?,
    ))
}

pub async fn remove<T>(
    State(shipment_usecase): State<Arc<ShipmentUseCase<T>>>,
    _auth: AuthAdmin,
    Path(shipment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    T: ShipmentRepository + Send + Sync + 'static,
{
    shipment_usecase.delete(shipment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_events<T>(
    State(shipment_usecase): State<Arc<ShipmentUseCase<T>>>,
    _auth: AuthAdmin,
    Path(shipment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    T: ShipmentRepository + Send + Sync + 'static,
{
    Ok(Json(shipment_usecase.list_events(shipment_id).await?))
}

pub async fn add_event<T>(
    State(shipment_usecase): State<Arc<ShipmentUseCase<T>>>,
    _auth: AuthAdmin,
    Path(shipment_id): Path<Uuid>,
    Json(insert_event_model): Json<InsertShipmentEventModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: ShipmentRepository + Send + Sync + 'static,
{
    let event = shipment_usecase
        .add_event(shipment_id, insert_event_model)
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}
