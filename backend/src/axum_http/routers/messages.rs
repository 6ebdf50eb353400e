use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch},
};
use crates::{
    domain::{
        repositories::contact_messages::ContactMessageRepository,
        value_objects::contact_messages::{ListMessagesFilter, UpdateMessageStatusModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::contact_messages::ContactMessagePostgres,
    },
};
use uuid::Uuid;

use crate::{
    auth::AuthAdmin, axum_http::error_responses::AppError,
    usecases::contact_messages::ContactMessageUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let message_repository = ContactMessagePostgres::new(Arc::clone(&db_pool));
    let contact_message_usecase = ContactMessageUseCase::new(Arc::new(message_repository));

    Router::new()
        .route("/", get(list))
        .route("/:id/status", patch(update_status))
        .route("/:id", delete(remove))
        .with_state(Arc::new(contact_message_usecase))
}

pub async fn list<T>(
    State(contact_message_usecase): State<Arc<ContactMessageUseCase<T>>>,
    _auth: AuthAdmin,
    Query(filter): Query<ListMessagesFilter>,
) -> Result<impl IntoResponse, AppError>
where
    T: ContactMessageRepository + Send + Sync + 'static,
{
    Ok(Json(contact_message_usecase.list(filter).await?))
}

pub async fn update_status<T>(
    State(contact_message_usecase): State<Arc<ContactMessageUseCase<T>>>,
    _auth: AuthAdmin,
    Path(message_id): Path<Uuid>,
    Json(update_status_model): Json<UpdateMessageStatusModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: ContactMessageRepository + Send + Sync + 'static,
{
    Ok(Json(
        contact_message_usecase
            .update_status(message_id, update_status_model)
            .await?,
    ))
}

pub async fn remove<T>(
    State(contact_message_usecase): State<Arc<ContactMessageUseCase<T>>>,
    _auth: AuthAdmin,
    Path(message_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    T: ContactMessageRepository + Send + Sync + 'static,
{
    contact_message_usecase.delete(message_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
