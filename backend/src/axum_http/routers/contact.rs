use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use crates::{
    domain::{
        repositories::contact_messages::ContactMessageRepository,
        value_objects::contact_messages::InsertContactMessageModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::contact_messages::ContactMessagePostgres,
    },
};

use crate::{axum_http::error_responses::AppError, usecases::contact_messages::ContactMessageUseCase};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let message_repository = ContactMessagePostgres::new(Arc::clone(&db_pool));
    let contact_message_usecase = ContactMessageUseCase::new(Arc::new(message_repository));

    Router::new()
        .route("/", post(submit))
        .with_state(Arc::new(contact_message_usecase))
}

pub async fn submit<T>(
    State(contact_message_usecase): State<Arc<ContactMessageUseCase<T>>>,
    Json(insert_message_model): Json<InsertContactMessageModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: ContactMessageRepository + Send + Sync + 'static,
{
    let message = contact_message_usecase.submit(insert_message_model).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
