use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, put},
};
use crates::{
    domain::{
        repositories::admins::AdminRepository,
        value_objects::admins::{ChangePasswordModel, InsertAdminModel, UpdateAdminModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::admins::AdminPostgres,
    },
};
use uuid::Uuid;

use crate::{
    auth::AuthAdmin, axum_http::error_responses::AppError,
    usecases::admin_accounts::AdminAccountUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let admin_repository = AdminPostgres::new(Arc::clone(&db_pool));
    let admin_account_usecase = AdminAccountUseCase::new(Arc::new(admin_repository));

    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", patch(update).delete(remove))
        .route("/:id/password", put(change_password))
        .with_state(Arc::new(admin_account_usecase))
}

pub async fn list<T>(
    State(admin_account_usecase): State<Arc<AdminAccountUseCase<T>>>,
    _auth: AuthAdmin,
) -> Result<impl IntoResponse, AppError>
where
    T: AdminRepository + Send + Sync + 'static,
{
    Ok(Json(admin_account_usecase.list().await?))
}

pub async fn create<T>(
    State(admin_account_usecase): State<Arc<AdminAccountUseCase<T>>>,
    auth: AuthAdmin,
    Json(insert_admin_model): Json<InsertAdminModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: AdminRepository + Send + Sync + 'static,
{
    let admin = admin_account_usecase
        .create(&auth, insert_admin_model)
        .await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

pub async fn update<T>(
    State(admin_account_usecase): State<Arc<AdminAccountUseCase<T>>>,
    auth: AuthAdmin,
    Path(admin_id): Path<Uuid>,
    Json(update_admin_model): Json<UpdateAdminModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: AdminRepository + Send + Sync + 'static,
{
    Ok(Json(
        admin_account_usecase
            .update(&auth, admin_id, update_admin_model)
            .await?,
    ))
}

pub async fn remove<T>(
    State(admin_account_usecase): State<Arc<AdminAccountUseCase<T>>>,
    auth: AuthAdmin,
    Path(admin_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    T: AdminRepository + Send + Sync + 'static,
{
    admin_account_usecase.delete(&auth, admin_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn change_password<T>(
    State(admin_account_usecase): State<Arc<AdminAccountUseCase<T>>>,
    auth: AuthAdmin,
    Path(admin_id): Path<Uuid>,
    Json(change_password_model): Json<ChangePasswordModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: AdminRepository + Send + Sync + 'static,
{
    admin_account_usecase
        .change_password(&auth, admin_id, change_password_model)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
