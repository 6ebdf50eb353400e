use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use crates::{
    domain::{
        repositories::admins::AdminRepository,
        value_objects::admins::{LoginModel, RefreshSessionModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::admins::AdminPostgres,
    },
};

use crate::{
    auth::{AuthAdmin, SessionKeys},
    axum_http::error_responses::AppError,
    usecases::admin_auth::AdminAuthUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>, session_keys: SessionKeys) -> Router {
    let admin_repository = AdminPostgres::new(Arc::clone(&db_pool));
    let admin_auth_usecase = AdminAuthUseCase::new(Arc::new(admin_repository), session_keys);

    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/me", get(me))
        .with_state(Arc::new(admin_auth_usecase))
}

pub async fn login<T>(
    State(admin_auth_usecase): State<Arc<AdminAuthUseCase<T>>>,
    Json(login_model): Json<LoginModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: AdminRepository + Send + Sync + 'static,
{
    Ok(Json(admin_auth_usecase.login(login_model).await?))
}

pub async fn refresh<T>(
    State(admin_auth_usecase): State<Arc<AdminAuthUseCase<T>>>,
    Json(refresh_session_model): Json<RefreshSessionModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: AdminRepository + Send + Sync + 'static,
{
    Ok(Json(admin_auth_usecase.refresh(refresh_session_model).await?))
}

pub async fn me<T>(
    State(admin_auth_usecase): State<Arc<AdminAuthUseCase<T>>>,
    auth: AuthAdmin,
) -> Result<impl IntoResponse, AppError>
where
    T: AdminRepository + Send + Sync + 'static,
{
    Ok(Json(admin_auth_usecase.me(&auth).await?))
}
