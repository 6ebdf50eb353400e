use anyhow::Result;
use backend::{
    axum_http::http_serve, config::config_loader, usecases::admin_accounts::AdminAccountUseCase,
};
use crates::infra::db::{
    postgres::postgres_connection, repositories::admins::AdminPostgres,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Backend exited with error: {:#}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    crates::observability::init_observability("backend")?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let postgres_pool = Arc::new(postgres_connection::establish_connection(
        &dotenvy_env.database.url,
        dotenvy_env.database.max_connections,
    )?);
    info!("Postgres connection has been established");

    let admin_account_usecase =
        AdminAccountUseCase::new(Arc::new(AdminPostgres::new(Arc::clone(&postgres_pool))));
    admin_account_usecase
        .ensure_bootstrap_admin(dotenvy_env.bootstrap_admin.as_ref())
        .await?;

    http_serve::start(Arc::new(dotenvy_env), postgres_pool).await?;

    Ok(())
}
