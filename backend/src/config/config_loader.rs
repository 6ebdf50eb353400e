use anyhow::{Context, Result, bail};
use std::str::FromStr;

use super::config_model::{
    AdminSecret, BackendServer, BootstrapAdmin, Database, DotEnvyConfig, SessionLifetime,
};

const DEFAULT_MAX_DB_CONNECTIONS: u32 = 10;
const DEFAULT_ACCESS_TTL_MINUTES: i64 = 60;
const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;
const MAX_ACCESS_TTL_MINUTES: i64 = 24 * 60;
const MAX_REFRESH_TTL_DAYS: i64 = 365;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: required("SERVER_PORT_BACKEND")?,
        body_limit: required("SERVER_BODY_LIMIT")?,
        timeout: required("SERVER_TIMEOUT")?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").context("DATABASE_URL is invalid")?,
        max_connections: optional("DATABASE_MAX_CONNECTIONS")?
            .unwrap_or(DEFAULT_MAX_DB_CONNECTIONS),
    };

    let session_lifetime = SessionLifetime {
        access_ttl_minutes: optional("ADMIN_ACCESS_TTL_MINUTES")?
            .unwrap_or(DEFAULT_ACCESS_TTL_MINUTES),
        refresh_ttl_days: optional("ADMIN_REFRESH_TTL_DAYS")?.unwrap_or(DEFAULT_REFRESH_TTL_DAYS),
    };
    validate_session_lifetime(&session_lifetime)?;

    Ok(DotEnvyConfig {
        backend_server,
        database,
        session_lifetime,
        bootstrap_admin: bootstrap_admin()?,
    })
}

pub fn get_admin_secret() -> Result<AdminSecret> {
    dotenvy::dotenv().ok();

    Ok(AdminSecret {
        secret: std::env::var("JWT_ADMIN_SECRET").context("JWT_ADMIN_SECRET is invalid")?,
        refresh_secret: std::env::var("JWT_ADMIN_REFRESH_SECRET")
            .context("JWT_ADMIN_REFRESH_SECRET is invalid")?,
    })
}

/// Token expiry is `now + ttl` and must stay representable.
fn validate_session_lifetime(lifetime: &SessionLifetime) -> Result<()> {
    if !(1..=MAX_ACCESS_TTL_MINUTES).contains(&lifetime.access_ttl_minutes) {
        bail!(
            "ADMIN_ACCESS_TTL_MINUTES must be between 1 and {}",
            MAX_ACCESS_TTL_MINUTES
        );
    }
    if !(1..=MAX_REFRESH_TTL_DAYS).contains(&lifetime.refresh_ttl_days) {
        bail!(
            "ADMIN_REFRESH_TTL_DAYS must be between 1 and {}",
            MAX_REFRESH_TTL_DAYS
        );
    }
    Ok(())
}

fn bootstrap_admin() -> Result<Option<BootstrapAdmin>> {
    let email = non_empty("BOOTSTRAP_ADMIN_EMAIL");
    let password = non_empty("BOOTSTRAP_ADMIN_PASSWORD");

    match (email, password) {
        (None, None) => Ok(None),
        (Some(email), Some(password)) => Ok(Some(BootstrapAdmin {
            name: non_empty("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|| "Administrator".to_string()),
            email,
            password,
        })),
        _ => bail!("BOOTSTRAP_ADMIN_EMAIL and BOOTSTRAP_ADMIN_PASSWORD must be set together"),
    }
}

fn required<T>(key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    std::env::var(key)
        .with_context(|| format!("{} is invalid", key))?
        .parse()
        .with_context(|| format!("{} is invalid", key))
}

fn optional<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty(key) {
        Some(raw) => Ok(Some(
            raw.parse().with_context(|| format!("{} is invalid", key))?,
        )),
        None => Ok(None),
    }
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
