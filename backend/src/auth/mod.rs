pub mod password;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{DateTime, Duration, Utc};
use crates::domain::{
    entities::admins::AdminEntity, value_objects::enums::admin_roles::AdminRole,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    axum_http::error_responses::AppError,
    config::{
        config_loader,
        config_model::{AdminSecret, SessionLifetime},
    },
};

const ACCESS_TOKEN_USE: &str = "access";
const REFRESH_TOKEN_USE: &str = "refresh";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub token_use: String,
    pub iat: usize,
    pub exp: usize,
}

/// The authenticated admin behind an access token.
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub admin_id: Uuid,
    pub email: String,
    pub role: AdminRole,
}

#[derive(Debug)]
pub struct AuthError(anyhow::Error);

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError(err)
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

/// Signs and checks admin session tokens. Access and refresh tokens use
/// separate secrets and carry a `token_use` claim, so neither can stand in for
/// the other.
#[derive(Clone)]
pub struct SessionKeys {
    secret: String,
    refresh_secret: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: AdminSecret, lifetime: &SessionLifetime) -> Self {
        Self {
            secret: secret.secret,
            refresh_secret: secret.refresh_secret,
            access_ttl: Duration::minutes(lifetime.access_ttl_minutes),
            refresh_ttl: Duration::days(lifetime.refresh_ttl_days),
        }
    }

    pub fn issue(&self, admin: &AdminEntity, now: DateTime<Utc>) -> Result<IssuedTokens, AuthError> {
        let expires_at = now + self.access_ttl;
        let refresh_expires_at = now + self.refresh_ttl;

        let access_token = sign(
            &claims_for(admin, ACCESS_TOKEN_USE, now, expires_at),
            &self.secret,
        )?;
        let refresh_token = sign(
            &claims_for(admin, REFRESH_TOKEN_USE, now, refresh_expires_at),
            &self.refresh_secret,
        )?;

        Ok(IssuedTokens {
            access_token,
            refresh_token,
            expires_at,
            refresh_expires_at,
        })
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<AdminClaims, AuthError> {
        validate_token(token, &self.refresh_secret, REFRESH_TOKEN_USE)
    }
}

fn claims_for(
    admin: &AdminEntity,
    token_use: &str,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> AdminClaims {
    AdminClaims {
        sub: admin.id.to_string(),
        email: admin.email.clone(),
        role: admin.role.clone(),
        token_use: token_use.to_string(),
        iat: issued_at.timestamp().max(0) as usize,
        exp: expires_at.timestamp().max(0) as usize,
    }
}

fn sign(claims: &AdminClaims, secret: &str) -> Result<String, AuthError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| anyhow::anyhow!("JWT signing failed: {}", e).into())
}

pub fn validate_access_token(token: &str, secret: &str) -> Result<AdminClaims, AuthError> {
    validate_token(token, secret, ACCESS_TOKEN_USE)
}

fn validate_token(token: &str, secret: &str, token_use: &str) -> Result<AdminClaims, AuthError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);

    let token_data = decode::<AdminClaims>(token, &decoding_key, &validation)
        .map_err(|e| anyhow::anyhow!("JWT validation failed: {}", e))?;

    if token_data.claims.token_use != token_use {
        return Err(anyhow::anyhow!("JWT validation failed: expected {} token", token_use).into());
    }

    Ok(token_data.claims)
}

impl TryFrom<AdminClaims> for AuthAdmin {
    type Error = AuthError;

    fn try_from(claims: AdminClaims) -> Result<Self, Self::Error> {
        let admin_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| anyhow::anyhow!("Invalid admin ID in token"))?;
        let role = AdminRole::parse(&claims.role)?;

        Ok(AuthAdmin {
            admin_id,
            email: claims.email,
            role,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_str = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?
            .to_str()
            .map_err(|_| AppError::Unauthorized)?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let secret = config_loader::get_admin_secret()?;

        let claims = validate_access_token(token, &secret.secret).map_err(|err| {
            debug!(error = %err, "auth: rejected access token");
            AppError::Unauthorized
        })?;

        AuthAdmin::try_from(claims).map_err(|err| {
            debug!(error = %err, "auth: access token carries invalid claims");
            AppError::Unauthorized
        })
    }
}

#[cfg(test)]
mod tests;
