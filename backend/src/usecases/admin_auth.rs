use std::sync::Arc;

use chrono::{DateTime, Utc};
use crates::domain::{
    entities::admins::AdminEntity,
    repositories::admins::AdminRepository,
    value_objects::admins::{AdminDto, LoginModel, RefreshSessionModel},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::auth::{AuthAdmin, SessionKeys, password::verify_password};

pub const TOKEN_TYPE: &str = "Bearer";

#[derive(Debug, Error)]
pub enum AdminAuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account is deactivated")]
    Inactive,
    #[error("Session is invalid or expired")]
    InvalidSession,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type UseCaseResult<T> = std::result::Result<T, AdminAuthError>;

/// Explicit session handed to the client after login or refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminSession {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
    pub admin: AdminDto,
}

pub struct AdminAuthUseCase<A>
where
    A: AdminRepository + Send + Sync + 'static,
{
    admin_repository: Arc<A>,
    session_keys: SessionKeys,
}

impl<A> AdminAuthUseCase<A>
where
    A: AdminRepository + Send + Sync + 'static,
{
    pub fn new(admin_repository: Arc<A>, session_keys: SessionKeys) -> Self {
        Self {
            admin_repository,
            session_keys,
        }
    }

    /// Unknown email and wrong password fail identically. The active flag is
    /// only revealed once the password matches.
    pub async fn login(&self, model: LoginModel) -> UseCaseResult<AdminSession> {
        let email = model.email.trim().to_lowercase();

        let admin = self
            .admin_repository
            .find_by_email(&email)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "admin_auth: failed to load account");
                AdminAuthError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!("admin_auth: login for unknown email");
                AdminAuthError::InvalidCredentials
            })?;

        if !verify_password(&model.password, &admin.password_hash) {
            warn!(admin_id = %admin.id, "admin_auth: wrong password");
            return Err(AdminAuthError::InvalidCredentials);
        }
        if !admin.is_active {
            warn!(admin_id = %admin.id, "admin_auth: login to deactivated account");
            return Err(AdminAuthError::Inactive);
        }

        let now = Utc::now();
        self.admin_repository.record_login(admin.id, now).await?;

        let admin = AdminEntity {
            last_login: Some(now),
            ..admin
        };
        info!(admin_id = %admin.id, role = %admin.role, "admin_auth: logged in");
        self.open_session(admin, now)
    }

    /// Issues a fresh pair; the account must still exist and be active.
    pub async fn refresh(&self, model: RefreshSessionModel) -> UseCaseResult<AdminSession> {
        let claims = self
            .session_keys
            .validate_refresh_token(&model.refresh_token)
            .map_err(|err| {
                warn!(error = %err, "admin_auth: refresh token rejected");
                AdminAuthError::InvalidSession
            })?;
        let admin_id =
            Uuid::parse_str(&claims.sub).map_err(|_| AdminAuthError::InvalidSession)?;

        let admin = self.active_account(admin_id).await?;
        info!(%admin_id, "admin_auth: session refreshed");
        self.open_session(admin, Utc::now())
    }

    pub async fn me(&self, auth: &AuthAdmin) -> UseCaseResult<AdminDto> {
        let admin = self.active_account(auth.admin_id).await?;
        Ok(AdminDto::from(admin))
    }

    async fn active_account(&self, admin_id: Uuid) -> UseCaseResult<AdminEntity> {
        let admin = self
            .admin_repository
            .find_by_id(admin_id)
            .await?
            .ok_or(AdminAuthError::InvalidSession)?;
        if !admin.is_active {
            return Err(AdminAuthError::Inactive);
        }
        Ok(admin)
    }

    fn open_session(&self, admin: AdminEntity, now: DateTime<Utc>) -> UseCaseResult<AdminSession> {
        let tokens = self
            .session_keys
            .issue(&admin, now)
            .map_err(|err| AdminAuthError::Internal(anyhow::anyhow!("{}", err)))?;

        Ok(AdminSession {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: TOKEN_TYPE,
            expires_at: tokens.expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
            admin: AdminDto::from(admin),
        })
    }
}
