use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::admins::{AdminEntity, InsertAdminEntity, UpdateAdminEntity},
    value_objects::{
        contact_messages::validate_email, enums::admin_roles::AdminRole, shipments::required,
    },
};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Account view without the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_by: Option<Uuid>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AdminEntity> for AdminDto {
    fn from(value: AdminEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role,
            is_active: value.is_active,
            created_by: value.created_by,
            last_login: value.last_login,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertAdminModel {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: AdminRole,
}

impl InsertAdminModel {
    /// The password is hashed by the caller; only the hash reaches the entity.
    pub fn to_entity(
        &self,
        password_hash: String,
        created_by: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<InsertAdminEntity> {
        Ok(InsertAdminEntity {
            name: required("name", &self.name)?,
            email: validate_email(&self.email)?,
            password_hash,
            role: self.role.to_string(),
            is_active: true,
            created_by,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAdminModel {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<AdminRole>,
    pub is_active: Option<bool>,
}

impl UpdateAdminModel {
    pub fn touches_privileges(&self) -> bool {
        self.role.is_some() || self.is_active.is_some()
    }

    pub fn to_entity(&self, now: DateTime<Utc>) -> Result<UpdateAdminEntity> {
        Ok(UpdateAdminEntity {
            name: self
                .name
                .as_deref()
                .map(|v| required("name", v))
                .transpose()?,
            email: self.email.as_deref().map(validate_email).transpose()?,
            role: self.role.map(|v| v.to_string()),
            is_active: self.is_active,
            updated_at: Some(now),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordModel {
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginModel {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshSessionModel {
    pub refresh_token: String,
}

pub fn validate_password(password: &str) -> Result<()> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        bail!("password must be at least {} characters", MIN_PASSWORD_LEN);
    }
    if len > MAX_PASSWORD_LEN {
        bail!("password must be at most {} characters", MAX_PASSWORD_LEN);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_model_normalizes_and_keeps_only_the_hash() {
        let model = InsertAdminModel {
            name: " Dispatch ".to_string(),
            email: "Dispatch@Example.com".to_string(),
            password: "plaintext-password".to_string(),
            role: AdminRole::Manager,
        };
        let creator = Uuid::new_v4();
        let entity = model
            .to_entity("$argon2id$hash".to_string(), Some(creator), Utc::now())
            .unwrap();
        assert_eq!(entity.name, "Dispatch");
        assert_eq!(entity.email, "dispatch@example.com");
        assert_eq!(entity.password_hash, "$argon2id$hash");
        assert_eq!(entity.role, "manager");
        assert!(entity.is_active);
        assert_eq!(entity.created_by, Some(creator));
    }

    #[test]
    fn password_length_bounds() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password(&"x".repeat(MAX_PASSWORD_LEN + 1)).is_err());
    }

    #[test]
    fn update_normalizes_email_and_flags_privilege_changes() {
        let model = UpdateAdminModel {
            email: Some("Ops@Example.com".to_string()),
            ..Default::default()
        };
        assert!(!model.touches_privileges());
        let entity = model.to_entity(Utc::now()).unwrap();
        assert_eq!(entity.email.as_deref(), Some("ops@example.com"));
        assert_eq!(entity.role, None);

        let model = UpdateAdminModel {
            is_active: Some(false),
            ..Default::default()
        };
        assert!(model.touches_privileges());
    }
}
