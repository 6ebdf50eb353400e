use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::contact_messages::{ContactMessageEntity, InsertContactMessageEntity},
    value_objects::{
        enums::message_statuses::MessageStatus,
        shipments::{optional, required},
    },
};

pub const MAX_MESSAGE_LEN: usize = 5000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMessageDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContactMessageEntity> for ContactMessageDto {
    fn from(value: ContactMessageEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            message: value.message,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertContactMessageModel {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl InsertContactMessageModel {
    pub fn to_entity(&self, now: DateTime<Utc>) -> Result<InsertContactMessageEntity> {
        let message = required("message", &self.message)?;
        if message.chars().count() > MAX_MESSAGE_LEN {
            bail!("message must be at most {} characters", MAX_MESSAGE_LEN);
        }

        Ok(InsertContactMessageEntity {
            name: required("name", &self.name)?,
            email: validate_email(&self.email)?,
            phone: optional(self.phone.as_deref()),
            message,
            status: MessageStatus::Unread.to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMessageStatusModel {
    pub status: MessageStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMessagesFilter {
    pub status: Option<MessageStatus>,
}

/// Trims and lower-cases; only a structural sanity check, not RFC 5322.
pub fn validate_email(raw: &str) -> Result<String> {
    let email = required("email", raw)?.to_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        bail!("email must contain @");
    };
    if local.is_empty() || domain.is_empty() || email.chars().any(char::is_whitespace) {
        bail!("email is invalid");
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> InsertContactMessageModel {
        InsertContactMessageModel {
            name: " Anna ".to_string(),
            email: "Anna@Example.com".to_string(),
            phone: Some("  ".to_string()),
            message: "Please quote 2 containers to Hamburg".to_string(),
        }
    }

    #[test]
    fn new_messages_start_unread() {
        let entity = model().to_entity(Utc::now()).unwrap();
        assert_eq!(entity.status, "unread");
        assert_eq!(entity.name, "Anna");
        assert_eq!(entity.email, "anna@example.com");
        assert_eq!(entity.phone, None);
    }

    #[test]
    fn message_body_is_required() {
        let mut model = model();
        model.message = "\n".to_string();
        assert!(model.to_entity(Utc::now()).is_err());
    }

    #[test]
    fn email_needs_local_part_and_domain() {
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("anna@").is_err());
        assert!(validate_email("an na@example.com").is_err());
        assert_eq!(validate_email(" a@b.co ").unwrap(), "a@b.co");
    }
}
