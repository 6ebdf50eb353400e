use std::sync::Arc;

use chrono::Utc;
use crates::domain::{
    repositories::contact_messages::ContactMessageRepository,
    value_objects::{
        contact_messages::{
            ContactMessageDto, InsertContactMessageModel, ListMessagesFilter,
            UpdateMessageStatusModel,
        },
        enums::message_statuses::MessageStatus,
    },
};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ContactMessageError {
    #[error("message not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type UseCaseResult<T> = std::result::Result<T, ContactMessageError>;

pub struct ContactMessageUseCase<M>
where
    M: ContactMessageRepository + Send + Sync + 'static,
{
    message_repository: Arc<M>,
}

impl<M> ContactMessageUseCase<M>
where
    M: ContactMessageRepository + Send + Sync + 'static,
{
    pub fn new(message_repository: Arc<M>) -> Self {
        Self { message_repository }
    }

    /// Public contact form. Stored as unread.
    pub async fn submit(&self, model: InsertContactMessageModel) -> UseCaseResult<ContactMessageDto> {
        let entity = model
            .to_entity(Utc::now())
            .map_err(|err| ContactMessageError::Validation(err.to_string()))?;

        let message = self
            .message_repository
            .submit(entity)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "contact: failed to store message");
                ContactMessageError::Internal(err)
            })?;

        info!(message_id = %message.id, "contact: message received");
        Ok(ContactMessageDto::from(message))
    }

    pub async fn list(&self, filter: ListMessagesFilter) -> UseCaseResult<Vec<ContactMessageDto>> {
        let status = filter.status.map(|status| status.to_string());
        let messages = self.message_repository.list(status).await.map_err(|err| {
            error!(db_error = ?err, "contact: failed to list messages");
            ContactMessageError::Internal(err)
        })?;
        Ok(messages.into_iter().map(ContactMessageDto::from).collect())
    }

    pub async fn update_status(
        &self,
        message_id: Uuid,
        model: UpdateMessageStatusModel,
    ) -> UseCaseResult<ContactMessageDto> {
        let status: MessageStatus = model.status;
        let message = self
            .message_repository
            .update_status(message_id, status.to_string(), Utc::now())
            .await?
            .ok_or(ContactMessageError::NotFound)?;

        info!(%message_id, %status, "contact: status changed");
        Ok(ContactMessageDto::from(message))
    }

    pub async fn delete(&self, message_id: Uuid) -> UseCaseResult<()> {
        if !self.message_repository.delete(message_id).await? {
            return Err(ContactMessageError::NotFound);
        }
        info!(%message_id, "contact: message deleted");
        Ok(())
    }
}
