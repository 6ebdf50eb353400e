use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::usecases::{
    admin_accounts::AdminAccountError, admin_auth::AdminAuthError,
    contact_messages::ContactMessageError, shipments::ShipmentError,
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::InvalidCredentials => "Invalid email or password".to_string(),
            AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg) => msg,
            AppError::Internal(err) => {
                // Don't leak internal error detail to client
                error!(error = ?err, "request failed with internal error");
                "Internal server error".to_string()
            }
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<ShipmentError> for AppError {
    fn from(err: ShipmentError) -> Self {
        match err {
            ShipmentError::NotFound => AppError::NotFound("Shipment not found".to_string()),
            ShipmentError::Validation(msg) => AppError::BadRequest(msg),
            ShipmentError::DuplicateTrackingNumber => {
                AppError::Conflict("Tracking number already exists".to_string())
            }
            ShipmentError::Internal(err) => AppError::Internal(err),
        }
    }
}

impl From<ContactMessageError> for AppError {
    fn from(err: ContactMessageError) -> Self {
        match err {
            ContactMessageError::NotFound => AppError::NotFound("Message not found".to_string()),
            ContactMessageError::Validation(msg) => AppError::BadRequest(msg),
            ContactMessageError::Internal(err) => AppError::Internal(err),
        }
    }
}

impl From<AdminAccountError> for AppError {
    fn from(err: AdminAccountError) -> Self {
        match err {
            AdminAccountError::NotFound => {
                AppError::NotFound("Admin account not found".to_string())
            }
            AdminAccountError::Validation(msg) => AppError::BadRequest(msg),
            AdminAccountError::Forbidden(msg) => AppError::Forbidden(msg.to_string()),
            AdminAccountError::DuplicateEmail => {
                AppError::Conflict("Email already in use".to_string())
            }
            AdminAccountError::Unauthenticated => AppError::Unauthorized,
            AdminAccountError::Inactive => {
                AppError::Forbidden("Account is deactivated".to_string())
            }
            AdminAccountError::Internal(err) => AppError::Internal(err),
        }
    }
}

impl From<AdminAuthError> for AppError {
    fn from(err: AdminAuthError) -> Self {
        match err {
            AdminAuthError::InvalidCredentials => AppError::InvalidCredentials,
            AdminAuthError::InvalidSession => AppError::Unauthorized,
            AdminAuthError::Inactive => AppError::Forbidden("Account is deactivated".to_string()),
            AdminAuthError::Internal(err) => AppError::Internal(err),
        }
    }
}
