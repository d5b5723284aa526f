use thiserror::Error;
use uuid::Uuid;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone)]
pub enum OrdersInfoError {
    #[error("Order not found: {id}")]
    NotFound { id: Uuid },

    #[error("Order with tracking id '{tracking_id}' already exists")]
    Conflict { tracking_id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl OrdersInfoError {
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn conflict(tracking_id: String) -> Self {
        Self::Conflict { tracking_id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}
