use modkit::UnknownVariant;
use modkit_db::RepoError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Order not found: {id}")]
    OrderNotFound { id: Uuid },

    #[error("Order with tracking id '{tracking_id}' already exists")]
    TrackingIdAlreadyExists { tracking_id: String },

    #[error("No free tracking id after {attempts} attempts")]
    TrackingIdUnavailable { attempts: u32 },

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn order_not_found(id: Uuid) -> Self {
        Self::OrderNotFound { id }
    }

    pub fn tracking_id_already_exists(tracking_id: impl Into<String>) -> Self {
        Self::TrackingIdAlreadyExists {
            tracking_id: tracking_id.into(),
        }
    }

    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail {
            email: email.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Storage failure; a unique-index hit on `tracking_id` still reads as a conflict.
    pub fn from_repo(err: RepoError, tracking_id: &str) -> Self {
        if err.is_unique_violation() {
            Self::tracking_id_already_exists(tracking_id)
        } else {
            Self::database(format!("{err:#}"))
        }
    }
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        Self::database(format!("{err:#}"))
    }
}

impl From<UnknownVariant> for DomainError {
    fn from(err: UnknownVariant) -> Self {
        Self::validation(err.field, err.to_string())
    }
}
