use modkit::UnknownVariant;
use modkit_db::RepoError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Customer not found: {id}")]
    CustomerNotFound { id: Uuid },

    #[error("Customer with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn customer_not_found(id: Uuid) -> Self {
        Self::CustomerNotFound { id }
    }

    pub fn email_already_exists(email: impl Into<String>) -> Self {
        Self::EmailAlreadyExists {
            email: email.into(),
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

    /// Storage failure; a unique-index hit on `email` still reads as a conflict.
    pub fn from_repo(err: RepoError, email: &str) -> Self {
        if err.is_unique_violation() {
            Self::email_already_exists(email)
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
