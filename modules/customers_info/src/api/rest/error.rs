use modkit::ApiFailure;

use crate::domain::error::DomainError;

/// Map a domain error to the REST failure envelope.
pub fn map_domain_error(e: &DomainError) -> ApiFailure {
    match e {
        DomainError::CustomerNotFound { .. } => {
            ApiFailure::not_found("Customer not found", e.to_string())
        }
        DomainError::EmailAlreadyExists { .. } => {
            ApiFailure::conflict("Customer with this email already exists", e.to_string())
        }
        DomainError::InvalidEmail { .. } | DomainError::Validation { .. } => {
            ApiFailure::bad_request("Validation error", e.to_string())
        }
        DomainError::Database { .. } => {
            tracing::error!(error = ?e, "Database error occurred");
            ApiFailure::internal("Internal server error", e.to_string())
        }
    }
}

impl From<DomainError> for ApiFailure {
    fn from(e: DomainError) -> Self {
        map_domain_error(&e)
    }
}
