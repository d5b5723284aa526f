use modkit::ApiFailure;

use crate::domain::error::DomainError;

/// Map a domain error to the REST failure envelope.
pub fn map_domain_error(e: &DomainError) -> ApiFailure {
    match e {
        DomainError::OrderNotFound { .. } => ApiFailure::not_found("Order not found", e.to_string()),
        DomainError::TrackingIdAlreadyExists { .. } => {
            ApiFailure::conflict("Order with this tracking ID already exists", e.to_string())
        }
        DomainError::InvalidEmail { .. } | DomainError::Validation { .. } => {
            ApiFailure::bad_request("Validation error", e.to_string())
        }
        DomainError::TrackingIdUnavailable { .. } | DomainError::Database { .. } => {
            tracing::error!(error = ?e, "Order storage failure");
            ApiFailure::internal("Internal server error", e.to_string())
        }
    }
}

impl From<DomainError> for ApiFailure {
    fn from(e: DomainError) -> Self {
        map_domain_error(&e)
    }
}
