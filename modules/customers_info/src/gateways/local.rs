use async_trait::async_trait;
use modkit::api::Page;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::CustomersInfoApi,
    error::CustomersInfoError,
    model::{
        Customer, CustomerListQuery, CustomerPatch, CustomerStatus, CustomerSummary, NewCustomer,
        Timeframe,
    },
};
use crate::domain::{error::DomainError, service::Service};

/// Local implementation of the CustomersInfoApi trait that delegates to the domain service
pub struct CustomersInfoLocalClient {
    service: Arc<Service>,
}

impl CustomersInfoLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CustomersInfoApi for CustomersInfoLocalClient {
    async fn get_customer(&self, id: Uuid) -> anyhow::Result<Customer> {
        self.service.get_customer(id).await.map_err(map_domain_error)
    }

    async fn list_customers(&self, query: CustomerListQuery) -> anyhow::Result<Page<Customer>> {
        self.service
            .list_customers(query)
            .await
            .map_err(map_domain_error)
    }

    async fn create_customer(&self, new_customer: NewCustomer) -> anyhow::Result<Customer> {
        self.service
            .create_customer(new_customer)
            .await
            .map_err(map_domain_error)
    }

    async fn update_customer(&self, id: Uuid, patch: CustomerPatch) -> anyhow::Result<Customer> {
        self.service
            .update_customer(id, patch)
            .await
            .map_err(map_domain_error)
    }

    async fn set_status(&self, id: Uuid, status: CustomerStatus) -> anyhow::Result<Customer> {
        self.service
            .set_status(id, status)
            .await
            .map_err(map_domain_error)
    }

    async fn delete_customer(&self, id: Uuid) -> anyhow::Result<()> {
        self.service
            .delete_customer(id)
            .await
            .map_err(map_domain_error)
    }

    async fn summary(&self, timeframe: Timeframe) -> anyhow::Result<CustomerSummary> {
        self.service
            .summary(timeframe)
            .await
            .map_err(map_domain_error)
    }
}

/// Map domain errors to contract errors wrapped in anyhow
fn map_domain_error(e: DomainError) -> anyhow::Error {
    let contract_error = match e {
        DomainError::CustomerNotFound { id } => CustomersInfoError::not_found(id),
        DomainError::EmailAlreadyExists { email } => CustomersInfoError::conflict(email),
        DomainError::InvalidEmail { email } => {
            CustomersInfoError::validation(format!("Invalid email: {email}"))
        }
        DomainError::Validation { field, message } => {
            CustomersInfoError::validation(format!("{field}: {message}"))
        }
        DomainError::Database { message } => {
            tracing::error!(%message, "customers_info storage failure");
            CustomersInfoError::internal()
        }
    };
    anyhow::Error::new(contract_error)
}
