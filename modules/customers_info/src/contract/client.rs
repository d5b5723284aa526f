use async_trait::async_trait;
use modkit::api::Page;
use uuid::Uuid;

use crate::contract::model::{
    Customer, CustomerListQuery, CustomerPatch, CustomerStatus, CustomerSummary, NewCustomer,
    Timeframe,
};

/// In-process API of the customers_info module.
///
/// Errors are [`CustomersInfoError`](crate::contract::error::CustomersInfoError)
/// values wrapped in `anyhow::Error`.
#[async_trait]
pub trait CustomersInfoApi: Send + Sync {
    async fn get_customer(&self, id: Uuid) -> anyhow::Result<Customer>;

    async fn list_customers(&self, query: CustomerListQuery) -> anyhow::Result<Page<Customer>>;

    async fn create_customer(&self, new_customer: NewCustomer) -> anyhow::Result<Customer>;

    async fn update_customer(&self, id: Uuid, patch: CustomerPatch) -> anyhow::Result<Customer>;

    async fn set_status(&self, id: Uuid, status: CustomerStatus) -> anyhow::Result<Customer>;

    async fn delete_customer(&self, id: Uuid) -> anyhow::Result<()>;

    async fn summary(&self, timeframe: Timeframe) -> anyhow::Result<CustomerSummary>;
}
