use async_trait::async_trait;
use modkit::api::PageRequest;
use modkit_db::RepoResult;
use uuid::Uuid;

use crate::contract::model::{Customer, CustomerListQuery};
use crate::domain::stats::{SummaryCounts, SummaryWindow};

/// Normalised list filter handed to storage.
#[derive(Debug, Clone)]
pub struct CustomerFilter {
    pub page: PageRequest,
    pub query: CustomerListQuery,
}

/// Port for the domain layer: persistence operations the domain needs.
#[async_trait]
pub trait CustomersRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Customer>>;

    /// True when another customer (not `exclude`) already uses `email`.
    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> RepoResult<bool>;

    async fn insert(&self, c: Customer) -> RepoResult<()>;

    /// Overwrite the row with primary key `c.id`.
    async fn update(&self, c: Customer) -> RepoResult<()>;

    /// Returns true if a row was deleted.
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;

    /// One page of matches plus the total match count.
    async fn list(&self, filter: &CustomerFilter) -> RepoResult<(Vec<Customer>, u64)>;

    /// Raw counts feeding the summary endpoint.
    async fn summary_counts(&self, window: &SummaryWindow) -> RepoResult<SummaryCounts>;
}
