use async_trait::async_trait;
use modkit::api::PageRequest;
use modkit_db::RepoResult;
use uuid::Uuid;

use crate::contract::model::{Order, OrderListQuery};

/// Normalised list filter handed to storage.
#[derive(Debug, Clone)]
pub struct OrderFilter {
    pub page: PageRequest,
    pub query: OrderListQuery,
}

/// Port for the domain layer: persistence operations the domain needs.
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Order>>;

    /// True when another order (not `exclude`) already carries `tracking_id`.
    async fn tracking_id_taken(&self, tracking_id: &str, exclude: Option<Uuid>)
        -> RepoResult<bool>;

    async fn insert(&self, o: Order) -> RepoResult<()>;

    /// Overwrite the row with primary key `o.id`.
    async fn update(&self, o: Order) -> RepoResult<()>;

    /// Returns true if a row was deleted.
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;

    /// One page of matches plus the total match count.
    async fn list(&self, filter: &OrderFilter) -> RepoResult<(Vec<Order>, u64)>;
}
