use async_trait::async_trait;
use modkit::api::Page;
use uuid::Uuid;

use crate::contract::model::{NewOrder, Order, OrderListQuery, OrderPatch, OrderStatus};

/// In-process API of the orders_info module.
///
/// Errors are [`OrdersInfoError`](crate::contract::error::OrdersInfoError)
/// values wrapped in `anyhow::Error`.
#[async_trait]
pub trait OrdersInfoApi: Send + Sync {
    async fn get_order(&self, id: Uuid) -> anyhow::Result<Order>;

    async fn list_orders(&self, query: OrderListQuery) -> anyhow::Result<Page<Order>>;

    async fn create_order(&self, new_order: NewOrder) -> anyhow::Result<Order>;

    async fn update_order(&self, id: Uuid, patch: OrderPatch) -> anyhow::Result<Order>;

    async fn set_status(&self, id: Uuid, status: OrderStatus) -> anyhow::Result<Order>;

    async fn delete_order(&self, id: Uuid) -> anyhow::Result<()>;
}
