use async_trait::async_trait;
use modkit::api::Page;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::OrdersInfoApi,
    error::OrdersInfoError,
    model::{NewOrder, Order, OrderListQuery, OrderPatch, OrderStatus},
};
use crate::domain::{error::DomainError, service::Service};

/// Local implementation of the OrdersInfoApi trait that delegates to the domain service
pub struct OrdersInfoLocalClient {
    service: Arc<Service>,
}

impl OrdersInfoLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl OrdersInfoApi for OrdersInfoLocalClient {
    async fn get_order(&self, id: Uuid) -> anyhow::Result<Order> {
        self.service.get_order(id).await.map_err(map_domain_error)
    }

    async fn list_orders(&self, query: OrderListQuery) -> anyhow::Result<Page<Order>> {
        self.service.list_orders(query).await.map_err(map_domain_error)
    }

    async fn create_order(&self, new_order: NewOrder) -> anyhow::Result<Order> {
        self.service
            .create_order(new_order)
            .await
            .map_err(map_domain_error)
    }

    async fn update_order(&self, id: Uuid, patch: OrderPatch) -> anyhow::Result<Order> {
        self.service
            .update_order(id, patch)
            .await
            .map_err(map_domain_error)
    }

    async fn set_status(&self, id: Uuid, status: OrderStatus) -> anyhow::Result<Order> {
        self.service
            .set_status(id, status)
            .await
            .map_err(map_domain_error)
    }

    async fn delete_order(&self, id: Uuid) -> anyhow::Result<()> {
        self.service.delete_order(id).await.map_err(map_domain_error)
    }
}

fn map_domain_error(e: DomainError) -> anyhow::Error {
    let contract_error = match e {
        DomainError::OrderNotFound { id } => OrdersInfoError::not_found(id),
        DomainError::TrackingIdAlreadyExists { tracking_id } => {
            OrdersInfoError::conflict(tracking_id)
        }
        DomainError::InvalidEmail { email } => {
            OrdersInfoError::validation(format!("Invalid email: {email}"))
        }
        DomainError::Validation { field, message } => {
            OrdersInfoError::validation(format!("{field}: {message}"))
        }
        e @ (DomainError::TrackingIdUnavailable { .. } | DomainError::Database { .. }) => {
            tracing::error!(error = %e, "orders_info internal failure");
            OrdersInfoError::internal()
        }
    };
    anyhow::Error::new(contract_error)
}
