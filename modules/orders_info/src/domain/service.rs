use std::sync::Arc;

use modkit::api::{Page, PageLimits, PageRequest};
use modkit::validation::{is_valid_email, non_blank, normalize_email};
use modkit::Clock;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::contract::model::{NewOrder, Order, OrderListQuery, OrderPatch, OrderStatus, ShippingAddress};
use crate::domain::error::DomainError;
use crate::domain::repo::{OrderFilter, OrdersRepository};
use crate::domain::tracking;

/// Domain service with business rules for order records.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn OrdersRepository>,
    clock: Arc<dyn Clock>,
    config: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_name_length: usize,
    pub max_description_length: usize,
    pub tracking_id_attempts: u32,
    pub page_limits: PageLimits,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_name_length: 100,
            max_description_length: 500,
            tracking_id_attempts: 5,
            page_limits: PageLimits::default(),
        }
    }
}

impl Service {
    pub fn new(
        repo: Arc<dyn OrdersRepository>,
        clock: Arc<dyn Clock>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            clock,
            config,
        }
    }

    #[instrument(name = "orders_info.service.get_order", skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: Uuid) -> Result<Order, DomainError> {
        debug!("Getting order by id");
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::order_not_found(id))
    }

    #[instrument(name = "orders_info.service.list_orders", skip(self, query))]
    pub async fn list_orders(&self, query: OrderListQuery) -> Result<Page<Order>, DomainError> {
        let page = PageRequest::normalize(query.page, query.limit, self.config.page_limits);
        let filter = OrderFilter {
            page,
            query: OrderListQuery {
                search: non_blank(query.search),
                ..query
            },
        };

        let (items, total) = self.repo.list(&filter).await?;
        debug!(returned = items.len(), total, page = page.page, "Listed orders");
        Ok(Page {
            items,
            total,
            request: page,
        })
    }

    #[instrument(name = "orders_info.service.create_order", skip(self, new_order))]
    pub async fn create_order(&self, new_order: NewOrder) -> Result<Order, DomainError> {
        info!("Creating new order");

        let customer_name = self.validate_name(&new_order.customer_name)?;
        let order_total = match new_order.order_total {
            Some(total) => validate_amount(total)?,
            None => {
                return Err(DomainError::validation(
                    "orderTotal",
                    "Order total is required",
                ))
            }
        };
        let description = self.validate_description(new_order.description)?;
        let customer_email = validate_optional_email(new_order.customer_email)?;

        let tracking_id = match tracking::normalize(new_order.tracking_id) {
            Some(id) => {
                if self.repo.tracking_id_taken(&id, None).await? {
                    return Err(DomainError::tracking_id_already_exists(id));
                }
                id
            }
            None => self.allocate_tracking_id().await?,
        };

        let now = self.clock.now();
        let order = Order {
            id: Uuid::new_v4(),
            customer_name,
            order_date: new_order.order_date.unwrap_or(now),
            order_type: new_order.order_type.unwrap_or_default(),
            tracking_id,
            order_total,
            action: new_order.action.unwrap_or_default(),
            status: new_order.status.unwrap_or_default(),
            description,
            customer_email,
            customer_phone: non_blank(new_order.customer_phone),
            shipping_address: normalize_address(new_order.shipping_address),
            created_at: now,
            updated_at: now,
        };

        self.repo
            .insert(order.clone())
            .await
            .map_err(|e| DomainError::from_repo(e, &order.tracking_id))?;

        info!(
            "Successfully created order with id={} tracking_id={}",
            order.id, order.tracking_id
        );
        Ok(order)
    }

    #[instrument(name = "orders_info.service.update_order", skip(self, patch), fields(order_id = %id))]
    pub async fn update_order(&self, id: Uuid, patch: OrderPatch) -> Result<Order, DomainError> {
        info!("Updating order");

        let mut current = self.get_order(id).await?;

        if let Some(name) = patch.customer_name {
            current.customer_name = self.validate_name(&name)?;
        }
        if let Some(date) = patch.order_date {
            current.order_date = date;
        }
        if let Some(order_type) = patch.order_type {
            current.order_type = order_type;
        }
        if let Some(raw) = patch.tracking_id {
            let tracking_id = tracking::normalize(Some(raw)).ok_or_else(|| {
                DomainError::validation("trackingId", "Tracking id cannot be empty")
            })?;
            if tracking_id != current.tracking_id
                && self.repo.tracking_id_taken(&tracking_id, Some(id)).await?
            {
                return Err(DomainError::tracking_id_already_exists(tracking_id));
            }
            current.tracking_id = tracking_id;
        }
        if let Some(total) = patch.order_total {
            current.order_total = validate_amount(total)?;
        }
        if let Some(action) = patch.action {
            current.action = action;
        }
        if let Some(status) = patch.status {
            current.status = status;
        }
        // blank strings clear the optional fields
        if patch.description.is_some() {
            current.description = self.validate_description(patch.description)?;
        }
        if patch.customer_email.is_some() {
            current.customer_email = validate_optional_email(patch.customer_email)?;
        }
        if patch.customer_phone.is_some() {
            current.customer_phone = non_blank(patch.customer_phone);
        }
        if patch.shipping_address.is_some() {
            current.shipping_address = normalize_address(patch.shipping_address);
        }
        current.updated_at = self.clock.now();

        self.repo
            .update(current.clone())
            .await
            .map_err(|e| DomainError::from_repo(e, &current.tracking_id))?;

        info!("Successfully updated order");
        Ok(current)
    }

    /// Status-only update; every other field is left untouched.
    #[instrument(
        name = "orders_info.service.set_status",
        skip(self),
        fields(order_id = %id, status = %status)
    )]
    pub async fn set_status(&self, id: Uuid, status: OrderStatus) -> Result<Order, DomainError> {
        self.update_order(
            id,
            OrderPatch {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    #[instrument(name = "orders_info.service.delete_order", skip(self), fields(order_id = %id))]
    pub async fn delete_order(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting order");

        if !self.repo.delete(id).await? {
            return Err(DomainError::order_not_found(id));
        }

        info!("Successfully deleted order");
        Ok(())
    }

    async fn allocate_tracking_id(&self) -> Result<String, DomainError> {
        let attempts = self.config.tracking_id_attempts.max(1);
        for attempt in 1..=attempts {
            let candidate = tracking::generate(self.clock.now(), &mut rand::rng());
            if !self.repo.tracking_id_taken(&candidate, None).await? {
                return Ok(candidate);
            }
            warn!(attempt, %candidate, "Generated tracking id already taken");
        }
        Err(DomainError::TrackingIdUnavailable { attempts })
    }

    // --- validation helpers ---

    fn validate_name(&self, raw: &str) -> Result<String, DomainError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(DomainError::validation(
                "customerName",
                "Customer name is required",
            ));
        }
        let len = name.chars().count();
        if len > self.config.max_name_length {
            return Err(DomainError::validation(
                "customerName",
                format!(
                    "Customer name cannot exceed {} characters (got {len})",
                    self.config.max_name_length
                ),
            ));
        }
        Ok(name.to_string())
    }

    fn validate_description(&self, raw: Option<String>) -> Result<Option<String>, DomainError> {
        let Some(description) = non_blank(raw) else {
            return Ok(None);
        };
        if description.chars().count() > self.config.max_description_length {
            return Err(DomainError::validation(
                "description",
                format!(
                    "Description cannot exceed {} characters",
                    self.config.max_description_length
                ),
            ));
        }
        Ok(Some(description))
    }
}

fn validate_amount(amount: Decimal) -> Result<Decimal, DomainError> {
    if amount < Decimal::ZERO {
        return Err(DomainError::validation("orderTotal", "must not be negative"));
    }
    Ok(amount)
}

fn validate_optional_email(raw: Option<String>) -> Result<Option<String>, DomainError> {
    let Some(email) = non_blank(raw).map(|e| normalize_email(&e)) else {
        return Ok(None);
    };
    if !is_valid_email(&email) {
        return Err(DomainError::invalid_email(email));
    }
    Ok(Some(email))
}

fn normalize_address(raw: Option<ShippingAddress>) -> Option<ShippingAddress> {
    let a = raw?;
    let a = ShippingAddress {
        street: non_blank(a.street),
        city: non_blank(a.city),
        state: non_blank(a.state),
        zip_code: non_blank(a.zip_code),
        country: non_blank(a.country),
    };
    (!a.is_empty()).then_some(a)
}
