use std::sync::Arc;

use modkit::api::{Page, PageLimits, PageRequest};
use modkit::validation::{is_valid_email, normalize_email};
use modkit::Clock;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{
    Customer, CustomerListQuery, CustomerPatch, CustomerStatus, CustomerSummary, NewCustomer,
    Timeframe,
};
use crate::domain::error::DomainError;
use crate::domain::repo::{CustomerFilter, CustomersRepository};
use crate::domain::stats::SummaryWindow;

/// Domain service with business rules for customer records.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn CustomersRepository>,
    clock: Arc<dyn Clock>,
    config: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_name_length: usize,
    pub page_limits: PageLimits,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_name_length: 100,
            page_limits: PageLimits::default(),
        }
    }
}

impl Service {
    pub fn new(
        repo: Arc<dyn CustomersRepository>,
        clock: Arc<dyn Clock>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            clock,
            config,
        }
    }

    #[instrument(name = "customers_info.service.get_customer", skip(self), fields(customer_id = %id))]
    pub async fn get_customer(&self, id: Uuid) -> Result<Customer, DomainError> {
        debug!("Getting customer by id");
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::customer_not_found(id))
    }

    #[instrument(name = "customers_info.service.list_customers", skip(self, query))]
    pub async fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> Result<Page<Customer>, DomainError> {
        let page = PageRequest::normalize(query.page, query.limit, self.config.page_limits);
        let filter = CustomerFilter {
            page,
            query: CustomerListQuery {
                search: modkit::validation::non_blank(query.search),
                ..query
            },
        };

        let (items, total) = self.repo.list(&filter).await?;
        debug!(
            returned = items.len(),
            total,
            page = page.page,
            "Listed customers"
        );
        Ok(Page {
            items,
            total,
            request: page,
        })
    }

    #[instrument(
        name = "customers_info.service.create_customer",
        skip(self, new_customer),
        fields(email = %new_customer.email)
    )]
    pub async fn create_customer(&self, new_customer: NewCustomer) -> Result<Customer, DomainError> {
        info!("Creating new customer");

        let name = self.validate_name(&new_customer.name)?;
        let email = validate_email(&new_customer.email)?;
        let phone = validate_phone(&new_customer.phone)?;
        let orders_count = validate_count("ordersCount", new_customer.orders_count.unwrap_or(0))?;
        let order_total =
            validate_amount("orderTotal", new_customer.order_total.unwrap_or(Decimal::ZERO))?;
        let abandoned_carts =
            validate_count("abandonedCarts", new_customer.abandoned_carts.unwrap_or(0))?;

        if self.repo.email_taken(&email, None).await? {
            return Err(DomainError::email_already_exists(email));
        }

        let now = self.clock.now();
        let customer = Customer {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            orders_count,
            order_total,
            customer_since: new_customer.customer_since.unwrap_or(now),
            status: new_customer.status.unwrap_or_default(),
            abandoned_carts,
            created_at: now,
            updated_at: now,
        };

        self.repo
            .insert(customer.clone())
            .await
            .map_err(|e| DomainError::from_repo(e, &customer.email))?;

        info!("Successfully created customer with id={}", customer.id);
        Ok(customer)
    }

    #[instrument(
        name = "customers_info.service.update_customer",
        skip(self, patch),
        fields(customer_id = %id)
    )]
    pub async fn update_customer(
        &self,
        id: Uuid,
        patch: CustomerPatch,
    ) -> Result<Customer, DomainError> {
        info!("Updating customer");

        let mut current = self.get_customer(id).await?;

        if let Some(name) = patch.name {
            current.name = self.validate_name(&name)?;
        }
        if let Some(email) = patch.email {
            let email = validate_email(&email)?;
            if email != current.email && self.repo.email_taken(&email, Some(id)).await? {
                return Err(DomainError::email_already_exists(email));
            }
            current.email = email;
        }
        if let Some(phone) = patch.phone {
            current.phone = validate_phone(&phone)?;
        }
        if let Some(n) = patch.orders_count {
            current.orders_count = validate_count("ordersCount", n)?;
        }
        if let Some(total) = patch.order_total {
            current.order_total = validate_amount("orderTotal", total)?;
        }
        if let Some(since) = patch.customer_since {
            current.customer_since = since;
        }
        if let Some(status) = patch.status {
            current.status = status;
        }
        if let Some(n) = patch.abandoned_carts {
            current.abandoned_carts = validate_count("abandonedCarts", n)?;
        }
        current.updated_at = self.clock.now();

        self.repo
            .update(current.clone())
            .await
            .map_err(|e| DomainError::from_repo(e, &current.email))?;

        info!("Successfully updated customer");
        Ok(current)
    }

    /// Status-only update; every other field is left untouched.
    #[instrument(
        name = "customers_info.service.set_status",
        skip(self),
        fields(customer_id = %id, status = %status)
    )]
    pub async fn set_status(
        &self,
        id: Uuid,
        status: CustomerStatus,
    ) -> Result<Customer, DomainError> {
        self.update_customer(
            id,
            CustomerPatch {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    #[instrument(name = "customers_info.service.delete_customer", skip(self), fields(customer_id = %id))]
    pub async fn delete_customer(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting customer");

        if !self.repo.delete(id).await? {
            return Err(DomainError::customer_not_found(id));
        }

        info!("Successfully deleted customer");
        Ok(())
    }

    #[instrument(name = "customers_info.service.summary", skip(self), fields(timeframe = timeframe.as_str()))]
    pub async fn summary(&self, timeframe: Timeframe) -> Result<CustomerSummary, DomainError> {
        let window = SummaryWindow::resolve(timeframe, self.clock.now());
        debug!(
            period_start = %window.period_start,
            previous_start = %window.previous_start,
            "Computing customer summary"
        );
        let counts = self.repo.summary_counts(&window).await?;
        Ok(CustomerSummary::from_counts(timeframe, &counts))
    }

    // --- validation helpers ---

    fn validate_name(&self, raw: &str) -> Result<String, DomainError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name", "Name is required"));
        }
        let len = name.chars().count();
        if len > self.config.max_name_length {
            return Err(DomainError::validation(
                "name",
                format!(
                    "Name cannot exceed {} characters (got {len})",
                    self.config.max_name_length
                ),
            ));
        }
        Ok(name.to_string())
    }
}

fn validate_email(raw: &str) -> Result<String, DomainError> {
    let email = normalize_email(raw);
    if email.is_empty() {
        return Err(DomainError::validation("email", "Email is required"));
    }
    if !is_valid_email(&email) {
        return Err(DomainError::invalid_email(email));
    }
    Ok(email)
}

fn validate_phone(raw: &str) -> Result<String, DomainError> {
    let phone = raw.trim();
    if phone.is_empty() {
        return Err(DomainError::validation("phone", "Phone is required"));
    }
    Ok(phone.to_string())
}

fn validate_count(field: &'static str, n: i64) -> Result<i64, DomainError> {
    if n < 0 {
        return Err(DomainError::validation(field, "must not be negative"));
    }
    Ok(n)
}

fn validate_amount(field: &'static str, amount: Decimal) -> Result<Decimal, DomainError> {
    if amount < Decimal::ZERO {
        return Err(DomainError::validation(field, "must not be negative"));
    }
    Ok(amount)
}
