use chrono::{DateTime, Utc};
use modkit::api::SortOrder;
use modkit::validation::non_blank;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{
    Customer, CustomerListQuery, CustomerPatch, CustomerStatus, CustomerSummary, Metric,
    NewCustomer,
};
use crate::domain::error::DomainError;

/// REST representation of a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub orders_count: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub order_total: Decimal,
    pub customer_since: DateTime<Utc>,
    pub status: String,
    pub abandoned_carts: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `POST /api/customers` body. Required fields are optional here so that a
/// missing one is reported by the validator with a field-specific message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerReq {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub orders_count: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub order_total: Option<Decimal>,
    pub customer_since: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub abandoned_carts: Option<i64>,
}

/// `PUT /api/customers/{id}` body; absent fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerReq {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub orders_count: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub order_total: Option<Decimal>,
    pub customer_since: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub abandoned_carts: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatusReq {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCustomersQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryQuery {
    pub timeframe: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricDto {
    pub value: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetricsDto {
    pub all_customers: MetricDto,
    pub active_customers: MetricDto,
    pub inactive_customers: MetricDto,
    pub new_customers: MetricDto,
    pub purchasing_customers: MetricDto,
    pub abandoned_carts: MetricDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryDto {
    pub timeframe: &'static str,
    pub metrics: SummaryMetricsDto,
}

// Conversion implementations between REST DTOs and contract models

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            orders_count: c.orders_count,
            order_total: c.order_total,
            customer_since: c.customer_since,
            status: c.status.as_str().to_string(),
            abandoned_carts: c.abandoned_carts,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

fn parse_status(raw: Option<String>) -> Result<Option<CustomerStatus>, DomainError> {
    Ok(raw
        .as_deref()
        .map(str::parse::<CustomerStatus>)
        .transpose()?)
}

impl TryFrom<CreateCustomerReq> for NewCustomer {
    type Error = DomainError;

    fn try_from(req: CreateCustomerReq) -> Result<Self, Self::Error> {
        Ok(Self {
            name: req.name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            phone: req.phone.unwrap_or_default(),
            orders_count: req.orders_count,
            order_total: req.order_total,
            customer_since: req.customer_since,
            status: parse_status(req.status)?,
            abandoned_carts: req.abandoned_carts,
        })
    }
}

impl TryFrom<UpdateCustomerReq> for CustomerPatch {
    type Error = DomainError;

    fn try_from(req: UpdateCustomerReq) -> Result<Self, Self::Error> {
        Ok(Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            orders_count: req.orders_count,
            order_total: req.order_total,
            customer_since: req.customer_since,
            status: parse_status(req.status)?,
            abandoned_carts: req.abandoned_carts,
        })
    }
}

impl TryFrom<UpdateStatusReq> for CustomerStatus {
    type Error = DomainError;

    fn try_from(req: UpdateStatusReq) -> Result<Self, Self::Error> {
        match non_blank(req.status) {
            Some(s) => Ok(s.parse()?),
            None => Err(DomainError::validation("status", "Status is required")),
        }
    }
}

impl TryFrom<ListCustomersQuery> for CustomerListQuery {
    type Error = DomainError;

    fn try_from(q: ListCustomersQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            page: q.page,
            limit: q.limit,
            sort_by: match non_blank(q.sort_by) {
                Some(s) => s.parse()?,
                None => Default::default(),
            },
            sort_order: SortOrder::parse_opt(q.sort_order.as_deref())?,
            search: q.search,
            status: parse_status(non_blank(q.status))?,
        })
    }
}

impl From<Metric> for MetricDto {
    fn from(m: Metric) -> Self {
        Self {
            value: m.value,
            change: m.change,
        }
    }
}

impl From<CustomerSummary> for SummaryDto {
    fn from(s: CustomerSummary) -> Self {
        let m = s.metrics;
        Self {
            timeframe: s.timeframe.as_str(),
            metrics: SummaryMetricsDto {
                all_customers: m.all_customers.into(),
                active_customers: m.active_customers.into(),
                inactive_customers: m.inactive_customers.into(),
                new_customers: m.new_customers.into(),
                purchasing_customers: m.purchasing_customers.into(),
                abandoned_carts: m.abandoned_carts.into(),
            },
        }
    }
}
