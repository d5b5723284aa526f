use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use modkit::api::SortOrder;
use modkit::UnknownVariant;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Customer lifecycle flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl CustomerStatus {
    pub const ALL: &'static [&'static str] = &["active", "inactive"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(UnknownVariant::new("status", other, Self::ALL)),
        }
    }
}

/// Pure customer model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub orders_count: i64,
    pub order_total: Decimal,
    pub customer_since: DateTime<Utc>,
    pub status: CustomerStatus,
    pub abandoned_carts: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a customer; unset optionals take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub orders_count: Option<i64>,
    pub order_total: Option<Decimal>,
    pub customer_since: Option<DateTime<Utc>>,
    pub status: Option<CustomerStatus>,
    pub abandoned_carts: Option<i64>,
}

/// Partial update; only `Some` fields are applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub orders_count: Option<i64>,
    pub order_total: Option<Decimal>,
    pub customer_since: Option<DateTime<Utc>>,
    pub status: Option<CustomerStatus>,
    pub abandoned_carts: Option<i64>,
}

/// Sortable customer fields, keyed by their camelCase wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomerSortField {
    Name,
    Email,
    Phone,
    OrdersCount,
    OrderTotal,
    CustomerSince,
    Status,
    AbandonedCarts,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl CustomerSortField {
    pub const ALL: &'static [&'static str] = &[
        "name",
        "email",
        "phone",
        "ordersCount",
        "orderTotal",
        "customerSince",
        "status",
        "abandonedCarts",
        "createdAt",
        "updatedAt",
    ];
}

impl FromStr for CustomerSortField {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "name" => Self::Name,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "ordersCount" => Self::OrdersCount,
            "orderTotal" => Self::OrderTotal,
            "customerSince" => Self::CustomerSince,
            "status" => Self::Status,
            "abandonedCarts" => Self::AbandonedCarts,
            "createdAt" => Self::CreatedAt,
            "updatedAt" => Self::UpdatedAt,
            other => return Err(UnknownVariant::new("sortBy", other, Self::ALL)),
        })
    }
}

/// List request as seen by the service; paging is normalised there.
#[derive(Debug, Clone, Default)]
pub struct CustomerListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: CustomerSortField,
    pub sort_order: SortOrder,
    pub search: Option<String>,
    pub status: Option<CustomerStatus>,
}

/// Summary lookback window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    #[default]
    Week,
    Month,
    Year,
}

impl Timeframe {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Unrecognised or missing selectors fall back to `week`.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("month") => Self::Month,
            Some("year") => Self::Year,
            _ => Self::Week,
        }
    }
}

/// One summary figure; `change` is absent for metrics without a prior period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub value: i64,
    pub change: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryMetrics {
    pub all_customers: Metric,
    pub active_customers: Metric,
    pub inactive_customers: Metric,
    pub new_customers: Metric,
    pub purchasing_customers: Metric,
    pub abandoned_carts: Metric,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSummary {
    pub timeframe: Timeframe,
    pub metrics: SummaryMetrics,
}
