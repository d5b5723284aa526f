use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use modkit::api::SortOrder;
use modkit::UnknownVariant;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Sales channel the order came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderType {
    #[default]
    Online,
    Offline,
    Phone,
    Email,
}

impl OrderType {
    pub const ALL: &'static [&'static str] = &["online", "offline", "phone", "email"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "online" => Self::Online,
            "offline" => Self::Offline,
            "phone" => Self::Phone,
            "email" => Self::Email,
            other => return Err(UnknownVariant::new("orderType", other, Self::ALL)),
        })
    }
}

/// Fulfilment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderAction {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderAction {
    pub const ALL: &'static [&'static str] = &[
        "pending",
        "processing",
        "shipped",
        "delivered",
        "cancelled",
        "returned",
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Returned => "returned",
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderAction {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            "returned" => Self::Returned,
            other => return Err(UnknownVariant::new("action", other, Self::ALL)),
        })
    }
}

/// Record lifecycle flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Active,
    Inactive,
    Completed,
}

impl OrderStatus {
    pub const ALL: &'static [&'static str] = &["active", "inactive", "completed"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            "completed" => Self::Completed,
            other => return Err(UnknownVariant::new("status", other, Self::ALL)),
        })
    }
}

/// Postal address; every part is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShippingAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl ShippingAddress {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Pure order model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub order_date: DateTime<Utc>,
    pub order_type: OrderType,
    pub tracking_id: String,
    pub order_total: Decimal,
    pub action: OrderAction,
    pub status: OrderStatus,
    pub description: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub shipping_address: Option<ShippingAddress>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating an order. `order_total` is required and checked by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewOrder {
    pub customer_name: String,
    pub order_date: Option<DateTime<Utc>>,
    pub order_type: Option<OrderType>,
    pub tracking_id: Option<String>,
    pub order_total: Option<Decimal>,
    pub action: Option<OrderAction>,
    pub status: Option<OrderStatus>,
    pub description: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub shipping_address: Option<ShippingAddress>,
}

/// Partial update; only `Some` fields are applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderPatch {
    pub customer_name: Option<String>,
    pub order_date: Option<DateTime<Utc>>,
    pub order_type: Option<OrderType>,
    pub tracking_id: Option<String>,
    pub order_total: Option<Decimal>,
    pub action: Option<OrderAction>,
    pub status: Option<OrderStatus>,
    pub description: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub shipping_address: Option<ShippingAddress>,
}

impl OrderPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Sortable order fields, keyed by their camelCase wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSortField {
    CustomerName,
    OrderDate,
    OrderType,
    TrackingId,
    OrderTotal,
    Action,
    Status,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl OrderSortField {
    pub const ALL: &'static [&'static str] = &[
        "customerName",
        "orderDate",
        "orderType",
        "trackingId",
        "orderTotal",
        "action",
        "status",
        "createdAt",
        "updatedAt",
    ];
}

impl FromStr for OrderSortField {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "customerName" => Self::CustomerName,
            "orderDate" => Self::OrderDate,
            "orderType" => Self::OrderType,
            "trackingId" => Self::TrackingId,
            "orderTotal" => Self::OrderTotal,
            "action" => Self::Action,
            "status" => Self::Status,
            "createdAt" => Self::CreatedAt,
            "updatedAt" => Self::UpdatedAt,
            other => return Err(UnknownVariant::new("sortBy", other, Self::ALL)),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: OrderSortField,
    pub sort_order: SortOrder,
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
    pub action: Option<OrderAction>,
    pub order_type: Option<OrderType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_accept_only_wire_names() {
        for s in OrderType::ALL {
            assert_eq!(s.parse::<OrderType>().unwrap().as_str(), *s);
        }
        for s in OrderAction::ALL {
            assert_eq!(s.parse::<OrderAction>().unwrap().as_str(), *s);
        }
        for s in OrderStatus::ALL {
            assert_eq!(s.parse::<OrderStatus>().unwrap().as_str(), *s);
        }
        assert_eq!("fax".parse::<OrderType>().unwrap_err().field, "orderType");
        assert_eq!("lost".parse::<OrderAction>().unwrap_err().field, "action");
        assert_eq!("archived".parse::<OrderStatus>().unwrap_err().field, "status");
    }

    #[test]
    fn defaults() {
        assert_eq!(OrderType::default(), OrderType::Online);
        assert_eq!(OrderAction::default(), OrderAction::Pending);
        assert_eq!(OrderStatus::default(), OrderStatus::Active);
        assert_eq!(OrderSortField::default(), OrderSortField::CreatedAt);
    }

    #[test]
    fn empty_address_is_detected() {
        assert!(ShippingAddress::default().is_empty());
        let a = ShippingAddress {
            city: Some("Lisbon".into()),
            ..Default::default()
        };
        assert!(!a.is_empty());
    }
}
