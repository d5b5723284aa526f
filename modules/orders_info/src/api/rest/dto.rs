use chrono::{DateTime, Utc};
use modkit::api::SortOrder;
use modkit::validation::non_blank;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{
    NewOrder, Order, OrderAction, OrderListQuery, OrderPatch, OrderStatus, OrderType,
    ShippingAddress,
};
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// REST representation of an order. Unset optional fields are omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: Uuid,
    pub customer_name: String,
    pub order_date: DateTime<Utc>,
    pub order_type: String,
    pub tracking_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub order_total: Decimal,
    pub action: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingAddressDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `POST /api/orders` and `PUT /api/orders/{id}` body; every field optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReq {
    pub customer_name: Option<String>,
    pub order_date: Option<DateTime<Utc>>,
    pub order_type: Option<String>,
    pub tracking_id: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub order_total: Option<Decimal>,
    pub action: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub shipping_address: Option<ShippingAddressDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatusReq {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub action: Option<String>,
    pub order_type: Option<String>,
}

impl From<ShippingAddress> for ShippingAddressDto {
    fn from(a: ShippingAddress) -> Self {
        Self {
            street: a.street,
            city: a.city,
            state: a.state,
            zip_code: a.zip_code,
            country: a.country,
        }
    }
}

impl From<ShippingAddressDto> for ShippingAddress {
    fn from(a: ShippingAddressDto) -> Self {
        Self {
            street: a.street,
            city: a.city,
            state: a.state,
            zip_code: a.zip_code,
            country: a.country,
        }
    }
}

impl From<Order> for OrderDto {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            customer_name: o.customer_name,
            order_date: o.order_date,
            order_type: o.order_type.as_str().to_string(),
            tracking_id: o.tracking_id,
            order_total: o.order_total,
            action: o.action.as_str().to_string(),
            status: o.status.as_str().to_string(),
            description: o.description,
            customer_email: o.customer_email,
            customer_phone: o.customer_phone,
            shipping_address: o.shipping_address.map(Into::into),
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

fn parse_opt<T>(raw: Option<String>) -> Result<Option<T>, DomainError>
where
    T: std::str::FromStr<Err = modkit::UnknownVariant>,
{
    Ok(raw.as_deref().map(str::parse::<T>).transpose()?)
}

impl TryFrom<OrderReq> for NewOrder {
    type Error = DomainError;

    fn try_from(req: OrderReq) -> Result<Self, Self::Error> {
        Ok(Self {
            customer_name: req.customer_name.unwrap_or_default(),
            order_date: req.order_date,
            order_type: parse_opt::<OrderType>(req.order_type)?,
            tracking_id: req.tracking_id,
            order_total: req.order_total,
            action: parse_opt::<OrderAction>(req.action)?,
            status: parse_opt::<OrderStatus>(req.status)?,
            description: req.description,
            customer_email: req.customer_email,
            customer_phone: req.customer_phone,
            shipping_address: req.shipping_address.map(Into::into),
        })
    }
}

impl TryFrom<OrderReq> for OrderPatch {
    type Error = DomainError;

    fn try_from(req: OrderReq) -> Result<Self, Self::Error> {
        Ok(Self {
            customer_name: req.customer_name,
            order_date: req.order_date,
            order_type: parse_opt::<OrderType>(req.order_type)?,
            tracking_id: req.tracking_id,
            order_total: req.order_total,
            action: parse_opt::<OrderAction>(req.action)?,
            status: parse_opt::<OrderStatus>(req.status)?,
            description: req.description,
            customer_email: req.customer_email,
            customer_phone: req.customer_phone,
            shipping_address: req.shipping_address.map(Into::into),
        })
    }
}

impl TryFrom<UpdateStatusReq> for OrderStatus {
    type Error = DomainError;

    fn try_from(req: UpdateStatusReq) -> Result<Self, Self::Error> {
        match non_blank(req.status) {
            Some(s) => Ok(s.parse()?),
            None => Err(DomainError::validation("status", "Status is required")),
        }
    }
}

impl TryFrom<ListOrdersQuery> for OrderListQuery {
    type Error = DomainError;

    fn try_from(q: ListOrdersQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            page: q.page,
            limit: q.limit,
            sort_by: match non_blank(q.sort_by) {
                Some(s) => s.parse()?,
                None => Default::default(),
            },
            sort_order: SortOrder::parse_opt(q.sort_order.as_deref())?,
            search: q.search,
            status: parse_opt::<OrderStatus>(non_blank(q.status))?,
            action: parse_opt::<OrderAction>(non_blank(q.action))?,
            order_type: parse_opt::<OrderType>(non_blank(q.order_type))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::OrderSortField;

    #[test]
    fn request_parses_nested_address() {
        let req: OrderReq = serde_json::from_str(
            r#"{"customerName":"Ann","orderTotal":19.99,"orderType":"phone",
                "shippingAddress":{"city":"Porto","zipCode":"4000"}}"#,
        )
        .unwrap();
        let new = NewOrder::try_from(req).unwrap();
        assert_eq!(new.order_total, Some(Decimal::new(1999, 2)));
        assert_eq!(new.order_type, Some(OrderType::Phone));
        let addr = new.shipping_address.unwrap();
        assert_eq!(addr.city.as_deref(), Some("Porto"));
        assert_eq!(addr.zip_code.as_deref(), Some("4000"));
        assert!(addr.street.is_none());
    }

    #[test]
    fn unknown_enum_values_are_validation_errors() {
        let req = OrderReq {
            action: Some("teleported".into()),
            ..Default::default()
        };
        assert!(matches!(
            NewOrder::try_from(req),
            Err(DomainError::Validation { .. })
        ));

        let q = ListOrdersQuery {
            order_type: Some("fax".into()),
            ..Default::default()
        };
        assert!(OrderListQuery::try_from(q).is_err());
    }

    #[test]
    fn list_query_defaults_and_blank_filters() {
        let q = OrderListQuery::try_from(ListOrdersQuery {
            status: Some("  ".into()),
            action: Some("shipped".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(q.sort_by, OrderSortField::CreatedAt);
        assert_eq!(q.sort_order, SortOrder::Desc);
        assert!(q.status.is_none());
        assert_eq!(q.action, Some(OrderAction::Shipped));
    }

    #[test]
    fn dto_omits_unset_optionals() {
        let now = chrono::Utc::now();
        let dto = OrderDto::from(Order {
            id: Uuid::nil(),
            customer_name: "Ann".into(),
            order_date: now,
            order_type: OrderType::Online,
            tracking_id: "ORD-1-ABCDEF".into(),
            order_total: Decimal::new(500, 2),
            action: OrderAction::Pending,
            status: OrderStatus::Active,
            description: None,
            customer_email: None,
            customer_phone: None,
            shipping_address: None,
            created_at: now,
            updated_at: now,
        });
        let v = serde_json::to_value(dto).unwrap();
        assert_eq!(v["orderTotal"], 5.0);
        assert_eq!(v["trackingId"], "ORD-1-ABCDEF");
        assert!(v.get("description").is_none());
        assert!(v.get("shippingAddress").is_none());
    }
}
