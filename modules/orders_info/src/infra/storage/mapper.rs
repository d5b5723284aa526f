use anyhow::Context;
use sea_orm::Set;

use crate::contract::model::{Order, OrderAction, OrderStatus, OrderType, ShippingAddress};
use crate::infra::storage::entity::{ActiveModel, Model};

/// Convert a database row to a contract model; unknown enum strings are a storage fault.
pub fn entity_to_contract(m: Model) -> anyhow::Result<Order> {
    let ctx = |field: &str| format!("order {} has corrupt {field}", m.id);
    let order_type = m.order_type.parse::<OrderType>().with_context(|| ctx("order_type"))?;
    let action = m.action.parse::<OrderAction>().with_context(|| ctx("action"))?;
    let status = m.status.parse::<OrderStatus>().with_context(|| ctx("status"))?;

    let address = ShippingAddress {
        street: m.shipping_street,
        city: m.shipping_city,
        state: m.shipping_state,
        zip_code: m.shipping_zip_code,
        country: m.shipping_country,
    };

    Ok(Order {
        id: m.id,
        customer_name: m.customer_name,
        order_date: m.order_date,
        order_type,
        tracking_id: m.tracking_id,
        order_total: m.order_total,
        action,
        status,
        description: m.description,
        customer_email: m.customer_email,
        customer_phone: m.customer_phone,
        shipping_address: (!address.is_empty()).then_some(address),
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

/// Fully-set active model, used for both insert and update-by-PK.
pub fn contract_to_active(o: Order) -> ActiveModel {
    let address = o.shipping_address.unwrap_or_default();
    ActiveModel {
        id: Set(o.id),
        customer_name: Set(o.customer_name),
        order_date: Set(o.order_date),
        order_type: Set(o.order_type.as_str().to_string()),
        tracking_id: Set(o.tracking_id),
        order_total: Set(o.order_total),
        action: Set(o.action.as_str().to_string()),
        status: Set(o.status.as_str().to_string()),
        description: Set(o.description),
        customer_email: Set(o.customer_email),
        customer_phone: Set(o.customer_phone),
        shipping_street: Set(address.street),
        shipping_city: Set(address.city),
        shipping_state: Set(address.state),
        shipping_zip_code: Set(address.zip_code),
        shipping_country: Set(address.country),
        created_at: Set(o.created_at),
        updated_at: Set(o.updated_at),
    }
}
