use anyhow::Context;
use sea_orm::Set;

use crate::contract::model::{Customer, CustomerStatus};
use crate::infra::storage::entity::{ActiveModel, Model};

/// Convert a database row to a contract model; unknown status strings are a storage fault.
pub fn entity_to_contract(m: Model) -> anyhow::Result<Customer> {
    let status = m
        .status
        .parse::<CustomerStatus>()
        .with_context(|| format!("customer {} has corrupt status", m.id))?;
    Ok(Customer {
        id: m.id,
        name: m.name,
        email: m.email,
        phone: m.phone,
        orders_count: m.orders_count,
        order_total: m.order_total,
        customer_since: m.customer_since,
        status,
        abandoned_carts: m.abandoned_carts,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

/// Fully-set active model, used for both insert and update-by-PK.
pub fn contract_to_active(c: Customer) -> ActiveModel {
    ActiveModel {
        id: Set(c.id),
        name: Set(c.name),
        email: Set(c.email),
        phone: Set(c.phone),
        orders_count: Set(c.orders_count),
        order_total: Set(c.order_total),
        customer_since: Set(c.customer_since),
        status: Set(c.status.as_str().to_string()),
        abandoned_carts: Set(c.abandoned_carts),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}
