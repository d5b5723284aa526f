pub mod client;
pub mod error;
pub mod model;

pub use client::OrdersInfoApi;
pub use error::OrdersInfoError;
pub use model::{
    NewOrder, Order, OrderAction, OrderPatch, OrderStatus, OrderType, ShippingAddress,
};
