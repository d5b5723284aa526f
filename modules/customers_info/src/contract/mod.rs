pub mod client;
pub mod error;
pub mod model;

pub use client::CustomersInfoApi;
pub use error::CustomersInfoError;
pub use model::{Customer, CustomerPatch, CustomerStatus, NewCustomer};
