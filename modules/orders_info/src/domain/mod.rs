pub mod error;
pub mod repo;
pub mod service;
pub mod tracking;
