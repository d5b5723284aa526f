//! # ModKit - module wiring for the CRM server
//!
//! Every business module implements [`Module`] plus any of the optional
//! capabilities ([`DbModule`], [`RestfulModule`]). The server registers the
//! modules in a [`ModuleRegistry`] and drives the phases in order:
//! init → DB migrations → REST registration.
//!
//! ## Example
//!
//! ```rust,ignore
//! use modkit::{Module, DbModule, RestfulModule, ModuleRegistry};
//!
//! let registry = ModuleRegistry::builder()
//!     .with_module(Arc::new(CustomersInfo::default()))
//!     .build()?;
//! ```

pub use anyhow::Result;
pub use async_trait::async_trait;

pub mod contracts;
pub use contracts::{DbModule, Module, RestfulModule};

pub mod context;
pub use context::{ConfigProvider, ModuleCtx, ModuleCtxBuilder};

pub mod registry;
pub use registry::{ModuleRegistry, RegistryBuilder, RegistryError};

// REST helpers shared by module handlers
pub mod api;
pub use api::{ApiFailure, ApiResponse, ListResponse};

pub mod clock;
pub use clock::{Clock, FixedClock, SystemClock};

pub mod runtime;

pub mod validation;

pub mod wire;
pub use wire::UnknownVariant;
