use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use modkit::api::PageLimits;
use modkit::{DbModule, Module, ModuleCtx, RestfulModule};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::CustomersInfoConfig;
use crate::contract::client::CustomersInfoApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::CustomersInfoLocalClient;
use crate::infra::storage::sea_orm_repo::SeaOrmCustomersRepository;

pub const MODULE_NAME: &str = "customers_info";

#[derive(Default)]
pub struct CustomersInfo {
    // Keep the domain service behind ArcSwap for cheap read-mostly access.
    service: ArcSwapOption<Service>,
}

impl CustomersInfo {
    fn service(&self) -> anyhow::Result<Arc<Service>> {
        self.service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("{MODULE_NAME} service not initialized"))
    }

    /// In-process client for other modules; available after `init`.
    pub fn client(&self) -> anyhow::Result<Arc<dyn CustomersInfoApi>> {
        Ok(Arc::new(CustomersInfoLocalClient::new(self.service()?)))
    }
}

#[async_trait]
impl Module for CustomersInfo {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        info!("Initializing customers_info module");

        let cfg: CustomersInfoConfig = ctx.module_config();
        debug!(
            "Loaded customers_info config: default_page_size={}, max_page_size={}",
            cfg.default_page_size, cfg.max_page_size
        );

        let db = ctx.db_required()?;
        let repo = SeaOrmCustomersRepository::new(db.sea());
        let service_config = ServiceConfig {
            page_limits: PageLimits {
                default_limit: u64::from(cfg.default_page_size),
                max_limit: u64::from(cfg.max_page_size),
            },
            ..Default::default()
        };
        let service = Service::new(Arc::new(repo), ctx.clock(), service_config);
        self.service.store(Some(Arc::new(service)));
        Ok(())
    }
}

#[async_trait]
impl DbModule for CustomersInfo {
    async fn migrate(&self, db: &modkit_db::DbHandle) -> anyhow::Result<()> {
        info!("Running customers_info database migrations");
        crate::infra::storage::migrations::Migrator::up(db.seaorm(), None).await?;
        Ok(())
    }
}

impl RestfulModule for CustomersInfo {
    fn register_rest(&self, _ctx: &ModuleCtx, router: axum::Router) -> anyhow::Result<axum::Router> {
        info!("Registering customers_info REST routes");
        routes::register_routes(router, self.service()?)
    }
}
