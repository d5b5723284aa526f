use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use modkit::api::PageLimits;
use modkit::{DbModule, Module, ModuleCtx, RestfulModule};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::OrdersInfoConfig;
use crate::contract::client::OrdersInfoApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::OrdersInfoLocalClient;
use crate::infra::storage::sea_orm_repo::SeaOrmOrdersRepository;

pub const MODULE_NAME: &str = "orders_info";

#[derive(Default)]
pub struct OrdersInfo {
    service: ArcSwapOption<Service>,
}

impl OrdersInfo {
    fn service(&self) -> anyhow::Result<Arc<Service>> {
        self.service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("{MODULE_NAME} service not initialized"))
    }

    /// In-process client for other modules; available after `init`.
    pub fn client(&self) -> anyhow::Result<Arc<dyn OrdersInfoApi>> {
        Ok(Arc::new(OrdersInfoLocalClient::new(self.service()?)))
    }
}

#[async_trait]
impl Module for OrdersInfo {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        info!("Initializing orders_info module");

        let cfg: OrdersInfoConfig = ctx.module_config();
        debug!(
            "Loaded orders_info config: default_page_size={}, max_page_size={}, tracking_id_attempts={}",
            cfg.default_page_size, cfg.max_page_size, cfg.tracking_id_attempts
        );

        let db = ctx.db_required()?;
        let repo = SeaOrmOrdersRepository::new(db.sea());
        let service_config = ServiceConfig {
            tracking_id_attempts: cfg.tracking_id_attempts,
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
impl DbModule for OrdersInfo {
    async fn migrate(&self, db: &modkit_db::DbHandle) -> anyhow::Result<()> {
        info!("Running orders_info database migrations");
        crate::infra::storage::migrations::Migrator::up(db.seaorm(), None).await?;
        Ok(())
    }
}

impl RestfulModule for OrdersInfo {
    fn register_rest(&self, _ctx: &ModuleCtx, router: axum::Router) -> anyhow::Result<axum::Router> {
        info!("Registering orders_info REST routes");
        routes::register_routes(router, self.service()?)
    }
}
