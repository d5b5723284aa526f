//! HTTP ingress: wraps the routers contributed by business modules with the
//! shared middleware stack, adds `/health` and serves until shutdown.

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use axum::{middleware::from_fn, routing::get, Router};
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::{ApiIngressConfig, DEFAULT_BODY_LIMIT_BYTES, DEFAULT_REQUEST_TIMEOUT_SEC};

pub const MODULE_NAME: &str = "api_ingress";

pub struct ApiIngress {
    config: ArcSwap<ApiIngressConfig>,
}

impl Default for ApiIngress {
    fn default() -> Self {
        Self::new(ApiIngressConfig::default())
    }
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
        }
    }

    pub fn get_config(&self) -> ApiIngressConfig {
        (**self.config.load()).clone()
    }

    /// Server-wide timeout override; `0` keeps the configured value.
    pub fn override_request_timeout(&self, secs: u64) {
        if secs == 0 {
            return;
        }
        let mut cfg = self.get_config();
        cfg.request_timeout_sec = secs;
        self.config.store(Arc::new(cfg));
    }

    /// Final router: module routes + `/health`, wrapped in the middleware stack.
    pub fn build_router(&self, api: Router) -> Router {
        let cfg = self.get_config();
        let x_request_id = request_id::header();

        let mut router = api
            .route("/health", get(web::health_check))
            .fallback(web::not_found);

        // innermost first; the last layer added sees the request first
        router = router.layer(from_fn(request_id::push_req_id_to_extensions));
        router = router.layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes));
        router = router.layer(TimeoutLayer::new(Duration::from_secs(
            cfg.request_timeout_sec.max(1),
        )));
        if cfg.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router = router.layer(request_id::create_trace_layer());
        router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        tracing::debug!(
            cors = cfg.cors_enabled,
            timeout_sec = cfg.request_timeout_sec,
            body_limit = cfg.body_limit_bytes,
            "HTTP router assembled"
        );
        router
    }

    /// Bind and serve until `cancel` fires or an OS shutdown signal arrives.
    /// In-flight requests are drained before returning.
    pub async fn serve(
        &self,
        addr: SocketAddr,
        router: Router,
        cancel: CancellationToken,
    ) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        tracing::info!("HTTP server bound on {}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(modkit::runtime::shutdown_signal(cancel))
            .await
            .context("HTTP server failed")?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[async_trait]
impl modkit::Module for ApiIngress {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &modkit::ModuleCtx) -> anyhow::Result<()> {
        let cfg = ctx.module_config::<ApiIngressConfig>();
        tracing::debug!(module = MODULE_NAME, ?cfg, "module config loaded");
        self.config.store(Arc::new(cfg));
        Ok(())
    }
}
