use std::sync::Arc;

use axum::routing::{get, patch};
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub const BASE_PATH: &str = "/api/orders";

pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let orders = Router::new()
        .route("/", get(handlers::list_orders).post(handlers::create_order))
        .route(
            "/{id}",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .route("/{id}/status", patch(handlers::update_order_status))
        .layer(Extension(service));

    Ok(router.nest(BASE_PATH, orders))
}
