use std::sync::Arc;

use axum::routing::{get, patch};
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub const BASE_PATH: &str = "/api/customers";

pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let customers = Router::new()
        // static segment wins over `/{id}`
        .route("/summary", get(handlers::summary))
        .route(
            "/",
            get(handlers::list_customers).post(handlers::create_customer),
        )
        .route(
            "/{id}",
            get(handlers::get_customer)
                .put(handlers::update_customer)
                .delete(handlers::delete_customer),
        )
        .route("/{id}/status", patch(handlers::update_customer_status))
        .layer(Extension(service));

    Ok(router.nest(BASE_PATH, customers))
}
