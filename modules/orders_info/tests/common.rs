#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use modkit::FixedClock;
use modkit_db::{ConnectOpts, DbHandle};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

use orders_info::{
    domain::service::{Service, ServiceConfig},
    infra::storage::{migrations::Migrator, sea_orm_repo::SeaOrmOrdersRepository},
};

pub fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub struct Harness {
    pub db: Arc<DbHandle>,
    pub clock: Arc<FixedClock>,
    pub service: Arc<Service>,
}

impl Harness {
    /// Fresh in-memory SQLite with migrations applied and a clock pinned to 2024-03-15 12:00 UTC.
    pub async fn new() -> Self {
        let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
            .await
            .expect("connect test database");
        Migrator::up(db.seaorm(), None)
            .await
            .expect("run migrations");

        let clock = Arc::new(FixedClock::new(ts(2024, 3, 15)));
        let repo = SeaOrmOrdersRepository::new(db.sea());
        let service = Arc::new(Service::new(
            Arc::new(repo),
            clock.clone(),
            ServiceConfig::default(),
        ));
        Self {
            db: Arc::new(db),
            clock,
            service,
        }
    }

    pub fn router(&self) -> Router {
        orders_info::api::rest::routes::register_routes(Router::new(), self.service.clone())
            .expect("register routes")
    }
}

pub async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
