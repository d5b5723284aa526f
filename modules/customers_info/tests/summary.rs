//! Summary statistics against a seeded collection, through the service and HTTP.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use modkit::{ModuleCtxBuilder, ModuleRegistry};
use modkit_db::{ConnectOpts, DbHandle};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use common::{call, ts, Harness};
use customers_info::model::{CustomerStatus, NewCustomer, Timeframe};
use customers_info::CustomersInfo;

async fn add(
    h: &Harness,
    tag: &str,
    since: DateTime<Utc>,
    status: CustomerStatus,
    orders: i64,
    carts: i64,
) {
    h.service
        .create_customer(NewCustomer {
            name: format!("Customer {tag}"),
            email: format!("{tag}@example.com"),
            phone: "555-0100".into(),
            orders_count: Some(orders),
            customer_since: Some(since),
            status: Some(status),
            abandoned_carts: Some(carts),
            ..Default::default()
        })
        .await
        .unwrap();
}

/// Now is 2024-03-15; the week window starts 2024-03-08 and the previous one 2024-03-01.
async fn seeded() -> Harness {
    let h = Harness::new().await;
    add(&h, "a", ts(2024, 2, 1), CustomerStatus::Active, 2, 1).await;
    add(&h, "b", ts(2024, 3, 3), CustomerStatus::Active, 0, 2).await;
    add(&h, "c", ts(2024, 3, 5), CustomerStatus::Inactive, 1, 0).await;
    add(&h, "d", ts(2024, 3, 10), CustomerStatus::Active, 3, 1).await;
    add(&h, "e", ts(2024, 3, 14), CustomerStatus::Inactive, 0, 0).await;
    h
}

#[tokio::test]
async fn weekly_summary_counts_and_changes() {
    let h = seeded().await;
    let s = h.service.summary(Timeframe::Week).await.unwrap();
    let m = &s.metrics;

    assert_eq!(s.timeframe, Timeframe::Week);
    assert_eq!(m.all_customers.value, 5);
    assert_eq!(m.all_customers.change.as_deref(), Some("+66.67%"));
    assert_eq!(m.active_customers.value, 3);
    assert_eq!(m.active_customers.change.as_deref(), Some("+50.00%"));
    assert_eq!(m.inactive_customers.value, 2);
    assert_eq!(m.inactive_customers.change.as_deref(), Some("+100.00%"));
    assert_eq!(m.new_customers.value, 2);
    assert_eq!(m.new_customers.change.as_deref(), Some("+0.00%"));
    assert_eq!(m.purchasing_customers.value, 3);
    assert!(m.purchasing_customers.change.is_none());
    assert_eq!(m.abandoned_carts.value, 4);
    assert!(m.abandoned_carts.change.is_none());
}

#[tokio::test]
async fn weekly_window_edges() {
    let h = Harness::new().await;
    let period_start = ts(2024, 3, 8);
    let previous_start = ts(2024, 3, 1);
    add(&h, "on-period-start", period_start, CustomerStatus::Active, 0, 0).await;
    add(&h, "before-period-start", period_start - Duration::seconds(1), CustomerStatus::Inactive, 0, 0).await;
    add(&h, "on-previous-start", previous_start, CustomerStatus::Active, 0, 0).await;
    add(&h, "before-previous-start", previous_start - Duration::seconds(1), CustomerStatus::Inactive, 0, 0).await;

    let m = h.service.summary(Timeframe::Week).await.unwrap().metrics;

    // new: only the row on period start; previous new: [previous start, period start)
    assert_eq!(m.new_customers.value, 1);
    assert_eq!(m.new_customers.change.as_deref(), Some("-50.00%"));
    // previous population excludes the row on period start
    assert_eq!(m.all_customers.value, 4);
    assert_eq!(m.all_customers.change.as_deref(), Some("+33.33%"));
    assert_eq!(m.active_customers.value, 2);
    assert_eq!(m.active_customers.change.as_deref(), Some("+100.00%"));
    assert_eq!(m.inactive_customers.value, 2);
    assert_eq!(m.inactive_customers.change.as_deref(), Some("+0.00%"));
}

#[tokio::test]
async fn yearly_summary_has_no_previous_population() {
    let h = seeded().await;
    let s = h.service.summary(Timeframe::Year).await.unwrap();
    let m = &s.metrics;

    assert_eq!(m.new_customers.value, 5);
    assert_eq!(m.new_customers.change.as_deref(), Some("+100%"));
    assert_eq!(m.all_customers.change.as_deref(), Some("+100%"));
}

#[tokio::test]
async fn empty_collection_reports_zeroes() {
    let h = Harness::new().await;
    let s = h.service.summary(Timeframe::Month).await.unwrap();
    assert_eq!(s.metrics.all_customers.value, 0);
    assert_eq!(s.metrics.all_customers.change.as_deref(), Some("0%"));
    assert_eq!(s.metrics.abandoned_carts.value, 0);
}

#[tokio::test]
async fn summary_endpoint_shape() {
    let h = seeded().await;
    let app = h.router();

    let (status, v) = call(&app, Method::GET, "/api/customers/summary?timeframe=week", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    assert_eq!(v["data"]["timeframe"], "week");
    let metrics = &v["data"]["metrics"];
    assert_eq!(metrics["allCustomers"], json!({ "value": 5, "change": "+66.67%" }));
    assert_eq!(metrics["newCustomers"], json!({ "value": 2, "change": "+0.00%" }));
    assert_eq!(metrics["purchasingCustomers"], json!({ "value": 3 }));
    assert_eq!(metrics["abandonedCarts"], json!({ "value": 4 }));
}

#[tokio::test]
async fn unknown_timeframe_falls_back_to_week() {
    let h = seeded().await;
    let app = h.router();

    let (status, v) = call(&app, Method::GET, "/api/customers/summary?timeframe=decade", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["data"]["timeframe"], "week");

    let (_, default) = call(&app, Method::GET, "/api/customers/summary", None).await;
    assert_eq!(default["data"]["timeframe"], "week");
    assert_eq!(default["data"]["metrics"], v["data"]["metrics"]);
}

#[tokio::test]
async fn module_lifecycle_through_registry() {
    let db = Arc::new(
        DbHandle::connect("sqlite::memory:", ConnectOpts::default())
            .await
            .unwrap(),
    );
    let module = Arc::new(CustomersInfo::default());
    let registry = ModuleRegistry::builder()
        .with_module(module.clone())
        .build()
        .unwrap();

    let ctx = ModuleCtxBuilder::new(CancellationToken::new())
        .with_db(db.clone())
        .build();
    registry.run_init_phase(&ctx).await.unwrap();
    registry.run_db_phase(&db).await.unwrap();
    let app: Router = registry.run_rest_phase(&ctx, Router::new()).unwrap();

    let (status, created) = call(
        &app,
        Method::POST,
        "/api/customers",
        Some(json!({ "name": "Reg", "email": "reg@example.com", "phone": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let client = module.client().unwrap();
    let id = created["data"]["id"].as_str().unwrap().parse().unwrap();
    let fetched = client.get_customer(id).await.unwrap();
    assert_eq!(fetched.email, "reg@example.com");
}
