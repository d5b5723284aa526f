//! REST layer exercised through the real router with `oneshot`.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{call, Harness};

fn body(name: &str, email: &str) -> Value {
    json!({ "name": name, "email": email, "phone": "555-0100" })
}

async fn seed(app: &axum::Router, n: usize) {
    for i in 0..n {
        let (status, _) = call(
            app,
            Method::POST,
            "/api/customers",
            Some(body(&format!("Customer {i:02}"), &format!("c{i:02}@example.com"))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn create_returns_envelope_with_defaults() {
    let app = Harness::new().await.router();

    let (status, v) = call(
        &app,
        Method::POST,
        "/api/customers",
        Some(json!({
            "name": "Jane",
            "email": "Jane@Example.com",
            "phone": "555",
            "orderTotal": 42.5
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(v["success"], true);
    assert_eq!(v["message"], "Customer created successfully");
    let data = &v["data"];
    assert_eq!(data["email"], "jane@example.com");
    assert_eq!(data["ordersCount"], 0);
    assert_eq!(data["orderTotal"], 42.5);
    assert_eq!(data["status"], "active");
    assert_eq!(data["abandonedCarts"], 0);
    assert!(data["id"].is_string());
    assert!(data["customerSince"].is_string());
    assert!(data["createdAt"].is_string());
}

#[tokio::test]
async fn create_validation_failures_are_400() {
    let app = Harness::new().await.router();

    for payload in [
        json!({ "email": "a@b.co", "phone": "1" }),
        json!({ "name": "A", "email": "nope", "phone": "1" }),
        json!({ "name": "A", "email": "a@b.co", "phone": "1", "status": "archived" }),
        json!({ "name": "A", "email": "a@b.co", "phone": "1", "ordersCount": "many" }),
    ] {
        let (status, v) = call(&app, Method::POST, "/api/customers", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        assert_eq!(v["success"], false);
        assert!(v["message"].is_string());
        assert!(v["error"].is_string());
    }
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = Harness::new().await.router();
    let req = axum::http::Request::post("/api/customers")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"name\": "))
        .unwrap();
    let resp = tower::ServiceExt::oneshot(app, req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_email_is_400_and_not_stored() {
    let app = Harness::new().await.router();
    seed(&app, 1).await;

    let (status, v) = call(
        &app,
        Method::POST,
        "/api/customers",
        Some(body("Other", "C00@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["message"], "Customer with this email already exists");

    let (_, list) = call(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn pagination_second_page() {
    let app = Harness::new().await.router();
    seed(&app, 25).await;

    let (status, v) = call(&app, Method::GET, "/api/customers?page=2&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    assert_eq!(v["count"], 10);
    assert_eq!(v["total"], 25);
    assert_eq!(v["page"], 2);
    assert_eq!(v["pages"], 3);
    assert_eq!(v["data"].as_array().unwrap().len(), 10);

    let (_, last) = call(&app, Method::GET, "/api/customers?page=3&limit=10", None).await;
    assert_eq!(last["count"], 5);

    let (_, clamped) = call(&app, Method::GET, "/api/customers?page=0&limit=1000", None).await;
    assert_eq!(clamped["page"], 1);
    assert_eq!(clamped["count"], 25);
    assert_eq!(clamped["pages"], 1);
}

#[tokio::test]
async fn empty_collection_has_zero_pages() {
    let app = Harness::new().await.router();
    let (_, v) = call(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(v["total"], 0);
    assert_eq!(v["pages"], 0);
    assert_eq!(v["count"], 0);
}

#[tokio::test]
async fn sorting_search_and_status_filter() {
    let app = Harness::new().await.router();
    seed(&app, 3).await;

    let (_, asc) = call(
        &app,
        Method::GET,
        "/api/customers?sortBy=name&sortOrder=asc",
        None,
    )
    .await;
    let names: Vec<&str> = asc["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Customer 00", "Customer 01", "Customer 02"]);

    let (_, found) = call(&app, Method::GET, "/api/customers?search=C01%40EXAMPLE", None).await;
    assert_eq!(found["total"], 1);
    assert_eq!(found["data"][0]["email"], "c01@example.com");

    let id = found["data"][0]["id"].as_str().unwrap().to_string();
    let (status, _) = call(
        &app,
        Method::PATCH,
        &format!("/api/customers/{id}/status"),
        Some(json!({ "status": "inactive" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, inactive) = call(&app, Method::GET, "/api/customers?status=inactive", None).await;
    assert_eq!(inactive["total"], 1);
    let (_, active) = call(&app, Method::GET, "/api/customers?status=active", None).await;
    assert_eq!(active["total"], 2);
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let app = Harness::new().await.router();
    seed(&app, 1).await;

    let (status, v) = call(
        &app,
        Method::GET,
        "/api/customers?page=9223372036854775807&limit=10",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["total"], 1);
    assert_eq!(v["count"], 0);
    assert_eq!(v["data"], json!([]));
}

#[tokio::test]
async fn search_wildcards_match_literally() {
    let app = Harness::new().await.router();
    for (name, email) in [("Alice", "alice@example.com"), ("Bob", "bob@example.com")] {
        let (status, _) = call(&app, Method::POST, "/api/customers", Some(body(name, email))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    for uri in ["/api/customers?search=%25", "/api/customers?search=_"] {
        let (status, v) = call(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(v["total"], 0, "{uri}");
    }

    let (_, v) = call(&app, Method::POST, "/api/customers", Some(body("100% Cotton", "cotton_shop@example.com"))).await;
    assert_eq!(v["success"], true);

    let (_, pct) = call(&app, Method::GET, "/api/customers?search=0%25%20c", None).await;
    assert_eq!(pct["total"], 1);
    assert_eq!(pct["data"][0]["name"], "100% Cotton");
    let (_, under) = call(&app, Method::GET, "/api/customers?search=n_s", None).await;
    assert_eq!(under["total"], 1);
}

#[tokio::test]
async fn bad_list_parameters_are_400() {
    let app = Harness::new().await.router();
    for uri in [
        "/api/customers?sortBy=password",
        "/api/customers?sortOrder=sideways",
        "/api/customers?status=archived",
        "/api/customers?page=abc",
    ] {
        let (status, v) = call(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(v["success"], false);
    }
}

#[tokio::test]
async fn get_update_and_not_found() {
    let app = Harness::new().await.router();
    let (_, created) = call(&app, Method::POST, "/api/customers", Some(body("G", "g@example.com"))).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, got) = call(&app, Method::GET, &format!("/api/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(got["data"]["name"], "G");

    let (status, updated) = call(
        &app,
        Method::PUT,
        &format!("/api/customers/{id}"),
        Some(json!({ "phone": "999", "ordersCount": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], "Customer updated successfully");
    assert_eq!(updated["data"]["phone"], "999");
    assert_eq!(updated["data"]["ordersCount"], 7);
    assert_eq!(updated["data"]["name"], "G");

    let missing = uuid::Uuid::new_v4();
    let (status, v) = call(&app, Method::GET, &format!("/api/customers/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(v["message"], "Customer not found");

    let (status, _) = call(
        &app,
        Method::PUT,
        &format!("/api/customers/{missing}"),
        Some(json!({ "phone": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::GET, "/api/customers/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_patch_rules() {
    let app = Harness::new().await.router();
    let (_, created) = call(&app, Method::POST, "/api/customers", Some(body("P", "p@example.com"))).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/customers/{id}/status");

    let (status, v) = call(&app, Method::PATCH, &uri, Some(json!({ "status": "inactive" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["message"], "Customer status updated successfully");
    assert_eq!(v["data"]["status"], "inactive");
    assert_eq!(v["data"]["name"], "P");
    assert_eq!(v["data"]["email"], "p@example.com");

    let (status, _) = call(&app, Method::PATCH, &uri, Some(json!({ "status": "archived" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&app, Method::PATCH, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // rejected patches leave the record alone
    let (_, got) = call(&app, Method::GET, &format!("/api/customers/{id}"), None).await;
    assert_eq!(got["data"]["status"], "inactive");

    let missing = uuid::Uuid::new_v4();
    let (status, _) = call(
        &app,
        Method::PATCH,
        &format!("/api/customers/{missing}/status"),
        Some(json!({ "status": "active" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_existing_and_missing() {
    let app = Harness::new().await.router();
    seed(&app, 2).await;
    let (_, list) = call(&app, Method::GET, "/api/customers", None).await;
    let id = list["data"][0]["id"].as_str().unwrap().to_string();

    let missing = uuid::Uuid::new_v4();
    let (status, v) = call(&app, Method::DELETE, &format!("/api/customers/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(v["success"], false);
    let (_, after_miss) = call(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(after_miss["total"], 2);

    let (status, v) = call(&app, Method::DELETE, &format!("/api/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v, json!({ "success": true, "message": "Customer deleted successfully" }));
    let (_, after) = call(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(after["total"], 1);
}
