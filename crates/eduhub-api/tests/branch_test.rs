//! API tests for branches and health.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_super_admin_manages_branches() {
    let app = TestApp::new();
    let sa = app.super_admin_token().await;

    let created = app
        .request(
            "POST",
            "/api/branches",
            Some(json!({
                "name": "Chilonzor",
                "address": "Bunyodkor 12",
                "phone": "+998712345678",
            })),
            Some(&sa),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let updated = app
        .request(
            "PUT",
            &format!("/api/branches/{id}"),
            Some(json!({ "name": "Chilonzor-2" })),
            Some(&sa),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["name"], "Chilonzor-2");

    let student = app
        .request(
            "POST",
            "/api/students",
            Some(json!({
                "fullname": "Jasur Tursunov",
                "phone": "+998935551122",
                "password": PASSWORD,
                "branch_id": id,
            })),
            Some(&sa),
        )
        .await;
    assert_eq!(student.status, StatusCode::CREATED);
    assert_eq!(student.body["data"]["branch_id"], id.as_str());

    let listing = app.request("GET", "/api/branches", None, Some(&sa)).await;
    assert_eq!(listing.body["data"]["total_items"], 1);

    let deleted = app
        .request("DELETE", &format!("/api/branches/{id}"), None, Some(&sa))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request("GET", &format!("/api/branches/{id}"), None, Some(&sa))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_manager_cannot_touch_branches() {
    let app = TestApp::new();
    let sa = app.super_admin_token().await;
    app.create_principal(&sa, "managers", "Bekzod Nazarov").await;
    let manager = app.login("manager", "M00001", PASSWORD).await;

    let response = app
        .request("GET", "/api/branches", None, Some(&manager))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_endpoints_need_no_auth() {
    let app = TestApp::new();

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["data"]["status"], "ok");

    let detailed = app.request("GET", "/api/health/detailed", None, None).await;
    assert_eq!(detailed.status, StatusCode::OK);
    assert_eq!(detailed.body["data"]["database"], "in-memory");
}
