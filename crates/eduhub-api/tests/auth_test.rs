//! API tests for the login, refresh, and identity endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_super_admin_login_and_me() {
    let app = TestApp::new();
    let token = app.super_admin_token().await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["role"], "SuperAdmin");
    assert_eq!(
        response.body["data"]["id"],
        app.config.auth.super_admin.id.to_string()
    );
}

#[tokio::test]
async fn test_super_admin_wrong_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/super-admin/login",
            Some(json!({ "login": "SuperAdmin", "password": "superadmin1!" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_unknown_login_and_wrong_password_have_identical_responses() {
    let app = TestApp::new();
    let sa = app.super_admin_token().await;
    let teacher = app.create_principal(&sa, "teachers", "Kamola Usmonova").await;
    assert_eq!(teacher["login"], "T00001");

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/teacher/login",
            Some(json!({ "login": "T00001", "password": "Wrong_pass1" })),
            None,
        )
        .await;
    let unknown_login = app
        .request(
            "POST",
            "/api/auth/teacher/login",
            Some(json!({ "login": "T00042", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status, unknown_login.status);
    assert_eq!(wrong_password.body, unknown_login.body);
}

#[tokio::test]
async fn test_login_is_per_role() {
    let app = TestApp::new();
    let sa = app.super_admin_token().await;
    app.create_principal(&sa, "support-teachers", "Otabek Ergashev")
        .await;

    app.login("support-teacher", "ST00001", PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/auth/teacher/login",
            Some(json!({ "login": "ST00001", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_role_slug_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/janitor/login",
            Some(json!({ "login": "J00001", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_login_is_validation_error() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/student/login",
            Some(json!({ "login": "", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_me_without_or_with_bad_token() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "TOKEN_INVALID");

    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not.a.token"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.error_code(), "TOKEN_INVALID");
}

#[tokio::test]
async fn test_refresh_returns_new_pair() {
    let app = TestApp::new();
    let sa = &app.config.auth.super_admin;

    let login = app
        .request(
            "POST",
            "/api/auth/super-admin/login",
            Some(json!({ "login": sa.login, "password": sa.password })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    let refresh_token = login.body["data"]["refresh_token"].as_str().unwrap();
    let access_token = login.body["data"]["access_token"].as_str().unwrap();

    let refreshed = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);
    assert!(refreshed.body["data"]["access_token"].is_string());

    let rejected = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": access_token })),
            None,
        )
        .await;
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);
    assert_eq!(rejected.error_code(), "TOKEN_INVALID");
}
