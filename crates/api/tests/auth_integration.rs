//! Integration tests for login, logout, and session introspection.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    cleanup_all_test_data, create_authenticated_user, create_test_app, create_test_pool,
    get_request_with_auth, json_request, parse_response_body, run_migrations, test_config,
};
use tower::ServiceExt;

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_login_and_me_round_trip() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let user = create_authenticated_user(&app, &pool, "admin").await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/auth/me", &user.token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["email"].as_str().unwrap(), user.email);
    assert_eq!(body["role"].as_str().unwrap(), "admin");
    // The password hash never leaves the server
    assert!(body.get("password_hash").is_none());

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_login_wrong_password_rejected() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let user = create_authenticated_user(&app, &pool, "viewer").await;

    let request = json_request(
        Method::POST,
        "/api/auth/login",
        &serde_json::json!({ "email": user.email, "password": "wrong" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_login_sets_session_cookie() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let email = "cookie-check@example.com";
    let hash = shared::password::hash_password("secret-password").unwrap();
    sqlx::query("INSERT INTO users (email, full_name, password_hash, role) VALUES ($1, $2, $3, 'viewer')")
        .bind(email)
        .bind("Cookie Check")
        .bind(&hash)
        .execute(&pool)
        .await
        .unwrap();

    let request = json_request(
        Method::POST,
        "/api/auth/login",
        &serde_json::json!({ "email": email, "password": "secret-password" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("Set-Cookie header");
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_me_without_session_rejected() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/auth/me")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
