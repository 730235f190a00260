//! Integration tests for the dashboard aggregation endpoint.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    cleanup_all_test_data, create_authenticated_user, create_test_app, create_test_pool,
    get_request_with_auth, json_request_with_auth, minimal_asset, parse_response_body,
    run_migrations, test_config,
};
use tower::ServiceExt;

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_dashboard_counts_by_type_and_flag() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let admin = create_authenticated_user(&app, &pool, "admin").await;

    for (title, kind, flagged) in [
        ("House A", "house", false),
        ("House B", "house", true),
        ("Car", "vehicle", false),
    ] {
        let mut payload = minimal_asset(title);
        payload["details"] = serde_json::json!({ "kind": kind });
        payload["flags"] = serde_json::json!({ "needs_attention": flagged });
        let request = json_request_with_auth(Method::POST, "/api/assets", &admin.token, &payload);
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/dashboard", &admin.token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["total_assets"].as_i64().unwrap(), 3);
    assert_eq!(body["flagged_for_attention"].as_i64().unwrap(), 1);

    let by_type = body["by_type"].as_array().unwrap();
    let houses = by_type.iter().find(|b| b["key"] == "house").unwrap();
    assert_eq!(houses["count"].as_i64().unwrap(), 2);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_dashboard_requires_session() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let request = axum::http::Request::builder()
        .uri("/api/dashboard")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
