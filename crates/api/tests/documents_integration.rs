//! Integration tests for embedded attachments and the document register.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    cleanup_all_test_data, create_authenticated_user, create_test_app, create_test_pool,
    get_request_with_auth, json_request_with_auth, minimal_asset, parse_response_body,
    run_migrations, test_config,
};
use tower::ServiceExt;
use uuid::Uuid;

async fn create_asset(app: &axum::Router, token: &str, title: &str) -> String {
    let request = json_request_with_auth(Method::POST, "/api/assets", token, &minimal_asset(title));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    parse_response_body(response).await["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_attach_infers_file_type_and_counts() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let admin = create_authenticated_user(&app, &pool, "admin").await;
    let asset_id = create_asset(&app, &admin.token, "Documented plot").await;

    let request = json_request_with_auth(
        Method::POST,
        "/api/documents/attach",
        &admin.token,
        &serde_json::json!({
            "asset_id": asset_id,
            "label": "Sale deed",
            "file_url": "https://drive.google.com/file/d/abc/view"
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    // Google Drive links are treated as pdf
    assert_eq!(body["document"]["file_type"], "pdf");
    assert_eq!(body["document_count"].as_i64().unwrap(), 1);

    let request = json_request_with_auth(
        Method::POST,
        "/api/documents/attach",
        &admin.token,
        &serde_json::json!({
            "asset_id": asset_id,
            "label": "Site photo",
            "file_url": "https://example.com/plot.png?size=large"
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["document"]["file_type"], "png");
    assert_eq!(body["document_count"].as_i64().unwrap(), 2);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_remove_missing_document_is_404() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let admin = create_authenticated_user(&app, &pool, "admin").await;
    let asset_id = create_asset(&app, &admin.token, "Plain plot").await;

    let request = json_request_with_auth(
        Method::POST,
        "/api/documents/remove",
        &admin.token,
        &serde_json::json!({ "asset_id": asset_id, "document_id": Uuid::new_v4() }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_register_entry_independent_of_embedded_array() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let admin = create_authenticated_user(&app, &pool, "admin").await;
    let asset_id = create_asset(&app, &admin.token, "Registered plot").await;

    let request = json_request_with_auth(
        Method::POST,
        "/api/documents",
        &admin.token,
        &serde_json::json!({
            "asset_id": asset_id,
            "label": "Court order",
            "file_url": "https://example.com/order.pdf",
            "is_critical": true,
            "issued_by": "District Court"
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["file_type"], "pdf");
    assert_eq!(body["is_critical"], true);

    // The register entry does not appear in the asset's embedded array
    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/assets/{}", asset_id),
            &admin.token,
        ))
        .await
        .unwrap();
    let asset = parse_response_body(response).await;
    assert_eq!(asset["documents"].as_array().unwrap().len(), 0);

    // But it is listed in the register filtered by asset
    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/documents?asset_id={}", asset_id),
            &admin.token,
        ))
        .await
        .unwrap();
    let listing = parse_response_body(response).await;
    assert_eq!(listing["total"].as_i64().unwrap(), 1);

    cleanup_all_test_data(&pool).await;
}
