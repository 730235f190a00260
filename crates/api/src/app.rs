use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin, require_session, trace_id,
};
use crate::routes::{assets, auth, dashboard, documents, health, people, users};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Read routes: any valid session
    let session_routes = Router::new()
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/assets", get(assets::list_assets))
        .route("/api/assets/:id", get(assets::get_asset))
        .route("/api/people", get(people::list_people))
        .route("/api/people/:id", get(people::get_person))
        .route("/api/users", get(users::list_users))
        .route("/api/documents", get(documents::list_documents))
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    // Mutations: one centralized admin guard in front of dispatch, so no
    // handler carries its own role check
    let admin_routes = Router::new()
        .route("/api/assets", post(assets::create_asset))
        .route("/api/assets/:id", patch(assets::patch_asset))
        .route("/api/assets/:id", delete(assets::delete_asset))
        .route("/api/assets/:id/owners", put(assets::replace_owners))
        .route("/api/assets/:id/history", post(assets::append_history))
        .route("/api/documents/attach", post(documents::attach_document))
        .route("/api/documents/remove", post(documents::remove_document))
        .route("/api/documents", post(documents::create_document))
        .route("/api/people", post(people::create_person))
        .route("/api/people/:id", patch(people::patch_person))
        .route("/api/users", post(users::create_user))
        .route("/api/users/:id", put(users::update_user))
        .route("/api/users/:id", delete(users::delete_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/api/auth/login", post(auth::login))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
