//! Session authentication middleware.
//!
//! One guard per protection level: `require_session` accepts any active
//! account, `require_admin` additionally requires a writing role. Both
//! store the validated session in request extensions for handlers.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use domain::models::UserRole;
use shared::jwt::JwtConfig;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::cookies::CookieHelper;

/// Validated session stored in request extensions.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub jti: String,
}

impl SessionUser {
    /// Build the token verifier from app configuration.
    pub fn jwt_config(auth: &crate::config::AuthConfig) -> JwtConfig {
        JwtConfig::with_leeway(&auth.jwt_secret, auth.session_expiry_secs, auth.leeway_secs)
    }

    /// Build the cookie reader from app configuration.
    pub fn cookie_helper(auth: &crate::config::AuthConfig) -> CookieHelper {
        CookieHelper::new(auth.cookie.clone(), auth.session_expiry_secs)
    }

    /// Validate a raw token and resolve it into a session.
    pub fn validate(jwt: &JwtConfig, token: &str) -> Result<Self, ApiError> {
        let claims = jwt
            .validate_session_token(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired session".to_string()))?;
        let user_id = shared::jwt::extract_user_id(&claims)
            .map_err(|_| ApiError::Unauthorized("Invalid session subject".to_string()))?;
        let role = claims
            .role
            .parse::<UserRole>()
            .map_err(|_| ApiError::Unauthorized("Unknown role in session".to_string()))?;

        Ok(Self {
            user_id,
            email: claims.email,
            role,
            jti: claims.jti,
        })
    }
}

/// Pull the session token out of the request: the session cookie first,
/// then an Authorization Bearer header for non-browser clients.
pub fn extract_token<'a>(req: &'a Request<Body>, cookies: &CookieHelper) -> Option<&'a str> {
    cookies.extract_session_token(req.headers()).or_else(|| {
        req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
    })
}

/// Middleware that requires a valid session (any role).
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let cookies = SessionUser::cookie_helper(&state.config.auth);
    let token = match extract_token(&req, &cookies) {
        Some(token) => token.to_string(),
        None => {
            return ApiError::Unauthorized("Missing session".to_string()).into_response();
        }
    };

    let jwt = SessionUser::jwt_config(&state.config.auth);
    match SessionUser::validate(&jwt, &token) {
        Ok(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

/// Middleware for admin-only routes.
///
/// Requires a valid session AND a role that can write. Sits in front of
/// every mutating route so handlers never re-check roles themselves.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let cookies = SessionUser::cookie_helper(&state.config.auth);
    let token = match extract_token(&req, &cookies) {
        Some(token) => token.to_string(),
        None => {
            return ApiError::Unauthorized("Missing session".to_string()).into_response();
        }
    };

    let jwt = SessionUser::jwt_config(&state.config.auth);
    match SessionUser::validate(&jwt, &token) {
        Ok(session) => {
            if !session.role.can_write() {
                return ApiError::Forbidden("Admin access required".to_string()).into_response();
            }
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
