//! Authentication endpoints: login, logout, current session.

use axum::{extract::State, http::HeaderMap, Json};
use domain::models::User;
use serde::Deserialize;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Session;
use crate::services::{auth as auth_service, cookies::CookieHelper};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

fn cookie_helper(state: &AppState) -> CookieHelper {
    CookieHelper::new(
        state.config.auth.cookie.clone(),
        state.config.auth.session_expiry_secs,
    )
}

/// POST /api/auth/login
///
/// Verifies credentials and sets the httpOnly session cookie. The token is
/// also returned in the body for non-browser clients.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<serde_json::Value>), ApiError> {
    payload.validate()?;

    let (user, token) =
        auth_service::login(&state.pool, &state.config.auth, &payload.email, &payload.password)
            .await?;

    let mut headers = HeaderMap::new();
    cookie_helper(&state).add_session_cookie(&mut headers, &token);

    Ok((
        headers,
        Json(serde_json::json!({
            "token": token,
            "user": user,
        })),
    ))
}

/// POST /api/auth/logout
///
/// Clears the session cookie. The token itself stays valid until expiry;
/// there is no server-side session store to revoke.
pub async fn logout(State(state): State<AppState>, _session: Session) -> (HeaderMap, Json<serde_json::Value>) {
    let mut headers = HeaderMap::new();
    cookie_helper(&state).add_clear_cookie(&mut headers);

    (headers, Json(serde_json::json!({ "status": "logged_out" })))
}

/// GET /api/auth/me
///
/// Returns the account behind the current session, fresh from the database
/// so deactivation and role changes show immediately.
pub async fn me(State(state): State<AppState>, session: Session) -> Result<Json<User>, ApiError> {
    let repo = persistence::repositories::UserRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(session.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))?;

    if !entity.is_active {
        return Err(ApiError::Unauthorized("Account is deactivated".to_string()));
    }

    Ok(Json(entity.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "user@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = LoginRequest {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let empty_password = LoginRequest {
            email: "user@example.com".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }
}
