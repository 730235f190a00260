//! Session extractor.
//!
//! Handlers behind the auth middleware receive the validated session from
//! request extensions; the extractor also validates directly so a handler
//! can be used without the guard (e.g. in tests).

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::UserRole;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::auth::SessionUser;

/// Authenticated session for a request.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub jti: String,
}

impl From<SessionUser> for Session {
    fn from(s: SessionUser) -> Self {
        Self {
            user_id: s.user_id,
            email: s.email,
            role: s.role,
            jti: s.jti,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Middleware already validated the token on guarded routes
        if let Some(session) = parts.extensions.get::<SessionUser>() {
            return Ok(session.clone().into());
        }

        // Otherwise validate the Bearer header directly
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing session".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

        let jwt = SessionUser::jwt_config(&state.config.auth);
        SessionUser::validate(&jwt, token).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_session_user() {
        let user = SessionUser {
            user_id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            role: UserRole::Viewer,
            jti: "jti-1".to_string(),
        };
        let session: Session = user.clone().into();
        assert_eq!(session.user_id, user.user_id);
        assert_eq!(session.email, "a@example.com");
        assert_eq!(session.role, UserRole::Viewer);
    }

    #[test]
    fn test_session_debug() {
        let session = Session {
            user_id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            role: UserRole::Admin,
            jti: "jti-2".to_string(),
        };
        let debug_str = format!("{:?}", session);
        assert!(debug_str.contains("Session"));
    }
}
