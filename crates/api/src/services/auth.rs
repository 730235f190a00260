//! Login service.
//!
//! Verifies credentials against the users table and issues a session
//! token. Failures are deliberately uniform: a wrong password, an unknown
//! email, and a deactivated account all return the same message.

use domain::models::User;
use persistence::repositories::UserRepository;
use shared::jwt::JwtConfig;
use shared::password::verify_password;
use sqlx::PgPool;

use crate::config::AuthConfig;
use crate::error::ApiError;

const LOGIN_FAILED: &str = "Invalid email or password";

/// Verify credentials and issue a session token.
///
/// Returns the authenticated user and the signed token.
pub async fn login(
    pool: &PgPool,
    auth: &AuthConfig,
    email: &str,
    password: &str,
) -> Result<(User, String), ApiError> {
    let repo = UserRepository::new(pool.clone());

    let entity = repo
        .find_by_email(email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(LOGIN_FAILED.to_string()))?;

    if !entity.is_active {
        return Err(ApiError::Unauthorized(LOGIN_FAILED.to_string()));
    }

    let hash = entity
        .password_hash
        .clone()
        .ok_or_else(|| ApiError::Unauthorized(LOGIN_FAILED.to_string()))?;
    let verified = verify_password(password, &hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;
    if !verified {
        return Err(ApiError::Unauthorized(LOGIN_FAILED.to_string()));
    }

    let jwt = JwtConfig::with_leeway(&auth.jwt_secret, auth.session_expiry_secs, auth.leeway_secs);
    let user: User = entity.into();
    let (token, _jti) = jwt
        .generate_session_token(user.id, &user.email, &user.role.to_string())
        .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;

    Ok((user, token))
}
