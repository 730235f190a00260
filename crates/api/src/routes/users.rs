//! User account endpoints.
//!
//! All of these sit behind the admin guard except the list, which any
//! session may read.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{User, UserRole};
use persistence::repositories::{UserPatch, UserRepository};
use serde::Deserialize;
use shared::password::hash_password;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Session;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub full_name: String,

    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,

    #[serde(default = "default_role")]
    pub role: String,

    pub relation_to_family: Option<String>,

    #[validate(custom(function = "shared::validation::validate_national_id"))]
    pub national_id: Option<String>,

    #[serde(default = "default_life_status")]
    pub life_status: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub relation_to_family: Option<String>,
    #[validate(custom(function = "shared::validation::validate_national_id"))]
    pub national_id: Option<String>,
    pub life_status: Option<String>,
    pub is_active: Option<bool>,
}

fn default_role() -> String {
    "viewer".to_string()
}

fn default_life_status() -> String {
    "alive".to_string()
}

fn parse_role(role: &str) -> Result<UserRole, ApiError> {
    role.parse::<UserRole>()
        .map_err(|_| ApiError::Validation(format!("Unknown role: {}", role)))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    _session: Session,
) -> Result<Json<Vec<User>>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let users = repo.list().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    _session: Session,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    payload.validate()?;
    let role = parse_role(&payload.role)?;

    let hash = hash_password(&payload.password)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

    let repo = UserRepository::new(state.pool.clone());
    let entity = repo
        .create(
            &payload.email,
            &payload.full_name,
            &hash,
            &role.to_string(),
            payload.relation_to_family.as_deref(),
            payload.national_id.as_deref(),
            &payload.life_status,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entity.into())))
}

/// PUT /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    payload.validate()?;
    if let Some(role) = &payload.role {
        parse_role(role)?;
    }

    let patch = UserPatch {
        full_name: payload.full_name,
        role: payload.role,
        relation_to_family: payload.relation_to_family,
        national_id: payload.national_id,
        life_status: payload.life_status,
        is_active: payload.is_active,
    };

    let repo = UserRepository::new(state.pool.clone());
    let entity = repo
        .update(id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;
    Ok(Json(entity.into()))
}

/// DELETE /api/users/:id
///
/// Accounts may not delete themselves; that would leave the registry
/// without its last administrator mid-session.
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if id == session.user_id {
        return Err(ApiError::Forbidden(
            "You cannot delete your own account".to_string(),
        ));
    }

    let repo = UserRepository::new(state.pool.clone());
    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("User {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let valid = CreateUserRequest {
            email: "a@example.com".to_string(),
            full_name: "A".to_string(),
            password: "longenough".to_string(),
            role: "admin".to_string(),
            relation_to_family: None,
            national_id: None,
            life_status: "alive".to_string(),
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_create_user_short_password() {
        let request = CreateUserRequest {
            email: "a@example.com".to_string(),
            full_name: "A".to_string(),
            password: "short".to_string(),
            role: "viewer".to_string(),
            relation_to_family: None,
            national_id: None,
            life_status: "alive".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("admin").unwrap(), UserRole::Admin);
        assert_eq!(parse_role("viewer").unwrap(), UserRole::Viewer);
        assert!(parse_role("overlord").is_err());
    }
}
