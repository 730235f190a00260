//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use domain::models::{LifeStatus, UserRole};

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub password_hash: Option<String>,
    pub role: String,
    pub relation_to_family: Option<String>,
    pub national_id: Option<String>,
    pub life_status: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            full_name: entity.full_name,
            password_hash: entity.password_hash,
            role: UserRole::from_str(&entity.role).unwrap_or(UserRole::Viewer),
            relation_to_family: entity.relation_to_family,
            national_id: entity.national_id,
            life_status: LifeStatus::from_str(&entity.life_status).unwrap_or_default(),
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
