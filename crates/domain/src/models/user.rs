//! Authenticated user domain model.
//!
//! A `User` is an actor who logs in; distinct from a `Person`, who is a human
//! referenced by ownership and contact records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::person::LifeStatus;

/// Roles for registry users. Role determines write permissions system-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Viewer,
}

impl UserRole {
    /// Whether this role may mutate registry records.
    pub fn can_write(&self) -> bool {
        matches!(self, UserRole::SuperAdmin | UserRole::Admin)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "super_admin" => Ok(UserRole::SuperAdmin),
            "admin" => Ok(UserRole::Admin),
            "viewer" => Ok(UserRole::Viewer),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::SuperAdmin => write!(f, "super_admin"),
            UserRole::Admin => write!(f, "admin"),
            UserRole::Viewer => write!(f, "viewer"),
        }
    }
}

/// Registry user domain model.
///
/// Email is the login identity and is stored lowercase; uniqueness is
/// enforced at the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub relation_to_family: Option<String>,
    pub national_id: Option<String>,
    pub life_status: LifeStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_write_permissions() {
        assert!(UserRole::SuperAdmin.can_write());
        assert!(UserRole::Admin.can_write());
        assert!(!UserRole::Viewer.can_write());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::SuperAdmin, UserRole::Admin, UserRole::Viewer] {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_role_parse_case_insensitive() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("manager".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde_snake_case() {
        let json = serde_json::to_string(&UserRole::SuperAdmin).unwrap();
        assert_eq!(json, "\"super_admin\"");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.com".into(),
            full_name: "A".into(),
            password_hash: Some("$argon2id$secret".into()),
            role: UserRole::Viewer,
            relation_to_family: None,
            national_id: None,
            life_status: LifeStatus::Alive,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
