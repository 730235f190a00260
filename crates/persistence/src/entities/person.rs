//! Person entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use domain::models::LifeStatus;

/// Database row mapping for the people table.
#[derive(Debug, Clone, FromRow)]
pub struct PersonEntity {
    pub id: Uuid,
    pub full_name: String,
    pub father_name: Option<String>,
    pub national_id: Option<String>,
    pub relation_to_family: Option<String>,
    pub life_status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PersonEntity> for domain::models::Person {
    fn from(entity: PersonEntity) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            father_name: entity.father_name,
            national_id: entity.national_id,
            relation_to_family: entity.relation_to_family,
            life_status: LifeStatus::from_str(&entity.life_status).unwrap_or_default(),
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
