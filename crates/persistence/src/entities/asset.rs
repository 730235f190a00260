//! Asset entity (database row mapping).
//!
//! Scalar columns hold the fields the dashboard groups by; the embedded
//! blocks (location, type-specific details, owners, documents, history, and
//! the shared sub-records) live in JSONB columns and deserialize into the
//! typed domain model.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use domain::models::{
    Asset, AssetDetails, AssetFlags, AssetStatus, AssetSummary, AssetType, Location,
};

/// Database row mapping for the assets table.
#[derive(Debug, Clone, FromRow)]
pub struct AssetEntity {
    pub id: Uuid,
    pub title: String,
    pub nickname: Option<String>,
    pub description: Option<String>,
    pub asset_type: String,
    pub status: String,
    pub location: serde_json::Value,
    pub details: serde_json::Value,
    pub acquisition: Option<serde_json::Value>,
    pub valuation: Option<serde_json::Value>,
    pub mutation_title: Option<serde_json::Value>,
    pub compliance: Option<serde_json::Value>,
    pub dispute: Option<serde_json::Value>,
    pub owners: serde_json::Value,
    pub contacts: serde_json::Value,
    pub documents: serde_json::Value,
    pub history: serde_json::Value,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub needs_attention: bool,
    pub high_value: bool,
    pub has_legal_issues: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Deserializes a JSONB block, falling back to the default on corrupt data
/// so one bad row does not take down a whole list view.
fn block_or_default<T: DeserializeOwned + Default>(column: &str, value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!(column = column, error = %e, "Corrupt JSONB block, using default");
        T::default()
    })
}

fn optional_block<T: DeserializeOwned + Default>(
    column: &str,
    value: Option<serde_json::Value>,
) -> Option<T> {
    value.map(|v| block_or_default(column, v))
}

impl From<AssetEntity> for Asset {
    fn from(entity: AssetEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            nickname: entity.nickname,
            description: entity.description,
            status: AssetStatus::from_str(&entity.status).unwrap_or_default(),
            location: block_or_default::<Location>("location", entity.location),
            details: block_or_default::<AssetDetails>("details", entity.details),
            acquisition: optional_block("acquisition", entity.acquisition),
            valuation: optional_block("valuation", entity.valuation),
            mutation_title: optional_block("mutation_title", entity.mutation_title),
            compliance: optional_block("compliance", entity.compliance),
            dispute: optional_block("dispute", entity.dispute),
            owners: block_or_default("owners", entity.owners),
            contacts: block_or_default("contacts", entity.contacts),
            documents: block_or_default("documents", entity.documents),
            history: block_or_default("history", entity.history),
            tags: entity.tags,
            notes: entity.notes,
            flags: AssetFlags {
                needs_attention: entity.needs_attention,
                high_value: entity.high_value,
                has_legal_issues: entity.has_legal_issues,
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Row mapping for the list-view summary projection.
#[derive(Debug, Clone, FromRow)]
pub struct AssetSummaryEntity {
    pub id: Uuid,
    pub title: String,
    pub nickname: Option<String>,
    pub asset_type: String,
    pub status: String,
    pub city: Option<String>,
    pub owners: serde_json::Value,
    pub needs_attention: bool,
    pub high_value: bool,
    pub has_legal_issues: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<AssetSummaryEntity> for AssetSummary {
    fn from(entity: AssetSummaryEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            nickname: entity.nickname,
            asset_type: AssetType::from_str(&entity.asset_type).unwrap_or(AssetType::Other),
            status: AssetStatus::from_str(&entity.status).unwrap_or_default(),
            city: entity.city,
            owners: block_or_default("owners", entity.owners),
            flags: AssetFlags {
                needs_attention: entity.needs_attention,
                high_value: entity.high_value,
                has_legal_issues: entity.has_legal_issues,
            },
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::OwnershipEntry;

    #[test]
    fn test_block_or_default_valid() {
        let value = serde_json::json!({ "city": "Lahore" });
        let location: Location = block_or_default("location", value);
        assert_eq!(location.city.as_deref(), Some("Lahore"));
    }

    #[test]
    fn test_block_or_default_corrupt_falls_back() {
        let value = serde_json::json!("not an object");
        let owners: Vec<OwnershipEntry> = block_or_default("owners", value);
        assert!(owners.is_empty());
    }

    #[test]
    fn test_corrupt_details_falls_back_to_other() {
        let value = serde_json::json!({ "kind": "spaceship" });
        let details: AssetDetails = block_or_default("details", value);
        assert_eq!(details.asset_type(), AssetType::Other);
    }
}
