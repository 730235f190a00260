//! Ownership ledger entries.
//!
//! An ownership entry is a (person, percentage, type) tuple embedded in an
//! asset; it has no existence outside its parent and is always replaced
//! wholesale with the asset's owners array.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Legal nature of a fractional claim on an asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipType {
    LegalOwner,
    Inherited,
    Benami,
    Joint,
    #[default]
    Other,
}

impl FromStr for OwnershipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legal_owner" => Ok(OwnershipType::LegalOwner),
            "inherited" => Ok(OwnershipType::Inherited),
            "benami" => Ok(OwnershipType::Benami),
            "joint" => Ok(OwnershipType::Joint),
            "other" => Ok(OwnershipType::Other),
            _ => Err(format!("Unknown ownership type: {}", s)),
        }
    }
}

impl std::fmt::Display for OwnershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnershipType::LegalOwner => write!(f, "legal_owner"),
            OwnershipType::Inherited => write!(f, "inherited"),
            OwnershipType::Benami => write!(f, "benami"),
            OwnershipType::Joint => write!(f, "joint"),
            OwnershipType::Other => write!(f, "other"),
        }
    }
}

/// A fractional claim on an asset by a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct OwnershipEntry {
    pub person_id: Uuid,
    #[validate(custom(function = "shared::validation::validate_percentage"))]
    pub percentage: f64,
    pub ownership_type: OwnershipType,
}

impl OwnershipEntry {
    /// A single 100% share of the given type.
    pub fn sole(person_id: Uuid, ownership_type: OwnershipType) -> Self {
        Self {
            person_id,
            percentage: 100.0,
            ownership_type,
        }
    }
}
