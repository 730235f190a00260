//! Person domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Name of the placeholder person attached by the owner-backfill repair to
/// assets recorded with no owner.
pub const UNKNOWN_OWNER_NAME: &str = "Unknown Owner";

/// Life status of a person or user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStatus {
    #[default]
    Alive,
    Deceased,
}

impl FromStr for LifeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alive" => Ok(LifeStatus::Alive),
            "deceased" => Ok(LifeStatus::Deceased),
            _ => Err(format!("Unknown life status: {}", s)),
        }
    }
}

impl std::fmt::Display for LifeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifeStatus::Alive => write!(f, "alive"),
            LifeStatus::Deceased => write!(f, "deceased"),
        }
    }
}

/// A human referenced by an asset's ownership list or contact sections.
///
/// People are referenced, never owned, by assets and are not hard-deleted by
/// normal flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub full_name: String,
    pub father_name: Option<String>,
    pub national_id: Option<String>,
    pub relation_to_family: Option<String>,
    pub life_status: LifeStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_life_status_round_trip() {
        for status in [LifeStatus::Alive, LifeStatus::Deceased] {
            let parsed: LifeStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_life_status_default_is_alive() {
        assert_eq!(LifeStatus::default(), LifeStatus::Alive);
    }

    #[test]
    fn test_life_status_unknown_rejected() {
        assert!("missing".parse::<LifeStatus>().is_err());
    }
}
