//! Append-only history timeline entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One dated action on an asset's timeline.
///
/// Entries are stored in insertion order; readers sort by date. The timeline
/// is append-only: no update or delete path exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub action: String,
    pub details: Option<String>,
    pub actor: String,
}

impl HistoryEntry {
    /// Creates an entry dated now.
    pub fn now(action: impl Into<String>, details: Option<String>, actor: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            action: action.into(),
            details,
            actor: actor.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_now() {
        let entry = HistoryEntry::now("created", Some("initial entry".into()), "admin@example.com");
        assert_eq!(entry.action, "created");
        assert_eq!(entry.actor, "admin@example.com");
        assert!(entry.details.is_some());
    }

    #[test]
    fn test_entries_get_unique_ids() {
        let a = HistoryEntry::now("updated", None, "x");
        let b = HistoryEntry::now("updated", None, "x");
        assert_ne!(a.id, b.id);
    }
}
