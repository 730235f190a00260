//! Owner backfill repair routine.
//!
//! Historical imports left some assets with an empty owners array. The
//! backfill attaches a single 100% share pointing at the "Unknown Owner"
//! placeholder person so the ownership ledger is complete everywhere.
//! Running it twice is a no-op: repaired assets no longer match the
//! empty-owners predicate.

use domain::models::{HistoryEntry, OwnershipEntry, OwnershipType, UNKNOWN_OWNER_NAME};
use serde_json::json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::metrics::QueryTimer;

/// Outcome of one backfill run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairSummary {
    /// Whether the placeholder person had to be created.
    pub placeholder_created: bool,
    /// Number of assets that received the placeholder share.
    pub assets_repaired: u64,
}

/// Attach a sole "Unknown Owner" share to every asset whose owners array
/// is empty. The placeholder person is found or created first; the whole
/// run executes in one transaction.
pub async fn backfill_missing_owners(pool: &PgPool) -> Result<RepairSummary, sqlx::Error> {
    let timer = QueryTimer::new("backfill_missing_owners");
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM people WHERE full_name = $1")
        .bind(UNKNOWN_OWNER_NAME)
        .fetch_optional(&mut *tx)
        .await?;

    let (person_id, placeholder_created) = match existing {
        Some(id) => (id, false),
        None => {
            let id = sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO people (full_name, notes)
                 VALUES ($1, 'Placeholder created by the owner backfill routine')
                 RETURNING id",
            )
            .bind(UNKNOWN_OWNER_NAME)
            .fetch_one(&mut *tx)
            .await?;
            info!(person_id = %id, "created Unknown Owner placeholder");
            (id, true)
        }
    };

    let share = serde_json::to_value(vec![OwnershipEntry::sole(person_id, OwnershipType::Other)])
        .unwrap_or_else(|_| json!([]));
    let note = serde_json::to_value(HistoryEntry::now(
        "owners_backfilled",
        Some("Attached 100% Unknown Owner share (no recorded owner)".to_string()),
        "repair-owners",
    ))
    .unwrap_or_else(|_| json!({}));

    let result = sqlx::query(
        "UPDATE assets
         SET owners = $1::jsonb,
             history = history || $2::jsonb,
             updated_at = NOW()
         WHERE owners IS NULL OR jsonb_array_length(owners) = 0",
    )
    .bind(&share)
    .bind(&note)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    timer.record();

    let summary = RepairSummary {
        placeholder_created,
        assets_repaired: result.rows_affected(),
    };
    info!(
        repaired = summary.assets_repaired,
        placeholder_created = summary.placeholder_created,
        "owner backfill complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_summary_default() {
        let summary = RepairSummary::default();
        assert!(!summary.placeholder_created);
        assert_eq!(summary.assets_repaired, 0);
    }

    #[test]
    fn test_placeholder_share_shape() {
        let person_id = Uuid::new_v4();
        let share =
            serde_json::to_value(vec![OwnershipEntry::sole(person_id, OwnershipType::Other)])
                .unwrap();
        let entries = share.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["percentage"], 100.0);
        assert_eq!(entries[0]["ownership_type"], "other");
    }
}
