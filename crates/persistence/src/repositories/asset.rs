//! Asset repository for database operations.
//!
//! Mutations that touch the embedded arrays (owners, documents, history) are
//! single UPDATE statements so each array change and its history entry land
//! atomically. Concurrent writers to the same asset still race
//! last-writer-wins at the whole-field level.

use domain::models::{
    Acquisition, AssetDetails, AssetFlags, AssetStatus, Compliance, ContactRef, Dispute,
    HistoryEntry, Location, MutationTitle, OwnershipEntry, Valuation,
};
use shared::pagination::PageParams;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{AssetEntity, AssetSummaryEntity};
use crate::metrics::QueryTimer;

const ASSET_COLUMNS: &str = "id, title, nickname, description, asset_type, status, location, \
                             details, acquisition, valuation, mutation_title, compliance, \
                             dispute, owners, contacts, documents, history, tags, notes, \
                             needs_attention, high_value, has_legal_issues, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "id, title, nickname, asset_type, status, \
                               location->>'city' AS city, owners, needs_attention, high_value, \
                               has_legal_issues, updated_at";

/// Full payload for creating an asset.
#[derive(Debug, Clone)]
pub struct AssetWrite {
    pub title: String,
    pub nickname: Option<String>,
    pub description: Option<String>,
    pub status: AssetStatus,
    pub location: Location,
    pub details: AssetDetails,
    pub acquisition: Option<Acquisition>,
    pub valuation: Option<Valuation>,
    pub mutation_title: Option<MutationTitle>,
    pub compliance: Option<Compliance>,
    pub dispute: Option<Dispute>,
    pub owners: Vec<OwnershipEntry>,
    pub contacts: Vec<ContactRef>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub flags: AssetFlags,
}

/// Field-level patch for an asset. Only provided fields are written; embedded
/// blocks are replaced whole when present. Owners, documents, and history
/// have their own dedicated operations and are not patchable here.
#[derive(Debug, Default, Clone)]
pub struct AssetPatch {
    pub title: Option<String>,
    pub nickname: Option<String>,
    pub description: Option<String>,
    pub status: Option<AssetStatus>,
    pub location: Option<Location>,
    pub details: Option<AssetDetails>,
    pub acquisition: Option<Acquisition>,
    pub valuation: Option<Valuation>,
    pub mutation_title: Option<MutationTitle>,
    pub compliance: Option<Compliance>,
    pub dispute: Option<Dispute>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
    pub flags: Option<AssetFlags>,
}

/// Filters for the asset list view.
#[derive(Debug, Default, Clone)]
pub struct AssetFilter {
    pub asset_type: Option<String>,
    pub status: Option<String>,
    pub city: Option<String>,
    pub needs_attention: Option<bool>,
}

/// Repository for asset-related database operations.
#[derive(Clone)]
pub struct AssetRepository {
    pool: PgPool,
}

impl AssetRepository {
    /// Creates a new AssetRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List assets as summary projections with optional filters.
    pub async fn list(
        &self,
        filter: &AssetFilter,
        page: PageParams,
    ) -> Result<(Vec<AssetSummaryEntity>, i64), sqlx::Error> {
        let timer = QueryTimer::new("list_assets");

        const WHERE_CLAUSE: &str = "($1::text IS NULL OR asset_type = $1)
             AND ($2::text IS NULL OR status = $2)
             AND ($3::text IS NULL OR location->>'city' ILIKE $3)
             AND ($4::bool IS NULL OR needs_attention = $4)";

        let rows = sqlx::query_as::<_, AssetSummaryEntity>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM assets
             WHERE {WHERE_CLAUSE}
             ORDER BY updated_at DESC
             LIMIT $5 OFFSET $6"
        ))
        .bind(filter.asset_type.as_deref())
        .bind(filter.status.as_deref())
        .bind(filter.city.as_deref())
        .bind(filter.needs_attention)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM assets WHERE {WHERE_CLAUSE}"
        ))
        .bind(filter.asset_type.as_deref())
        .bind(filter.status.as_deref())
        .bind(filter.city.as_deref())
        .bind(filter.needs_attention)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok((rows, total))
    }

    /// Find a full asset record by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AssetEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_asset_by_id");
        let result = sqlx::query_as::<_, AssetEntity>(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a new asset. The `asset_type` column is always derived from the
    /// details variant, never taken from the caller separately.
    pub async fn create(
        &self,
        write: &AssetWrite,
        initial_history: &HistoryEntry,
    ) -> Result<AssetEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_asset");
        let result = sqlx::query_as::<_, AssetEntity>(&format!(
            "INSERT INTO assets (title, nickname, description, asset_type, status, location, \
                                 details, acquisition, valuation, mutation_title, compliance, \
                                 dispute, owners, contacts, documents, history, tags, notes, \
                                 needs_attention, high_value, has_legal_issues)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, '[]'::jsonb, \
                     jsonb_build_array($15::jsonb), $16, $17, $18, $19, $20)
             RETURNING {ASSET_COLUMNS}"
        ))
        .bind(&write.title)
        .bind(write.nickname.as_deref())
        .bind(write.description.as_deref())
        .bind(write.details.asset_type().to_string())
        .bind(write.status.to_string())
        .bind(serde_json::to_value(&write.location).unwrap_or_default())
        .bind(serde_json::to_value(&write.details).unwrap_or_default())
        .bind(write.acquisition.as_ref().map(|v| serde_json::to_value(v).unwrap_or_default()))
        .bind(write.valuation.as_ref().map(|v| serde_json::to_value(v).unwrap_or_default()))
        .bind(write.mutation_title.as_ref().map(|v| serde_json::to_value(v).unwrap_or_default()))
        .bind(write.compliance.as_ref().map(|v| serde_json::to_value(v).unwrap_or_default()))
        .bind(write.dispute.as_ref().map(|v| serde_json::to_value(v).unwrap_or_default()))
        .bind(serde_json::to_value(&write.owners).unwrap_or_default())
        .bind(serde_json::to_value(&write.contacts).unwrap_or_default())
        .bind(serde_json::to_value(initial_history).unwrap_or_default())
        .bind(&write.tags)
        .bind(write.notes.as_deref())
        .bind(write.flags.needs_attention)
        .bind(write.flags.high_value)
        .bind(write.flags.has_legal_issues)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Apply a field-level patch, appending a history entry in the same
    /// statement. Returns the updated record, or None if the id is unknown.
    pub async fn update(
        &self,
        id: Uuid,
        patch: &AssetPatch,
        history: &HistoryEntry,
    ) -> Result<Option<AssetEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_asset");
        let result = sqlx::query_as::<_, AssetEntity>(&format!(
            "UPDATE assets
             SET title = COALESCE($2, title),
                 nickname = COALESCE($3, nickname),
                 description = COALESCE($4, description),
                 status = COALESCE($5, status),
                 location = COALESCE($6, location),
                 details = COALESCE($7, details),
                 asset_type = COALESCE($8, asset_type),
                 acquisition = COALESCE($9, acquisition),
                 valuation = COALESCE($10, valuation),
                 mutation_title = COALESCE($11, mutation_title),
                 compliance = COALESCE($12, compliance),
                 dispute = COALESCE($13, dispute),
                 tags = COALESCE($14, tags),
                 notes = COALESCE($15, notes),
                 needs_attention = COALESCE($16, needs_attention),
                 high_value = COALESCE($17, high_value),
                 has_legal_issues = COALESCE($18, has_legal_issues),
                 history = history || $19::jsonb,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {ASSET_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.nickname.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.status.map(|s| s.to_string()))
        .bind(patch.location.as_ref().map(|v| serde_json::to_value(v).unwrap_or_default()))
        .bind(patch.details.as_ref().map(|v| serde_json::to_value(v).unwrap_or_default()))
        .bind(patch.details.as_ref().map(|d| d.asset_type().to_string()))
        .bind(patch.acquisition.as_ref().map(|v| serde_json::to_value(v).unwrap_or_default()))
        .bind(patch.valuation.as_ref().map(|v| serde_json::to_value(v).unwrap_or_default()))
        .bind(patch.mutation_title.as_ref().map(|v| serde_json::to_value(v).unwrap_or_default()))
        .bind(patch.compliance.as_ref().map(|v| serde_json::to_value(v).unwrap_or_default()))
        .bind(patch.dispute.as_ref().map(|v| serde_json::to_value(v).unwrap_or_default()))
        .bind(patch.tags.as_ref())
        .bind(patch.notes.as_deref())
        .bind(patch.flags.map(|f| f.needs_attention))
        .bind(patch.flags.map(|f| f.high_value))
        .bind(patch.flags.map(|f| f.has_legal_issues))
        .bind(serde_json::to_value(history).unwrap_or_default())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Hard-delete an asset. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_asset");
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }

    /// Atomically replace the whole owners array, appending a history entry
    /// in the same statement. The caller validates shares first.
    pub async fn replace_owners(
        &self,
        id: Uuid,
        owners: &[OwnershipEntry],
        history: &HistoryEntry,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("replace_asset_owners");
        let result = sqlx::query(
            "UPDATE assets
             SET owners = $2,
                 history = history || $3::jsonb,
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(serde_json::to_value(owners).unwrap_or_default())
        .bind(serde_json::to_value(history).unwrap_or_default())
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }

    /// Append a document to the embedded attachments array. Returns the new
    /// attachment count, or None if the asset id is unknown.
    pub async fn push_document(
        &self,
        id: Uuid,
        document: &serde_json::Value,
        history: &HistoryEntry,
    ) -> Result<Option<i64>, sqlx::Error> {
        let timer = QueryTimer::new("push_asset_document");
        let result = sqlx::query_scalar::<_, i64>(
            "UPDATE assets
             SET documents = documents || $2::jsonb,
                 history = history || $3::jsonb,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING jsonb_array_length(documents)::bigint",
        )
        .bind(id)
        .bind(document)
        .bind(serde_json::to_value(history).unwrap_or_default())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Remove an embedded document by its attachment id.
    ///
    /// Returns false when nothing was modified; a missing asset and a missing
    /// attachment are indistinguishable here, matching the endpoint's single
    /// not-found response.
    pub async fn pull_document(
        &self,
        id: Uuid,
        document_id: Uuid,
        history: &HistoryEntry,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("pull_asset_document");
        let result = sqlx::query(
            "UPDATE assets
             SET documents = (
                     SELECT COALESCE(jsonb_agg(d), '[]'::jsonb)
                     FROM jsonb_array_elements(documents) AS d
                     WHERE d->>'id' <> $2
                 ),
                 history = history || $3::jsonb,
                 updated_at = NOW()
             WHERE id = $1
               AND EXISTS (
                     SELECT 1 FROM jsonb_array_elements(documents) AS d
                     WHERE d->>'id' = $2
                 )",
        )
        .bind(id)
        .bind(document_id.to_string())
        .bind(serde_json::to_value(history).unwrap_or_default())
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }

    /// Append a history entry. Returns whether the asset exists.
    pub async fn append_history(
        &self,
        id: Uuid,
        history: &HistoryEntry,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("append_asset_history");
        let result = sqlx::query(
            "UPDATE assets
             SET history = history || $2::jsonb,
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(serde_json::to_value(history).unwrap_or_default())
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
