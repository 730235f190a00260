//! Standalone document register repository.

use chrono::NaiveDate;
use shared::pagination::PageParams;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::DocumentEntity;
use crate::metrics::QueryTimer;

const DOCUMENT_COLUMNS: &str = "id, asset_id, label, file_url, doc_type, file_type, issued_by, \
                                issue_date, is_critical, uploaded_by, notes, created_at";

/// Payload for a new standalone document register entry.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub asset_id: Uuid,
    pub label: String,
    pub file_url: String,
    pub doc_type: Option<String>,
    pub file_type: String,
    pub issued_by: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub is_critical: bool,
    pub uploaded_by: Option<Uuid>,
    pub notes: Option<String>,
}

/// Repository for the standalone documents table.
#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Creates a new DocumentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a register entry. The foreign key on asset_id surfaces an
    /// unknown asset as a database error.
    pub async fn create(&self, new: &NewDocument) -> Result<DocumentEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_document");
        let result = sqlx::query_as::<_, DocumentEntity>(&format!(
            "INSERT INTO documents (asset_id, label, file_url, doc_type, file_type, issued_by, \
                                    issue_date, is_critical, uploaded_by, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(new.asset_id)
        .bind(&new.label)
        .bind(&new.file_url)
        .bind(new.doc_type.as_deref())
        .bind(&new.file_type)
        .bind(new.issued_by.as_deref())
        .bind(new.issue_date)
        .bind(new.is_critical)
        .bind(new.uploaded_by)
        .bind(new.notes.as_deref())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List register entries, optionally narrowed to one asset.
    pub async fn list(
        &self,
        asset_id: Option<Uuid>,
        page: PageParams,
    ) -> Result<(Vec<DocumentEntity>, i64), sqlx::Error> {
        let timer = QueryTimer::new("list_documents");

        let rows = sqlx::query_as::<_, DocumentEntity>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents
             WHERE ($1::uuid IS NULL OR asset_id = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(asset_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM documents WHERE ($1::uuid IS NULL OR asset_id = $1)",
        )
        .bind(asset_id)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok((rows, total))
    }
}
