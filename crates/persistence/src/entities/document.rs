//! Standalone document entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the documents table (the standalone register,
/// distinct from the embedded attachments array on assets).
#[derive(Debug, Clone, FromRow)]
pub struct DocumentEntity {
    pub id: Uuid,
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
    pub created_at: DateTime<Utc>,
}

impl From<DocumentEntity> for domain::models::Document {
    fn from(entity: DocumentEntity) -> Self {
        Self {
            id: entity.id,
            asset_id: entity.asset_id,
            label: entity.label,
            file_url: entity.file_url,
            doc_type: entity.doc_type,
            file_type: entity.file_type,
            issued_by: entity.issued_by,
            issue_date: entity.issue_date,
            is_critical: entity.is_critical,
            uploaded_by: entity.uploaded_by,
            notes: entity.notes,
            created_at: entity.created_at,
        }
    }
}
