//! Document endpoints.
//!
//! Two surfaces: the embedded attachment array on an asset (attach/remove)
//! and the standalone document register for scanned legal papers. The
//! embedded array is the source of truth for per-asset attachment counts;
//! the register is never merged into it.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use domain::models::{infer_file_type, AssetDocument, Document};
use persistence::repositories::{AssetRepository, DocumentRepository, NewDocument};
use serde::Deserialize;
use shared::pagination::{PageParams, Paginated};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Session;

#[derive(Debug, Deserialize, Validate)]
pub struct AttachDocumentRequest {
    pub asset_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub label: String,

    #[validate(custom(function = "shared::validation::validate_file_url"))]
    pub file_url: String,

    pub doc_type: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveDocumentRequest {
    pub asset_id: Uuid,
    pub document_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDocumentRequest {
    pub asset_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub label: String,

    #[validate(custom(function = "shared::validation::validate_file_url"))]
    pub file_url: String,

    pub doc_type: Option<String>,
    pub issued_by: Option<String>,
    pub issue_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_critical: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListDocumentsQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub per_page: Option<i64>,
    pub asset_id: Option<Uuid>,
}

/// POST /api/documents/attach
///
/// Appends an attachment to the asset's embedded documents array. The
/// file type is inferred from the URL.
pub async fn attach_document(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<AttachDocumentRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    payload.validate()?;

    let document = AssetDocument::new(
        payload.label.clone(),
        payload.file_url.clone(),
        payload.doc_type.clone(),
        payload.notes.clone(),
    );
    let value = serde_json::to_value(&document)
        .map_err(|e| ApiError::Internal(format!("Serialization failed: {}", e)))?;

    let history = domain::models::HistoryEntry::now(
        "document_attached",
        Some(format!("Attached document: {}", payload.label)),
        session.email.as_str(),
    );

    let repo = AssetRepository::new(state.pool.clone());
    let count = repo
        .push_document(payload.asset_id, &value, &history)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Asset {} not found", payload.asset_id)))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "document": document,
            "document_count": count,
        })),
    ))
}

/// POST /api/documents/remove
///
/// Removes an attachment from the embedded array. A missing asset and a
/// missing attachment both answer 404; the database cannot tell them
/// apart in one statement and the distinction does not matter to callers.
pub async fn remove_document(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RemoveDocumentRequest>,
) -> Result<StatusCode, ApiError> {
    let history = domain::models::HistoryEntry::now(
        "document_removed",
        Some(format!("Removed document {}", payload.document_id)),
        session.email.as_str(),
    );

    let repo = AssetRepository::new(state.pool.clone());
    if repo
        .pull_document(payload.asset_id, payload.document_id, &history)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Asset or document not found".to_string()))
    }
}

/// POST /api/documents
///
/// Creates an entry in the standalone document register.
pub async fn create_document(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    payload.validate()?;

    let new = NewDocument {
        asset_id: payload.asset_id,
        label: payload.label,
        file_type: infer_file_type(&payload.file_url),
        file_url: payload.file_url,
        doc_type: payload.doc_type,
        issued_by: payload.issued_by,
        issue_date: payload.issue_date,
        is_critical: payload.is_critical,
        uploaded_by: Some(session.user_id),
        notes: payload.notes,
    };

    let repo = DocumentRepository::new(state.pool.clone());
    let entity = repo.create(&new).await?;

    Ok((StatusCode::CREATED, Json(entity.into())))
}

/// GET /api/documents?asset_id=
pub async fn list_documents(
    State(state): State<AppState>,
    _session: Session,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<Paginated<Document>>, ApiError> {
    let page = PageParams {
        page: query.page.unwrap_or(1),
        per_page: query
            .per_page
            .unwrap_or(shared::pagination::DEFAULT_PER_PAGE),
    }
    .clamped();

    let repo = DocumentRepository::new(state.pool.clone());
    let (rows, total) = repo.list(query.asset_id, page).await?;

    Ok(Json(Paginated::new(
        rows.into_iter().map(Into::into).collect(),
        page,
        total,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_request_validation() {
        let valid = AttachDocumentRequest {
            asset_id: Uuid::new_v4(),
            label: "Registry extract".to_string(),
            file_url: "https://drive.google.com/file/d/abc".to_string(),
            doc_type: Some("registry".to_string()),
            notes: None,
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_attach_request_rejects_non_http_url() {
        let request = AttachDocumentRequest {
            asset_id: Uuid::new_v4(),
            label: "x".to_string(),
            file_url: "ftp://example.com/doc.pdf".to_string(),
            doc_type: None,
            notes: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_document_defaults() {
        let request: CreateDocumentRequest = serde_json::from_value(serde_json::json!({
            "asset_id": Uuid::new_v4(),
            "label": "Deed",
            "file_url": "https://example.com/deed.pdf"
        }))
        .unwrap();
        assert!(!request.is_critical);
        assert!(request.validate().is_ok());
    }
}
