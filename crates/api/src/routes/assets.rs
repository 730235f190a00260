//! Asset endpoints.
//!
//! Reads are open to any session; every mutation sits behind the admin
//! guard and appends a history entry in the same database statement as the
//! change itself.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use domain::models::{
    Acquisition, Asset, AssetDetails, AssetFlags, AssetStatus, AssetSummary, Compliance,
    ContactRef, Dispute, HistoryEntry, Location, MutationTitle, OwnershipEntry, Valuation,
};
use domain::services::validate_owner_shares;
use persistence::repositories::{AssetFilter, AssetPatch, AssetRepository, AssetWrite, PersonRepository};
use serde::Deserialize;
use shared::pagination::{PageParams, Paginated};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Session;

#[derive(Debug, Default, Deserialize)]
pub struct ListAssetsQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub per_page: Option<i64>,
    pub asset_type: Option<String>,
    pub status: Option<String>,
    pub city: Option<String>,
    pub needs_attention: Option<bool>,
}

impl ListAssetsQuery {
    fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(1),
            per_page: self.per_page.unwrap_or(shared::pagination::DEFAULT_PER_PAGE),
        }
        .clamped()
    }

    fn filter(&self) -> AssetFilter {
        AssetFilter {
            asset_type: self.asset_type.clone(),
            status: self.status.clone(),
            city: self.city.clone(),
            needs_attention: self.needs_attention,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssetRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: String,
    pub nickname: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub status: AssetStatus,
    #[serde(default)]
    #[validate(nested)]
    pub location: Location,
    pub details: AssetDetails,
    pub acquisition: Option<Acquisition>,
    pub valuation: Option<Valuation>,
    pub mutation_title: Option<MutationTitle>,
    pub compliance: Option<Compliance>,
    pub dispute: Option<Dispute>,
    #[serde(default)]
    #[validate(nested)]
    pub owners: Vec<OwnershipEntry>,
    #[serde(default)]
    pub contacts: Vec<ContactRef>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub flags: AssetFlags,
}

/// Field-level patch. Absent fields are left untouched; present embedded
/// blocks replace the stored block whole. Owners, documents, and history
/// are mutated through their own endpoints.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PatchAssetRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: Option<String>,
    pub nickname: Option<String>,
    pub description: Option<String>,
    pub status: Option<AssetStatus>,
    #[validate(nested)]
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

impl PatchAssetRequest {
    /// Names of the fields present in this patch, for the history entry.
    fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.title.is_some() {
            fields.push("title");
        }
        if self.nickname.is_some() {
            fields.push("nickname");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.status.is_some() {
            fields.push("status");
        }
        if self.location.is_some() {
            fields.push("location");
        }
        if self.details.is_some() {
            fields.push("details");
        }
        if self.acquisition.is_some() {
            fields.push("acquisition");
        }
        if self.valuation.is_some() {
            fields.push("valuation");
        }
        if self.mutation_title.is_some() {
            fields.push("mutation_title");
        }
        if self.compliance.is_some() {
            fields.push("compliance");
        }
        if self.dispute.is_some() {
            fields.push("dispute");
        }
        if self.tags.is_some() {
            fields.push("tags");
        }
        if self.notes.is_some() {
            fields.push("notes");
        }
        if self.flags.is_some() {
            fields.push("flags");
        }
        fields
    }

    fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceOwnersRequest {
    #[validate(nested)]
    pub owners: Vec<OwnershipEntry>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AppendHistoryRequest {
    pub date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub action: String,
    pub details: Option<String>,
}

/// Verify that every referenced person exists.
async fn check_owners_exist(
    state: &AppState,
    owners: &[OwnershipEntry],
) -> Result<(), ApiError> {
    if owners.is_empty() {
        return Ok(());
    }

    let ids: Vec<Uuid> = owners.iter().map(|o| o.person_id).collect();
    let people = PersonRepository::new(state.pool.clone());
    let found = people.find_names(&ids).await?;

    for owner in owners {
        if !found.iter().any(|(id, _)| *id == owner.person_id) {
            return Err(ApiError::Validation(format!(
                "Unknown person in owners: {}",
                owner.person_id
            )));
        }
    }
    Ok(())
}

/// Serialize an asset for the detail view: history sorted by date and
/// ownership entries annotated with the person's name.
async fn detail_response(state: &AppState, mut asset: Asset) -> Result<serde_json::Value, ApiError> {
    asset.history.sort_by_key(|e| e.date);

    let ids: Vec<Uuid> = asset.owners.iter().map(|o| o.person_id).collect();
    let names = if ids.is_empty() {
        Vec::new()
    } else {
        PersonRepository::new(state.pool.clone())
            .find_names(&ids)
            .await?
    };

    let mut body = serde_json::to_value(&asset)
        .map_err(|e| ApiError::Internal(format!("Serialization failed: {}", e)))?;

    if let Some(owners) = body.get_mut("owners").and_then(|v| v.as_array_mut()) {
        for entry in owners.iter_mut() {
            let person_id = entry
                .get("person_id")
                .and_then(|v| v.as_str())
                .and_then(|s| s.parse::<Uuid>().ok());
            let name = person_id
                .and_then(|id| names.iter().find(|(nid, _)| *nid == id))
                .map(|(_, name)| name.clone());
            if let Some(obj) = entry.as_object_mut() {
                obj.insert(
                    "full_name".to_string(),
                    name.map(serde_json::Value::String)
                        .unwrap_or(serde_json::Value::Null),
                );
            }
        }
    }

    Ok(body)
}

/// GET /api/assets
pub async fn list_assets(
    State(state): State<AppState>,
    _session: Session,
    Query(query): Query<ListAssetsQuery>,
) -> Result<Json<Paginated<AssetSummary>>, ApiError> {
    let page = query.page_params();
    let repo = AssetRepository::new(state.pool.clone());
    let (rows, total) = repo.list(&query.filter(), page).await?;

    Ok(Json(Paginated::new(
        rows.into_iter().map(Into::into).collect(),
        page,
        total,
    )))
}

/// GET /api/assets/:id
pub async fn get_asset(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = AssetRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Asset {} not found", id)))?;

    Ok(Json(detail_response(&state, entity.into()).await?))
}

/// POST /api/assets
pub async fn create_asset(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateAssetRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    payload.validate()?;
    validate_owner_shares(&payload.owners)?;
    check_owners_exist(&state, &payload.owners).await?;

    let write = AssetWrite {
        title: payload.title,
        nickname: payload.nickname,
        description: payload.description,
        status: payload.status,
        location: payload.location,
        details: payload.details,
        acquisition: payload.acquisition,
        valuation: payload.valuation,
        mutation_title: payload.mutation_title,
        compliance: payload.compliance,
        dispute: payload.dispute,
        owners: payload.owners,
        contacts: payload.contacts,
        tags: payload.tags,
        notes: payload.notes,
        flags: payload.flags,
    };

    let history = HistoryEntry::now("created", Some("Asset record created".to_string()), session.email.as_str());
    let repo = AssetRepository::new(state.pool.clone());
    let entity = repo.create(&write, &history).await?;

    Ok((
        StatusCode::CREATED,
        Json(detail_response(&state, entity.into()).await?),
    ))
}

/// PATCH /api/assets/:id
pub async fn patch_asset(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchAssetRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    payload.validate()?;
    if payload.is_empty() {
        return Err(ApiError::Validation("Patch contains no fields".to_string()));
    }

    let changed = payload.changed_fields().join(", ");
    let patch = AssetPatch {
        title: payload.title,
        nickname: payload.nickname,
        description: payload.description,
        status: payload.status,
        location: payload.location,
        details: payload.details,
        acquisition: payload.acquisition,
        valuation: payload.valuation,
        mutation_title: payload.mutation_title,
        compliance: payload.compliance,
        dispute: payload.dispute,
        tags: payload.tags,
        notes: payload.notes,
        flags: payload.flags,
    };

    let history = HistoryEntry::now("updated", Some(format!("Changed: {}", changed)), session.email.as_str());
    let repo = AssetRepository::new(state.pool.clone());
    let entity = repo
        .update(id, &patch, &history)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Asset {} not found", id)))?;

    Ok(Json(detail_response(&state, entity.into()).await?))
}

/// DELETE /api/assets/:id
pub async fn delete_asset(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = AssetRepository::new(state.pool.clone());
    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Asset {} not found", id)))
    }
}

/// PUT /api/assets/:id/owners
///
/// Atomically replaces the whole owners array after validating it.
pub async fn replace_owners(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplaceOwnersRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    payload.validate()?;
    validate_owner_shares(&payload.owners)?;
    check_owners_exist(&state, &payload.owners).await?;

    let history = HistoryEntry::now(
        "owners_replaced",
        Some(format!("Ownership replaced ({} entries)", payload.owners.len())),
        session.email.as_str(),
    );

    let repo = AssetRepository::new(state.pool.clone());
    if !repo.replace_owners(id, &payload.owners, &history).await? {
        return Err(ApiError::NotFound(format!("Asset {} not found", id)));
    }

    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Asset {} not found", id)))?;
    Ok(Json(detail_response(&state, entity.into()).await?))
}

/// POST /api/assets/:id/history
pub async fn append_history(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<AppendHistoryRequest>,
) -> Result<(StatusCode, Json<HistoryEntry>), ApiError> {
    payload.validate()?;

    let entry = HistoryEntry {
        id: Uuid::new_v4(),
        date: payload.date.unwrap_or_else(Utc::now),
        action: payload.action,
        details: payload.details,
        actor: session.email.clone(),
    };

    let repo = AssetRepository::new(state.pool.clone());
    if !repo.append_history(id, &entry).await? {
        return Err(ApiError::NotFound(format!("Asset {} not found", id)));
    }

    Ok((StatusCode::CREATED, Json(entry)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query = ListAssetsQuery::default();
        let page = query.page_params();
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, shared::pagination::DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_list_query_clamps_page() {
        let query = ListAssetsQuery {
            page: Some(0),
            per_page: Some(10_000),
            ..Default::default()
        };
        let page = query.page_params();
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, shared::pagination::MAX_PER_PAGE);
    }

    #[test]
    fn test_create_request_title_validation() {
        let request: CreateAssetRequest = serde_json::from_value(serde_json::json!({
            "title": "",
            "details": { "kind": "other" }
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_minimal() {
        let request: CreateAssetRequest = serde_json::from_value(serde_json::json!({
            "title": "Family house",
            "details": { "kind": "house" }
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert!(request.owners.is_empty());
        assert_eq!(request.status, AssetStatus::Unknown);
    }

    #[test]
    fn test_create_request_rejects_impossible_coordinates() {
        let request: CreateAssetRequest = serde_json::from_value(serde_json::json!({
            "title": "Plot with bad survey data",
            "details": { "kind": "land_plot" },
            "location": { "latitude": 999.0, "longitude": -500.0 }
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_accepts_real_coordinates() {
        let request: CreateAssetRequest = serde_json::from_value(serde_json::json!({
            "title": "Plot 27-B",
            "details": { "kind": "land_plot" },
            "location": { "city": "Lahore", "latitude": 31.5204, "longitude": 74.3587 }
        }))
        .unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_zero_owner_share() {
        let request: CreateAssetRequest = serde_json::from_value(serde_json::json!({
            "title": "Plot 27-B",
            "details": { "kind": "land_plot" },
            "owners": [
                { "person_id": Uuid::new_v4(), "percentage": 0.0, "ownership_type": "legal_owner" }
            ]
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_patch_request_rejects_impossible_coordinates() {
        let patch: PatchAssetRequest = serde_json::from_value(serde_json::json!({
            "location": { "latitude": -91.0 }
        }))
        .unwrap();
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_replace_owners_rejects_out_of_range_share() {
        let request: ReplaceOwnersRequest = serde_json::from_value(serde_json::json!({
            "owners": [
                { "person_id": Uuid::new_v4(), "percentage": 150.0, "ownership_type": "joint" }
            ]
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_patch_changed_fields() {
        let patch: PatchAssetRequest = serde_json::from_value(serde_json::json!({
            "title": "New title",
            "status": "clean"
        }))
        .unwrap();
        assert_eq!(patch.changed_fields(), vec!["title", "status"]);
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_empty_patch_detected() {
        let patch: PatchAssetRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(patch.is_empty());
    }
}
