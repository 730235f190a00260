//! Person directory endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::Person;
use persistence::repositories::{PersonPatch, PersonRepository};
use serde::Deserialize;
use shared::pagination::{PageParams, Paginated};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Session;

#[derive(Debug, Default, Deserialize)]
pub struct ListPeopleQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub per_page: Option<i64>,
    /// Case-insensitive substring match on the full name.
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePersonRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub full_name: String,
    pub father_name: Option<String>,
    #[validate(custom(function = "shared::validation::validate_national_id"))]
    pub national_id: Option<String>,
    pub relation_to_family: Option<String>,
    #[serde(default = "default_life_status")]
    pub life_status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct PatchPersonRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub full_name: Option<String>,
    pub father_name: Option<String>,
    #[validate(custom(function = "shared::validation::validate_national_id"))]
    pub national_id: Option<String>,
    pub relation_to_family: Option<String>,
    pub life_status: Option<String>,
    pub notes: Option<String>,
}

fn default_life_status() -> String {
    "alive".to_string()
}

/// GET /api/people
pub async fn list_people(
    State(state): State<AppState>,
    _session: Session,
    Query(query): Query<ListPeopleQuery>,
) -> Result<Json<Paginated<Person>>, ApiError> {
    let page = PageParams {
        page: query.page.unwrap_or(1),
        per_page: query
            .per_page
            .unwrap_or(shared::pagination::DEFAULT_PER_PAGE),
    }
    .clamped();

    let repo = PersonRepository::new(state.pool.clone());
    let (rows, total) = repo.list(query.search.as_deref(), page).await?;

    Ok(Json(Paginated::new(
        rows.into_iter().map(Into::into).collect(),
        page,
        total,
    )))
}

/// GET /api/people/:id
pub async fn get_person(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<Person>, ApiError> {
    let repo = PersonRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Person {} not found", id)))?;
    Ok(Json(entity.into()))
}

/// POST /api/people
pub async fn create_person(
    State(state): State<AppState>,
    _session: Session,
    Json(payload): Json<CreatePersonRequest>,
) -> Result<(StatusCode, Json<Person>), ApiError> {
    payload.validate()?;

    let repo = PersonRepository::new(state.pool.clone());
    let entity = repo
        .create(
            &payload.full_name,
            payload.father_name.as_deref(),
            payload.national_id.as_deref(),
            payload.relation_to_family.as_deref(),
            &payload.life_status,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entity.into())))
}

/// PATCH /api/people/:id
pub async fn patch_person(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchPersonRequest>,
) -> Result<Json<Person>, ApiError> {
    payload.validate()?;

    let patch = PersonPatch {
        full_name: payload.full_name,
        father_name: payload.father_name,
        national_id: payload.national_id,
        relation_to_family: payload.relation_to_family,
        life_status: payload.life_status,
        notes: payload.notes,
    };

    let repo = PersonRepository::new(state.pool.clone());
    let entity = repo
        .update(id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Person {} not found", id)))?;
    Ok(Json(entity.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_person_validation() {
        let valid = CreatePersonRequest {
            full_name: "Ahmed Khan".to_string(),
            father_name: None,
            national_id: Some("12345-1234567-1".to_string()),
            relation_to_family: Some("uncle".to_string()),
            life_status: "alive".to_string(),
            notes: None,
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreatePersonRequest {
            full_name: String::new(),
            ..valid
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_create_person_bad_national_id() {
        let request = CreatePersonRequest {
            full_name: "Ahmed Khan".to_string(),
            father_name: None,
            national_id: Some("not-a-cnic".to_string()),
            relation_to_family: None,
            life_status: "alive".to_string(),
            notes: None,
        };
        assert!(request.validate().is_err());
    }
}
