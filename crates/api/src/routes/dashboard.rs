//! Dashboard endpoint.

use axum::{extract::State, Json};
use domain::models::DashboardSummary;
use persistence::repositories::DashboardRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Session;

/// GET /api/dashboard
///
/// Aggregated view of the registry: totals, grouped counts, top owners,
/// and the recent acquisition trend. Computed fresh on each request.
pub async fn get_dashboard(
    State(state): State<AppState>,
    _session: Session,
) -> Result<Json<DashboardSummary>, ApiError> {
    let repo = DashboardRepository::new(state.pool.clone());
    let summary = repo.get_summary().await?;
    Ok(Json(summary))
}
