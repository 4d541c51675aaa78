use axum::{
    extract::{Path, Query, State},
    Json,
};
use lawsphere_shared::{ApiResponse, Lawyer};

use crate::{error::ApiError, store::LawyerFilter, AppState};

/// GET /api/lawyers?practiceArea=...&serviceType=...&city=...
pub async fn list_lawyers(
    State(state): State<AppState>,
    Query(filter): Query<LawyerFilter>,
) -> Json<ApiResponse<Vec<Lawyer>>> {
    Json(ApiResponse::list(state.lawyers.search(&filter)))
}

/// GET /api/lawyers/:id
pub async fn get_lawyer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Lawyer>>, ApiError> {
    Ok(Json(ApiResponse::ok(state.lawyers.get(&id)?)))
}
