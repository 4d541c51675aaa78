use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use lawsphere_shared::{ApiResponse, DownloadCount, Resource, ViewCount};
use serde::Deserialize;
use tracing::info;

use crate::{error::ApiError, store::ResourceFilter, AppState};

#[derive(Deserialize)]
pub struct FileParams {
    #[serde(default)]
    download: bool,
}

/// GET /api/resources?category=...&type=...&search=...
pub async fn list_resources(
    State(state): State<AppState>,
    Query(filter): Query<ResourceFilter>,
) -> Result<Json<ApiResponse<Vec<Resource>>>, ApiError> {
    let resources = state
        .resources
        .list(&filter)
        .await
        .map_err(|e| ApiError::internal("retrieving resources", e))?;
    Ok(Json(ApiResponse::list(resources)))
}

/// GET /api/resources/categories
pub async fn list_categories(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse::ok(state.resource_categories.as_ref().clone()))
}

/// GET /api/resources/:id
pub async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Resource>>, ApiError> {
    Ok(Json(ApiResponse::ok(state.resources.find(&id).await?)))
}

/// PUT /api/resources/:id/view
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ViewCount>>, ApiError> {
    let views = state.resources.record_view(&id).await?;
    Ok(Json(ApiResponse::ok(ViewCount { views })))
}

/// PUT /api/resources/:id/download
pub async fn record_download(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DownloadCount>>, ApiError> {
    let downloads = state.resources.record_download(&id).await?;
    Ok(Json(ApiResponse::ok(DownloadCount { downloads })))
}

/// GET /api/resources/:id/file redirects to the hosted PDF
pub async fn resource_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<FileParams>,
) -> Result<Redirect, ApiError> {
    let url = state.resources.file_url(&id).await?;
    info!(resource_id = %id, download = params.download, "redirecting to hosted file");
    Ok(Redirect::temporary(&url))
}
