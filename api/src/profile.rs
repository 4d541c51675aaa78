use axum::{extract::State, http::HeaderMap, Json};
use lawsphere_shared::{ApiResponse, UpdateProfile, UserProfile};

use crate::{auth, error::ApiError, AppState};

/// GET /api/users/profile: the caller's profile
pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let identity = auth::extract_identity(&headers, &state.config.jwt_secret)?;
    let profile = state.profiles.get_or_create(&identity).await;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PUT /api/users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut payload): Json<UpdateProfile>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let identity = auth::extract_identity(&headers, &state.config.jwt_secret)?;

    if let Some(name) = payload.name.take() {
        let name = ammonia::clean(name.trim());
        if name.is_empty() {
            return Err(ApiError::InvalidRequest("Name cannot be empty".to_string()));
        }
        payload.name = Some(name);
    }
    for field in [
        &mut payload.mobile,
        &mut payload.location,
        &mut payload.bio,
        &mut payload.profile_image,
    ] {
        *field = field.take().map(|value| ammonia::clean(&value));
    }

    let profile = state.profiles.update(&identity, payload).await;
    Ok(Json(ApiResponse::ok(profile)))
}
