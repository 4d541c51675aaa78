use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use lawsphere_shared::*;
use serde::Deserialize;

use crate::{auth, error::ApiError, AppState};

// ── Query params ──

#[derive(Deserialize)]
pub struct TopicListParams {
    category: Option<String>,
}

// ── Handlers ──

/// GET /api/community/topics?category=Family%20Law
pub async fn list_topics(
    State(state): State<AppState>,
    Query(params): Query<TopicListParams>,
) -> Result<Json<ApiResponse<Vec<TopicSummary>>>, ApiError> {
    let topics = state
        .community
        .list_topics(params.category.as_deref())
        .await?;
    Ok(Json(ApiResponse::list(topics)))
}

/// GET /api/community/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<ForumCategory>>> {
    Json(ApiResponse::ok(state.forum_categories.as_ref().clone()))
}

/// GET /api/community/topics/:id
pub async fn get_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Topic>>, ApiError> {
    let topic = state.community.topic(&id).await?;
    Ok(Json(ApiResponse::ok(topic)))
}

/// POST /api/community/topics
pub async fn create_topic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateTopic>,
) -> Result<(StatusCode, Json<ApiResponse<Topic>>), ApiError> {
    let identity = auth::extract_identity(&headers, &state.config.jwt_secret)?;
    let topic = state.community.create_topic(&identity, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(topic))))
}

/// POST /api/community/topics/:id/replies
pub async fn create_reply(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(topic_id): Path<String>,
    Json(payload): Json<CreateReply>,
) -> Result<Json<ApiResponse<Reply>>, ApiError> {
    let identity = auth::extract_identity(&headers, &state.config.jwt_secret)?;
    let reply = state
        .community
        .add_reply(&topic_id, &identity, payload)
        .await?;
    Ok(Json(ApiResponse::ok(reply)))
}
