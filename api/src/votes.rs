use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use lawsphere_shared::{ApiResponse, VoteResponse};

use crate::{auth, error::ApiError, store::VoteDelta, AppState};

async fn vote_topic(
    state: AppState,
    headers: HeaderMap,
    topic_id: String,
    delta: VoteDelta,
) -> Result<Json<ApiResponse<VoteResponse>>, ApiError> {
    auth::extract_identity(&headers, &state.config.jwt_secret)?;
    let vote_score = state.community.vote_topic(&topic_id, delta).await?;
    Ok(Json(ApiResponse::ok(VoteResponse {
        message: format!("{} for topic ID: {topic_id} registered", delta.label()),
        vote_score,
    })))
}

async fn vote_reply(
    state: AppState,
    headers: HeaderMap,
    topic_id: String,
    reply_id: String,
    delta: VoteDelta,
) -> Result<Json<ApiResponse<VoteResponse>>, ApiError> {
    auth::extract_identity(&headers, &state.config.jwt_secret)?;
    let vote_score = state
        .community
        .vote_reply(&topic_id, &reply_id, delta)
        .await?;
    Ok(Json(ApiResponse::ok(VoteResponse {
        message: format!(
            "{} for reply ID: {reply_id} in topic ID: {topic_id} registered",
            delta.label()
        ),
        vote_score,
    })))
}

/// PUT /api/community/topics/:id/upvote
pub async fn upvote_topic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(topic_id): Path<String>,
) -> Result<Json<ApiResponse<VoteResponse>>, ApiError> {
    vote_topic(state, headers, topic_id, VoteDelta::Up).await
}

/// PUT /api/community/topics/:id/downvote
pub async fn downvote_topic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(topic_id): Path<String>,
) -> Result<Json<ApiResponse<VoteResponse>>, ApiError> {
    vote_topic(state, headers, topic_id, VoteDelta::Down).await
}

/// PUT /api/community/topics/:id/replies/:reply_id/upvote
pub async fn upvote_reply(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((topic_id, reply_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<VoteResponse>>, ApiError> {
    vote_reply(state, headers, topic_id, reply_id, VoteDelta::Up).await
}

/// PUT /api/community/topics/:id/replies/:reply_id/downvote
pub async fn downvote_reply(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((topic_id, reply_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<VoteResponse>>, ApiError> {
    vote_reply(state, headers, topic_id, reply_id, VoteDelta::Down).await
}
