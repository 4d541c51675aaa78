//! Failure taxonomy of the API and its JSON rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lawsphere_shared::ErrorBody;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Not authorized, no valid token")]
    Unauthorized,
    #[error("Live notifications are disabled")]
    NotificationsDisabled,
    #[error("Server error {context}")]
    Internal {
        context: &'static str,
        detail: String,
    },
}

impl ApiError {
    /// `context` completes the client message "Server error <context>".
    pub fn internal(context: &'static str, cause: impl std::fmt::Display) -> Self {
        Self::Internal {
            context,
            detail: cause.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotificationsDisabled => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TopicNotFound(_) => Self::NotFound("Topic not found".to_string()),
            StoreError::ReplyNotFound { .. } => Self::NotFound("Reply not found".to_string()),
            StoreError::ParentNotFound { .. } => {
                Self::NotFound("Parent comment not found".to_string())
            }
            StoreError::ResourceNotFound(_) => Self::NotFound("Resource not found".to_string()),
            StoreError::FileNotFound(_) => Self::NotFound("Resource file not found".to_string()),
            StoreError::LawyerNotFound(_) => Self::NotFound("Lawyer not found".to_string()),
            StoreError::SelfParent(_) => {
                Self::InvalidRequest("A reply cannot be its own parent".to_string())
            }
            StoreError::TooDeep { max } => {
                Self::InvalidRequest(format!("Replies cannot nest deeper than {max} levels"))
            }
            err @ StoreError::DuplicateId(_) => Self::internal("storing record", err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            Self::Internal { context, detail } => {
                error!(context = *context, detail = %detail, "request failed");
                // diagnostics stay out of release builds
                cfg!(debug_assertions).then(|| detail.clone())
            }
            _ => None,
        };
        let body = ErrorBody {
            success: false,
            message: self.to_string(),
            error: detail,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StoreError::TopicNotFound("1".into()), StatusCode::NOT_FOUND, "Topic not found")]
    #[case(
        StoreError::ReplyNotFound { topic_id: "1".into(), reply_id: "r".into() },
        StatusCode::NOT_FOUND,
        "Reply not found"
    )]
    #[case(
        StoreError::ParentNotFound { topic_id: "1".into(), parent_id: "p".into() },
        StatusCode::NOT_FOUND,
        "Parent comment not found"
    )]
    #[case(StoreError::FileNotFound("2".into()), StatusCode::NOT_FOUND, "Resource file not found")]
    #[case(StoreError::SelfParent("r".into()), StatusCode::BAD_REQUEST, "A reply cannot be its own parent")]
    #[case(
        StoreError::TooDeep { max: 64 },
        StatusCode::BAD_REQUEST,
        "Replies cannot nest deeper than 64 levels"
    )]
    #[case(StoreError::DuplicateId("r".into()), StatusCode::INTERNAL_SERVER_ERROR, "Server error storing record")]
    fn store_errors_map_to_client_errors(
        #[case] err: StoreError,
        #[case] status: StatusCode,
        #[case] message: &str,
    ) {
        let api: ApiError = err.into();
        assert_eq!(api.status(), status);
        assert_eq!(api.to_string(), message);
    }

    #[tokio::test]
    async fn internal_error_carries_detail_in_debug_builds() {
        let response = ApiError::internal("creating topic", "lock poisoned").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: ErrorBody = serde_json::from_slice(&bytes).expect("json");
        assert!(!body.success);
        assert_eq!(body.message, "Server error creating topic");
        assert_eq!(body.error.is_some(), cfg!(debug_assertions));
    }
}
