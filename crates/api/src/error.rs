//! Mapping from handler failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input; the message is shown to the client.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(&'static str),

    /// Persistence failure.  Only `context` reaches the client; `source` is
    /// logged.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: db::DbError,
    },
}

impl ApiError {
    /// `map_err` adapter attaching the client-facing message to a storage error.
    pub fn storage(context: &'static str) -> impl FnOnce(db::DbError) -> Self {
        move |source| Self::Storage { context, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, (*msg).to_string()),
            Self::Storage { context, source } => {
                error!(error = %source, "{context}");
                (StatusCode::INTERNAL_SERVER_ERROR, (*context).to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
