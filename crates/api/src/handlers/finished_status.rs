use std::collections::BTreeMap;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::AppState;
use crate::ApiError;

#[derive(Debug, Deserialize)]
pub struct SetFinishedDto {
    pub name: Option<String>,
    pub finished: Option<bool>,
}

/// `name → finished` for every worker that has a flag.
pub async fn get_all(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, bool>>, ApiError> {
    let statuses = state
        .store
        .finished_statuses()
        .await
        .map_err(ApiError::storage("Failed to fetch finished status"))?;
    Ok(Json(statuses))
}

pub async fn set(
    State(state): State<AppState>,
    payload: Result<Json<SetFinishedDto>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;

    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("name is required".into()))?;
    let finished = payload
        .finished
        .ok_or_else(|| ApiError::Validation("finished must be true or false".into()))?;

    state
        .store
        .set_finished(&name, finished)
        .await
        .map_err(ApiError::storage("Failed to update finished status"))?;

    info!(worker = %name, finished, "finished status set");
    Ok(Json(json!({ "success": true })))
}
