use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use db::{dates::parse_date, DbError, NewRecord, RecordRow, DEFAULT_SECTION};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use tracing::info;

use super::AppState;
use crate::ApiError;

// Column widths of the `records` table.
const MAX_ID_LEN: usize = 50;
const MAX_NAME_LEN: usize = 255;
const MAX_SECTION_LEN: usize = 20;

// Amount columns are DECIMAL(10,2).
const AMOUNT_SCALE: u32 = 2;
// 99999999.99, i.e. 9_999_999_999 split into 32-bit words (lo, mid) at scale 2.
const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Body of `POST /api/records` and `PUT /api/records/:id`.
///
/// Everything is optional at the serde level so that missing fields come
/// back as a 400 with a readable message instead of a generic rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RecordDto {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub baki: Option<Decimal>,
    pub jama: Option<Decimal>,
    pub total: Option<Decimal>,
    pub section: Option<String>,
}

/// Clients generate ids in the browser and some send them as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "id must be a string, got {other}"
        ))),
    }
}

/// Blank counts as missing, but a present value is kept exactly as sent.
fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::Validation(format!("{field} is required")))
}

fn within(value: &str, field: &str, max: usize) -> Result<(), ApiError> {
    if value.chars().count() > max {
        return Err(ApiError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Round the way MySQL stores into DECIMAL(10,2), rejecting what would overflow.
fn amount(value: Option<Decimal>, field: &str) -> Result<Decimal, ApiError> {
    let value = value
        .unwrap_or_default()
        .round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if value.abs() > MAX_AMOUNT {
        return Err(ApiError::Validation(format!(
            "{field} must be between -{MAX_AMOUNT} and {MAX_AMOUNT}"
        )));
    }
    Ok(value)
}

impl RecordDto {
    /// Validate and fill defaults.  `id` is the key the record will be stored
    /// (or is already stored) under; its width is checked by `create` only.
    pub fn into_new_record(self, id: String) -> Result<NewRecord, ApiError> {
        let name = required(self.name, "name")?;
        let raw_date = required(self.date, "date")?;
        let date = parse_date(raw_date.trim()).ok_or_else(|| {
            ApiError::Validation(format!("date must be YYYY-MM-DD, got '{raw_date}'"))
        })?;
        let section = self
            .section
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SECTION.to_string());

        within(&name, "name", MAX_NAME_LEN)?;
        within(&section, "section", MAX_SECTION_LEN)?;

        Ok(NewRecord {
            id,
            name,
            date,
            description: self.description,
            baki: amount(self.baki, "baki")?,
            jama: amount(self.jama, "jama")?,
            total: amount(self.total, "total")?,
            section,
        })
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|e| ApiError::Validation(e.body_text()))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<RecordRow>>, ApiError> {
    let records = state
        .store
        .list_records()
        .await
        .map_err(ApiError::storage("Failed to fetch records"))?;
    Ok(Json(records))
}

pub async fn list_by_worker(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<RecordRow>>, ApiError> {
    let records = state
        .store
        .list_records_by_worker(&name)
        .await
        .map_err(ApiError::storage("Failed to fetch worker records"))?;
    Ok(Json(records))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<RecordDto>, JsonRejection>,
) -> Result<(StatusCode, Json<RecordRow>), ApiError> {
    let mut payload = body(payload)?;
    let id = required(payload.id.take(), "id")?;
    within(&id, "id", MAX_ID_LEN)?;
    let record = payload.into_new_record(id)?;

    let created = state
        .store
        .create_record(record)
        .await
        .map_err(ApiError::storage("Failed to add record"))?;

    info!(id = %created.id, worker = %created.name, "record created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Full overwrite.  An unknown id is a 404 and nothing is written.
pub async fn update(
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<RecordDto>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let record = body(payload)?.into_new_record(id.clone())?;

    match state.store.update_record(&id, record).await {
        Ok(()) => Ok(Json(json!({ "success": true }))),
        Err(DbError::NotFound) => Err(ApiError::NotFound("Record not found")),
        Err(e) => Err(ApiError::storage("Failed to update record")(e)),
    }
}

/// Idempotent: deleting an absent id still succeeds, with `deleted: false`.
pub async fn delete(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state
        .store
        .delete_record(&id)
        .await
        .map_err(ApiError::storage("Failed to delete record"))?;

    if deleted {
        info!(%id, "record deleted");
    }
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}
