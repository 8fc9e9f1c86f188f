//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models — they carry no behaviour.  Amounts are
//! passed through verbatim: nothing here relates `total` to `baki`/`jama`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Section tag applied when the client does not send one.
pub const DEFAULT_SECTION: &str = "daily";

// ---------------------------------------------------------------------------
// records
// ---------------------------------------------------------------------------

/// A persisted payment record row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecordRow {
    pub id: String,
    pub name: String,
    #[serde(with = "crate::dates::ymd")]
    pub date: NaiveDate,
    pub description: Option<String>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub baki: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub jama: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total: Decimal,
    pub section: String,
    pub created_at: DateTime<Utc>,
}

/// Every column of `records` the client controls.
///
/// Used for both insert and full-overwrite update; the `id` is ignored by
/// update, which takes the key separately.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub baki: Decimal,
    pub jama: Decimal,
    pub total: Decimal,
    pub section: String,
}

impl NewRecord {
    /// Materialise the row as the store will hand it back.
    pub fn into_row(self, created_at: DateTime<Utc>) -> RecordRow {
        RecordRow {
            id: self.id,
            name: self.name,
            date: self.date,
            description: self.description,
            baki: self.baki,
            jama: self.jama,
            total: self.total,
            section: self.section,
            created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// finished_status
// ---------------------------------------------------------------------------

/// A persisted per-worker completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FinishedStatusRow {
    pub name: String,
    pub finished: bool,
    pub updated_at: DateTime<Utc>,
}
