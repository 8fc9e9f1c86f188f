//! In-memory [`Store`] for tests and local development.
//!
//! Mirrors the MySQL semantics the API relies on: unique record ids, the two
//! list orderings, and a single-step upsert for finished flags.  Amounts are
//! stored as given; the API rounds and range-checks them to `DECIMAL(10,2)`
//! before they reach any store.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    DbError,
    models::{FinishedStatusRow, NewRecord, RecordRow},
    store::Store,
};

#[derive(Clone, Default)]
pub struct MemoryStore {
    // Insertion order doubles as the tie-break for equal timestamps.
    records: Arc<RwLock<Vec<RecordRow>>>,
    statuses: Arc<RwLock<HashMap<String, FinishedStatusRow>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> DbError {
    DbError::Lock(err.to_string())
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_records(&self) -> Result<Vec<RecordRow>, DbError> {
        let mut rows = self.records.read().map_err(poisoned)?.clone();
        rows.reverse();
        rows.sort_by_key(|row| Reverse((row.date, row.created_at)));
        Ok(rows)
    }

    async fn list_records_by_worker(&self, name: &str) -> Result<Vec<RecordRow>, DbError> {
        let mut rows: Vec<RecordRow> = self
            .records
            .read()
            .map_err(poisoned)?
            .iter()
            .filter(|row| row.name == name)
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.date, row.created_at));
        Ok(rows)
    }

    async fn create_record(&self, record: NewRecord) -> Result<RecordRow, DbError> {
        let mut records = self.records.write().map_err(poisoned)?;
        if records.iter().any(|row| row.id == record.id) {
            return Err(DbError::Duplicate(record.id));
        }
        let row = record.into_row(Utc::now());
        records.push(row.clone());
        Ok(row)
    }

    async fn update_record(&self, id: &str, record: NewRecord) -> Result<(), DbError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let row = records
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(DbError::NotFound)?;

        row.name = record.name;
        row.date = record.date;
        row.description = record.description;
        row.baki = record.baki;
        row.jama = record.jama;
        row.total = record.total;
        row.section = record.section;
        Ok(())
    }

    async fn delete_record(&self, id: &str) -> Result<bool, DbError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let before = records.len();
        records.retain(|row| row.id != id);
        Ok(records.len() != before)
    }

    async fn finished_statuses(&self) -> Result<BTreeMap<String, bool>, DbError> {
        let statuses = self.statuses.read().map_err(poisoned)?;
        Ok(statuses
            .values()
            .map(|row| (row.name.clone(), row.finished))
            .collect())
    }

    async fn set_finished(&self, name: &str, finished: bool) -> Result<(), DbError> {
        let mut statuses = self.statuses.write().map_err(poisoned)?;
        statuses.insert(
            name.to_string(),
            FinishedStatusRow {
                name: name.to_string(),
                finished,
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }
}
