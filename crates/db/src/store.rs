//! The storage seam the HTTP layer depends on.
//!
//! Handlers hold an `Arc<dyn Store>` so the same router runs against MySQL
//! in production and against [`crate::MemoryStore`] in tests and local
//! development.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{
    DbError, DbPool,
    models::{NewRecord, RecordRow},
    repository::{finished_status as status_repo, records as record_repo},
};

#[async_trait]
pub trait Store: Send + Sync {
    /// All records, date descending.
    async fn list_records(&self) -> Result<Vec<RecordRow>, DbError>;

    /// One worker's records, date ascending.
    async fn list_records_by_worker(&self, name: &str) -> Result<Vec<RecordRow>, DbError>;

    /// Insert and return the stored row.
    async fn create_record(&self, record: NewRecord) -> Result<RecordRow, DbError>;

    /// Full overwrite; `DbError::NotFound` when `id` is unknown.
    async fn update_record(&self, id: &str, record: NewRecord) -> Result<(), DbError>;

    /// Returns whether a row was removed.
    async fn delete_record(&self, id: &str) -> Result<bool, DbError>;

    async fn finished_statuses(&self) -> Result<BTreeMap<String, bool>, DbError>;

    /// Atomic insert-or-update keyed by `name`.
    async fn set_finished(&self, name: &str, finished: bool) -> Result<(), DbError>;
}

/// [`Store`] backed by the MySQL repository functions.
#[derive(Clone)]
pub struct MySqlStore {
    pool: DbPool,
}

impl MySqlStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for MySqlStore {
    async fn list_records(&self) -> Result<Vec<RecordRow>, DbError> {
        record_repo::list_records(&self.pool).await
    }

    async fn list_records_by_worker(&self, name: &str) -> Result<Vec<RecordRow>, DbError> {
        record_repo::list_records_by_worker(&self.pool, name).await
    }

    async fn create_record(&self, record: NewRecord) -> Result<RecordRow, DbError> {
        record_repo::create_record(&self.pool, &record).await
    }

    async fn update_record(&self, id: &str, record: NewRecord) -> Result<(), DbError> {
        record_repo::update_record(&self.pool, id, &record).await
    }

    async fn delete_record(&self, id: &str) -> Result<bool, DbError> {
        record_repo::delete_record(&self.pool, id).await
    }

    async fn finished_statuses(&self) -> Result<BTreeMap<String, bool>, DbError> {
        status_repo::status_map(&self.pool).await
    }

    async fn set_finished(&self, name: &str, finished: bool) -> Result<(), DbError> {
        status_repo::set_status(&self.pool, name, finished).await
    }
}
