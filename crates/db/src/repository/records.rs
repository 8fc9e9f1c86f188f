//! Record CRUD operations.

use sqlx::MySqlPool;
use tracing::debug;

use crate::{
    DbError,
    models::{NewRecord, RecordRow},
};

const RECORD_COLUMNS: &str = "id, name, date, description, \
     COALESCE(baki, 0) AS baki, COALESCE(jama, 0) AS jama, COALESCE(total, 0) AS total, \
     COALESCE(section, 'daily') AS section, created_at";

/// Return every record, most recent date first.
pub async fn list_records(pool: &MySqlPool) -> Result<Vec<RecordRow>, DbError> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM records ORDER BY date DESC, created_at DESC");
    let rows = sqlx::query_as::<_, RecordRow>(&sql).fetch_all(pool).await?;
    debug!(count = rows.len(), "listed records");
    Ok(rows)
}

/// Return one worker's records as a running ledger (oldest date first).
pub async fn list_records_by_worker(
    pool: &MySqlPool,
    name: &str,
) -> Result<Vec<RecordRow>, DbError> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM records WHERE name = ? ORDER BY date ASC, created_at ASC"
    );
    let rows = sqlx::query_as::<_, RecordRow>(&sql)
        .bind(name)
        .fetch_all(pool)
        .await?;
    debug!(worker = name, count = rows.len(), "listed worker records");
    Ok(rows)
}

/// Fetch a single record by its primary key.
pub async fn get_record(pool: &MySqlPool, id: &str) -> Result<RecordRow, DbError> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM records WHERE id = ?");
    sqlx::query_as::<_, RecordRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)
}

/// Insert a new record and read it back with its server-assigned `created_at`.
///
/// MySQL has no `RETURNING`, so the read-back shares the insert's transaction.
/// A duplicate `id` surfaces as [`DbError::Sqlx`].
pub async fn create_record(pool: &MySqlPool, record: &NewRecord) -> Result<RecordRow, DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO records (id, name, date, description, baki, jama, total, section)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.id)
    .bind(&record.name)
    .bind(record.date)
    .bind(&record.description)
    .bind(record.baki)
    .bind(record.jama)
    .bind(record.total)
    .bind(&record.section)
    .execute(&mut *tx)
    .await?;

    let sql = format!("SELECT {RECORD_COLUMNS} FROM records WHERE id = ?");
    let row = sqlx::query_as::<_, RecordRow>(&sql)
        .bind(&record.id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    debug!(id = %row.id, "created record");
    Ok(row)
}

/// Overwrite every mutable column of the record with the given `id`.
///
/// Returns `DbError::NotFound` if no such record exists.
pub async fn update_record(
    pool: &MySqlPool,
    id: &str,
    record: &NewRecord,
) -> Result<(), DbError> {
    let result = sqlx::query(
        r#"
        UPDATE records
        SET name = ?, date = ?, description = ?, baki = ?, jama = ?, total = ?, section = ?
        WHERE id = ?
        "#,
    )
    .bind(&record.name)
    .bind(record.date)
    .bind(&record.description)
    .bind(record.baki)
    .bind(record.jama)
    .bind(record.total)
    .bind(&record.section)
    .bind(id)
    .execute(pool)
    .await?;

    // MySQL counts changed rows, not matched ones: an identical overwrite
    // reports zero, so only a missing key is an error.
    if result.rows_affected() == 0 && !record_exists(pool, id).await? {
        return Err(DbError::NotFound);
    }

    debug!(id, "updated record");
    Ok(())
}

/// Delete a record by its primary key.
///
/// Returns whether a row was actually removed.
pub async fn delete_record(pool: &MySqlPool, id: &str) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM records WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    let deleted = result.rows_affected() > 0;
    debug!(id, deleted, "deleted record");
    Ok(deleted)
}

async fn record_exists(pool: &MySqlPool, id: &str) -> Result<bool, DbError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM records WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}
