//! Per-worker finished flag operations.

use std::collections::BTreeMap;

use sqlx::MySqlPool;
use tracing::debug;

use crate::{DbError, models::FinishedStatusRow};

/// Return every status row.
pub async fn list_statuses(pool: &MySqlPool) -> Result<Vec<FinishedStatusRow>, DbError> {
    let rows = sqlx::query_as::<_, FinishedStatusRow>(
        "SELECT name, finished, updated_at FROM finished_status",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Flatten all status rows into a `name → finished` map.
pub async fn status_map(pool: &MySqlPool) -> Result<BTreeMap<String, bool>, DbError> {
    let rows = list_statuses(pool).await?;
    Ok(rows.into_iter().map(|row| (row.name, row.finished)).collect())
}

/// Insert or overwrite the flag for `name` in a single statement.
///
/// `updated_at` is refreshed on both paths.
pub async fn set_status(pool: &MySqlPool, name: &str, finished: bool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO finished_status (name, finished)
        VALUES (?, ?)
        ON DUPLICATE KEY UPDATE finished = ?, updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(name)
    .bind(finished)
    .bind(finished)
    .execute(pool)
    .await?;

    debug!(worker = name, finished, "upserted finished status");
    Ok(())
}
