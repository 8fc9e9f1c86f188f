//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("row not found")]
    NotFound,

    /// Primary key already taken (only raised by the in-memory store; MySQL
    /// reports the same condition through [`DbError::Sqlx`]).
    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("store lock poisoned: {0}")]
    Lock(String),
}
