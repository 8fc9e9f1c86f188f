//! `db` crate — pure persistence layer.
//!
//! Provides a MySQL connection pool, typed row structs, repository functions
//! for the `records` and `finished_status` tables, and the [`Store`] seam the
//! HTTP layer talks to.  No business logic lives here.

pub mod dates;
pub mod error;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repository;
pub mod store;

pub use error::DbError;
pub use memory::MemoryStore;
pub use models::{FinishedStatusRow, NewRecord, RecordRow, DEFAULT_SECTION};
pub use pool::DbPool;
pub use store::{MySqlStore, Store};
