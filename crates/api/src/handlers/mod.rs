//! Route handlers, grouped by resource.

use std::sync::Arc;

use db::Store;

pub mod finished_status;
pub mod health;
pub mod records;

/// Process-scoped resources injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}
