use std::sync::Arc;

use crate::storage::{HistoryStore, StorageConfig};

#[derive(Clone)]
pub struct AppState {
    pub history: Arc<HistoryStore>,
    pub cors_origin: String,
}

impl AppState {
    pub fn new(storage: StorageConfig, cors_origin: impl Into<String>) -> Self {
        Self {
            history: Arc::new(HistoryStore::new(storage)),
            cors_origin: cors_origin.into(),
        }
    }
}
