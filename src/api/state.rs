use std::sync::Arc;

use crate::config::Config;
use crate::services::{MovieNightService, ShareCodeIssuer};
use crate::store::{Catalog, MemoryCatalog, MemoryStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub nights: Arc<MovieNightService>,
    pub catalog: Arc<dyn Catalog>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates state with default configuration and the seeded catalog
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates state from configuration
    pub fn with_config(config: &Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        let catalog: Arc<dyn Catalog> = Arc::new(MemoryCatalog::with_defaults());
        let issuer = ShareCodeIssuer::new(config.share_code_length, config.share_code_max_attempts);
        let nights = Arc::new(MovieNightService::new(store, catalog.clone(), issuer));

        Self { nights, catalog }
    }
}
