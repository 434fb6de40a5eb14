//! Shared application state handed to the route builders.

use database::postgres::DatabaseConnection;
use domain_embeddings::{EmbeddingClient, EmbeddingUpdater};
use std::sync::Arc;

/// Cloned into each router; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
    /// Remote model client, or the zero-vector stand-in when `ML_ENABLE=false`
    pub embeddings: Arc<dyn EmbeddingClient>,
    pub updater: EmbeddingUpdater,
}

impl AppState {
    pub fn new(
        config: crate::config::Config,
        db: DatabaseConnection,
        embeddings: Arc<dyn EmbeddingClient>,
    ) -> Self {
        let updater = EmbeddingUpdater::new(Arc::clone(&embeddings));
        Self {
            config,
            db,
            embeddings,
            updater,
        }
    }
}
