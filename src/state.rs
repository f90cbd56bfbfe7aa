use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::sync::OnceCell;

use crate::config::Config;
use crate::error::AppResult;
use crate::repositories::ensure_schema;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// SeaORM connection pool. Handlers go through [`AppState::db`] instead.
    pub pool: DatabaseConnection,
    pub config: Config,
    /// Set once the schema bootstrap has succeeded in this process
    schema_ready: Arc<OnceCell<()>>,
}

impl AppState {
    /// Create a new AppState by connecting to the database.
    /// The schema is prepared lazily by the first call to [`AppState::db`].
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let mut opt = ConnectOptions::new(&config.database_url);
        opt.max_connections(config.db_max_connections)
            .min_connections(config.db_min_connections)
            .sqlx_logging(true);

        let pool = Database::connect(opt)
            .await
            .map_err(|e| AppStateError::Database(e.to_string()))?;

        Ok(Self {
            pool,
            config,
            schema_ready: Arc::new(OnceCell::new()),
        })
    }

    /// Connection with the schema guaranteed to be in place.
    /// A failed bootstrap is retried by the next caller.
    pub async fn db(&self) -> AppResult<&DatabaseConnection> {
        self.schema_ready
            .get_or_try_init(|| ensure_schema(&self.pool))
            .await?;

        Ok(&self.pool)
    }

    pub fn schema_ready(&self) -> bool {
        self.schema_ready.initialized()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("Database connection error: {0}")]
    Database(String),
}
