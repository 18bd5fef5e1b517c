use std::sync::Arc;

use sea_orm::{Database, DatabaseConnection};

use crate::config::AppConfig;
use crate::error::OpError;
use crate::events::{EventSink, TracingSink};
use crate::storage::{MediaStorage, S3MediaStorage};
use crate::vendor::{AvatarVendor, HttpVendor};

/// Explicitly constructed client handles, built once at startup and injected
/// into every handler. Handlers never reach for globals or re-read the
/// environment; tests build a context with substituted doubles.
pub struct AppContext {
    pub db: DatabaseConnection,
    pub vendor: Arc<dyn AvatarVendor>,
    pub storage: Arc<dyn MediaStorage>,
    pub events: Arc<dyn EventSink>,
}

impl AppContext {
    pub async fn init(config: &AppConfig) -> Result<Self, OpError> {
        let db = Database::connect(&config.database_url)
            .await
            .map_err(|err| OpError::Database(format!("failed to connect to database: {err}")))?;

        Ok(Self {
            db,
            vendor: Arc::new(HttpVendor::new(config)),
            storage: Arc::new(S3MediaStorage::new(config)),
            events: Arc::new(TracingSink),
        })
    }
}
