//! Storage layer for the stream registry.

pub mod entities;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use stream_registry_common::AppError;
use stream_registry_common::config::DatabaseConfig;
use tracing::log::LevelFilter;

use memory::{MemoryStreamClientStore, MemoryStreamStore};
use models::ClientKind;
use repositories::{StreamClientRepository, StreamRepository};
pub use store::{StoreError, StoreResult, StreamClientStore, StreamStore};

/// Initialize database connection.
pub async fn init(config: &DatabaseConfig) -> Result<DatabaseConnection, AppError> {
    let mut opt = ConnectOptions::new(&config.url);

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(opt)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Run pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), AppError> {
    use sea_orm_migration::MigratorTrait;
    migrations::Migrator::up(db, None)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// The stores a running registry works against.
#[derive(Clone)]
pub struct Stores {
    /// Stream store.
    pub streams: Arc<dyn StreamStore>,
    /// Producer store.
    pub producers: Arc<dyn StreamClientStore>,
    /// Consumer store.
    pub consumers: Arc<dyn StreamClientStore>,
}

impl Stores {
    /// Empty in-memory stores. Stream deletes cascade to both client stores.
    #[must_use]
    pub fn in_memory() -> Self {
        let producers = MemoryStreamClientStore::new(ClientKind::Producer);
        let consumers = MemoryStreamClientStore::new(ClientKind::Consumer);
        Self {
            streams: Arc::new(MemoryStreamStore::with_clients(&[&producers, &consumers])),
            producers: Arc::new(producers),
            consumers: Arc::new(consumers),
        }
    }

    /// Stores backed by a `PostgreSQL` connection.
    #[must_use]
    pub fn postgres(db: Arc<DatabaseConnection>) -> Self {
        Self {
            streams: Arc::new(StreamRepository::new(Arc::clone(&db))),
            producers: Arc::new(StreamClientRepository::new(
                Arc::clone(&db),
                ClientKind::Producer,
            )),
            consumers: Arc::new(StreamClientRepository::new(db, ClientKind::Consumer)),
        }
    }

    /// The client store for `kind`.
    #[must_use]
    pub fn clients(&self, kind: ClientKind) -> Arc<dyn StreamClientStore> {
        match kind {
            ClientKind::Producer => Arc::clone(&self.producers),
            ClientKind::Consumer => Arc::clone(&self.consumers),
        }
    }
}
