//! Storage contracts for streams and stream clients.

use async_trait::async_trait;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::models::{Stream, StreamClient};

/// Store result type.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure kinds a store may report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The record is malformed or breaks a store rule.
    #[error("{0}")]
    InvalidInput(String),

    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Anything else.
    #[error("{0}")]
    Internal(String),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(
                SqlErr::UniqueConstraintViolation(msg)
                | SqlErr::ForeignKeyConstraintViolation(msg),
            ) => Self::InvalidInput(msg),
            _ => Self::Internal(err.to_string()),
        }
    }
}

/// Key-value store of streams keyed by name.
#[async_trait]
pub trait StreamStore: Send + Sync {
    /// Create the stream, or replace the stored record with the same name.
    async fn upsert(&self, stream: Stream) -> StoreResult<()>;

    /// Look a stream up by name.
    async fn get(&self, name: &str) -> StoreResult<Option<Stream>>;

    /// Every stream, in a store-defined order that is stable within a call.
    async fn list_all(&self) -> StoreResult<Vec<Stream>>;

    /// Remove a stream. Reports [`StoreError::NotFound`] if it is absent.
    async fn delete(&self, name: &str) -> StoreResult<()>;
}

/// Store of one kind of stream client (producers or consumers).
#[async_trait]
pub trait StreamClientStore: Send + Sync {
    /// Create the client, or replace the stored record.
    async fn upsert(&self, client: StreamClient) -> StoreResult<()>;

    /// Look a client up by stream and client name.
    async fn get(&self, stream_name: &str, name: &str) -> StoreResult<Option<StreamClient>>;

    /// Clients of one stream, ordered by name.
    async fn list_by_stream(&self, stream_name: &str) -> StoreResult<Vec<StreamClient>>;

    /// Remove a client. Reports [`StoreError::NotFound`] if it is absent.
    async fn delete(&self, stream_name: &str, name: &str) -> StoreResult<()>;
}
