//! Stream service: the four stream operations and their error mapping.

use std::sync::Arc;

use stream_registry_common::{AppError, AppResult, StreamOperation, Timer, get_metrics};
use stream_registry_db::models::Stream;
use stream_registry_db::{StoreError, StreamStore};
use validator::Validate;

use super::check_name;
use crate::pagination::{EntriesPage, PageRequest};

/// Checks the body against the path and the field rules.
fn check_stream(path_name: &str, stream: &Stream) -> AppResult<()> {
    check_name("Stream", &stream.name)?;
    if stream.name != path_name {
        return Err(AppError::BadRequest(format!(
            "Stream name {} does not match path {path_name}",
            stream.name
        )));
    }
    stream.validate()?;
    Ok(())
}

/// Service for managing streams.
#[derive(Clone)]
pub struct StreamService {
    stream_store: Arc<dyn StreamStore>,
}

impl StreamService {
    /// Create a new stream service.
    #[must_use]
    pub fn new(stream_store: Arc<dyn StreamStore>) -> Self {
        Self { stream_store }
    }

    /// Create or replace the stream addressed by `path_name`.
    pub async fn upsert(&self, path_name: &str, stream: Stream) -> AppResult<()> {
        let timer = Timer::start();
        let result = self.upsert_inner(path_name, stream).await;
        get_metrics().record_operation(StreamOperation::Upsert, timer.elapsed(), result.is_err());
        result
    }

    async fn upsert_inner(&self, path_name: &str, stream: Stream) -> AppResult<()> {
        check_stream(path_name, &stream).inspect_err(|e| {
            tracing::debug!(stream = %path_name, operation = "upsert", error = %e, "Rejected stream");
        })?;

        let name = stream.name.clone();
        match self.stream_store.upsert(stream).await {
            Ok(()) => Ok(()),
            Err(StoreError::InvalidInput(msg)) => {
                tracing::debug!(stream = %name, operation = "upsert", error = %msg, "Rejected stream");
                Err(AppError::BadRequest(msg))
            }
            Err(e @ (StoreError::NotFound(_) | StoreError::Internal(_))) => {
                tracing::error!(stream = %name, operation = "upsert", error = %e, "Failed to upsert stream");
                Err(AppError::Internal(format!(
                    "Error creating stream={name} ; Error={e}"
                )))
            }
        }
    }

    /// Fetch one stream by name.
    pub async fn get(&self, name: &str) -> AppResult<Stream> {
        let timer = Timer::start();
        let result = self.get_inner(name).await;
        get_metrics().record_operation(StreamOperation::Get, timer.elapsed(), result.is_err());
        result
    }

    async fn get_inner(&self, name: &str) -> AppResult<Stream> {
        match self.stream_store.get(name).await {
            Ok(Some(stream)) => Ok(stream),
            Ok(None) => Err(AppError::NotFound(format!("Stream not found: {name}"))),
            Err(e) => {
                tracing::error!(stream = %name, operation = "get", error = %e, "Failed to get stream");
                Err(AppError::Internal(
                    "Error occurred while getting data from Stream Registry".to_string(),
                ))
            }
        }
    }

    /// List one page of streams, in store order.
    pub async fn list(&self, request: PageRequest) -> AppResult<EntriesPage<Stream>> {
        let timer = Timer::start();
        let result = self.stream_store.list_all().await;
        get_metrics().record_operation(StreamOperation::List, timer.elapsed(), result.is_err());

        match result {
            Ok(streams) => Ok(request.select(streams)),
            Err(e) => {
                tracing::error!(operation = "list", error = %e, "Failed to list streams");
                Err(AppError::Internal(e.to_string()))
            }
        }
    }

    /// Delete a stream by name.
    pub async fn delete(&self, name: &str) -> AppResult<()> {
        let timer = Timer::start();
        let result = self.stream_store.delete(name).await;
        get_metrics().record_operation(StreamOperation::Delete, timer.elapsed(), result.is_err());

        match result {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound(_)) => {
                Err(AppError::NotFound(format!("Stream not found: {name}")))
            }
            Err(e @ (StoreError::InvalidInput(_) | StoreError::Internal(_))) => {
                tracing::error!(stream = %name, operation = "delete", error = %e, "Failed to delete stream");
                Err(AppError::Internal(e.to_string()))
            }
        }
    }
}
