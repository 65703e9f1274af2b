//! Producer and consumer handling beneath a stream.

use std::sync::Arc;

use stream_registry_common::{AppError, AppResult};
use stream_registry_db::models::{ClientKind, StreamClient};
use stream_registry_db::{StoreError, StreamClientStore, StreamStore};
use validator::Validate;

use super::check_name;
use crate::pagination::{EntriesPage, PageRequest};

/// Service for one kind of stream client, scoped to a single request.
///
/// Built per request from the shared stream store handle and the client
/// store for its kind. Holds no state of its own.
pub struct StreamClientService {
    stream_store: Arc<dyn StreamStore>,
    client_store: Arc<dyn StreamClientStore>,
    kind: ClientKind,
}

impl StreamClientService {
    /// Create a new stream client service.
    #[must_use]
    pub fn new(
        stream_store: Arc<dyn StreamStore>,
        client_store: Arc<dyn StreamClientStore>,
        kind: ClientKind,
    ) -> Self {
        Self {
            stream_store,
            client_store,
            kind,
        }
    }

    /// The kind of client this service manages.
    #[must_use]
    pub const fn kind(&self) -> ClientKind {
        self.kind
    }

    fn not_found(&self, name: &str) -> AppError {
        AppError::NotFound(format!("{} not found: {name}", self.kind.label()))
    }

    fn internal(&self, stream_name: &str, operation: &str, err: &StoreError) -> AppError {
        tracing::error!(
            stream = %stream_name,
            kind = %self.kind,
            operation,
            error = %err,
            "Stream client operation failed"
        );
        AppError::Internal(err.to_string())
    }

    fn check_client(
        &self,
        stream_name: &str,
        path_name: &str,
        client: &StreamClient,
    ) -> AppResult<()> {
        check_name(self.kind.label(), &client.name)?;
        if client.name != path_name {
            return Err(AppError::BadRequest(format!(
                "{} name {} does not match path {path_name}",
                self.kind.label(),
                client.name
            )));
        }
        if client.stream_name != stream_name {
            return Err(AppError::BadRequest(format!(
                "Stream name {} does not match path {stream_name}",
                client.stream_name
            )));
        }
        client.validate()?;
        Ok(())
    }

    async fn require_stream(&self, stream_name: &str) -> AppResult<()> {
        match self.stream_store.get(stream_name).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(AppError::NotFound(format!(
                "Stream not found: {stream_name}"
            ))),
            Err(e) => Err(self.internal(stream_name, "get_stream", &e)),
        }
    }

    /// List one page of the stream's clients.
    pub async fn list(
        &self,
        stream_name: &str,
        request: PageRequest,
    ) -> AppResult<EntriesPage<StreamClient>> {
        self.require_stream(stream_name).await?;

        self.client_store
            .list_by_stream(stream_name)
            .await
            .map(|clients| request.select(clients))
            .map_err(|e| self.internal(stream_name, "list", &e))
    }

    /// Fetch one client.
    pub async fn get(&self, stream_name: &str, name: &str) -> AppResult<StreamClient> {
        self.require_stream(stream_name).await?;

        match self.client_store.get(stream_name, name).await {
            Ok(Some(client)) => Ok(client),
            Ok(None) => Err(self.not_found(name)),
            Err(e) => Err(self.internal(stream_name, "get", &e)),
        }
    }

    /// Create or replace the client addressed by `path_name`.
    ///
    /// An empty `streamName` in the body is taken from the path.
    pub async fn upsert(
        &self,
        stream_name: &str,
        path_name: &str,
        mut client: StreamClient,
    ) -> AppResult<()> {
        if client.stream_name.is_empty() {
            client.stream_name = stream_name.to_string();
        }
        self.check_client(stream_name, path_name, &client)
            .inspect_err(|e| {
                tracing::debug!(
                    stream = %stream_name,
                    kind = %self.kind,
                    operation = "upsert",
                    error = %e,
                    "Rejected stream client"
                );
            })?;

        self.require_stream(stream_name).await?;

        match self.client_store.upsert(client).await {
            Ok(()) => Ok(()),
            Err(StoreError::InvalidInput(msg)) => {
                tracing::debug!(stream = %stream_name, kind = %self.kind, error = %msg, "Rejected stream client");
                Err(AppError::BadRequest(msg))
            }
            Err(e @ (StoreError::NotFound(_) | StoreError::Internal(_))) => {
                Err(self.internal(stream_name, "upsert", &e))
            }
        }
    }

    /// Delete one client.
    pub async fn delete(&self, stream_name: &str, name: &str) -> AppResult<()> {
        self.require_stream(stream_name).await?;

        match self.client_store.delete(stream_name, name).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound(_)) => Err(self.not_found(name)),
            Err(e @ (StoreError::InvalidInput(_) | StoreError::Internal(_))) => {
                Err(self.internal(stream_name, "delete", &e))
            }
        }
    }
}
