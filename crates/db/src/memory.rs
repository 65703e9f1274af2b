//! In-memory stores for local development and tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{ClientKind, Stream, StreamClient};
use crate::store::{StoreError, StoreResult, StreamClientStore, StreamStore};

type ClientMap = Arc<RwLock<BTreeMap<(String, String), StreamClient>>>;

/// In-memory stream store. Lists come back in name order.
///
/// Deleting a stream also drops its entries from every attached client store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStreamStore {
    streams: Arc<RwLock<BTreeMap<String, Stream>>>,
    client_maps: Vec<ClientMap>,
}

impl MemoryStreamStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose deletes cascade to `clients`.
    #[must_use]
    pub fn with_clients(clients: &[&MemoryStreamClientStore]) -> Self {
        Self {
            streams: Arc::default(),
            client_maps: clients.iter().map(|c| Arc::clone(&c.clients)).collect(),
        }
    }
}

#[async_trait]
impl StreamStore for MemoryStreamStore {
    async fn upsert(&self, stream: Stream) -> StoreResult<()> {
        if stream.name.is_empty() {
            return Err(StoreError::InvalidInput(
                "Stream name is required".to_string(),
            ));
        }
        self.streams
            .write()
            .await
            .insert(stream.name.clone(), stream);
        Ok(())
    }

    async fn get(&self, name: &str) -> StoreResult<Option<Stream>> {
        Ok(self.streams.read().await.get(name).cloned())
    }

    async fn list_all(&self) -> StoreResult<Vec<Stream>> {
        Ok(self.streams.read().await.values().cloned().collect())
    }

    async fn delete(&self, name: &str) -> StoreResult<()> {
        self.streams
            .write()
            .await
            .remove(name)
            .ok_or_else(|| StoreError::NotFound(format!("Stream not found: {name}")))?;

        for clients in &self.client_maps {
            clients.write().await.retain(|(stream, _), _| stream != name);
        }
        Ok(())
    }
}

/// In-memory store for one kind of stream client.
#[derive(Clone, Debug)]
pub struct MemoryStreamClientStore {
    kind: ClientKind,
    clients: ClientMap,
}

impl MemoryStreamClientStore {
    /// Creates an empty store for `kind`.
    #[must_use]
    pub fn new(kind: ClientKind) -> Self {
        Self {
            kind,
            clients: Arc::default(),
        }
    }
}

#[async_trait]
impl StreamClientStore for MemoryStreamClientStore {
    async fn upsert(&self, client: StreamClient) -> StoreResult<()> {
        if client.name.is_empty() || client.stream_name.is_empty() {
            return Err(StoreError::InvalidInput(
                "Client and stream names are required".to_string(),
            ));
        }
        let key = (client.stream_name.clone(), client.name.clone());
        self.clients.write().await.insert(key, client);
        Ok(())
    }

    async fn get(&self, stream_name: &str, name: &str) -> StoreResult<Option<StreamClient>> {
        let key = (stream_name.to_string(), name.to_string());
        Ok(self.clients.read().await.get(&key).cloned())
    }

    async fn list_by_stream(&self, stream_name: &str) -> StoreResult<Vec<StreamClient>> {
        Ok(self
            .clients
            .read()
            .await
            .iter()
            .filter(|((stream, _), _)| stream == stream_name)
            .map(|(_, client)| client.clone())
            .collect())
    }

    async fn delete(&self, stream_name: &str, name: &str) -> StoreResult<()> {
        let key = (stream_name.to_string(), name.to_string());
        self.clients
            .write()
            .await
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("{} not found: {name}", self.kind.label())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_and_get() {
        let store = MemoryStreamStore::new();
        let mut stream = Stream::named("orders");
        stream.owner = Some("team-a".to_string());

        store.upsert(stream.clone()).await.unwrap();
        let result = store.get("orders").await.unwrap();

        assert_eq!(result, Some(stream));
    }

    #[tokio::test]
    async fn test_upsert_replaces_whole_record() {
        let store = MemoryStreamStore::new();
        let mut first = Stream::named("orders");
        first.owner = Some("team-a".to_string());
        first.partitions = Some(6);
        store.upsert(first).await.unwrap();

        let second = Stream::named("orders");
        store.upsert(second.clone()).await.unwrap();

        assert_eq!(store.get("orders").await.unwrap(), Some(second));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_empty_name_is_invalid() {
        let store = MemoryStreamStore::new();
        let result = store.upsert(Stream::default()).await;

        assert!(matches!(result, Err(StoreError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_list_all_in_name_order() {
        let store = MemoryStreamStore::new();
        for name in ["charlie", "alpha", "bravo"] {
            store.upsert(Stream::named(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(names, ["alpha", "bravo", "charlie"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStreamStore::new();
        store.upsert(Stream::named("orders")).await.unwrap();

        store.delete("orders").await.unwrap();

        assert_eq!(store.get("orders").await.unwrap(), None);
        assert_eq!(
            store.delete("orders").await,
            Err(StoreError::NotFound("Stream not found: orders".to_string()))
        );
    }

    #[tokio::test]
    async fn test_clients_scoped_by_stream() {
        let store = MemoryStreamClientStore::new(ClientKind::Producer);
        store
            .upsert(StreamClient::named("orders", "billing"))
            .await
            .unwrap();
        store
            .upsert(StreamClient::named("orders", "audit"))
            .await
            .unwrap();
        store
            .upsert(StreamClient::named("payments", "billing"))
            .await
            .unwrap();

        let names: Vec<String> = store
            .list_by_stream("orders")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["audit", "billing"]);

        assert!(store.get("payments", "audit").await.unwrap().is_none());
        store.delete("orders", "audit").await.unwrap();
        assert_eq!(
            store.delete("orders", "audit").await,
            Err(StoreError::NotFound("Producer not found: audit".to_string()))
        );
    }

    #[tokio::test]
    async fn test_delete_cascades_to_attached_clients() {
        let producers = MemoryStreamClientStore::new(ClientKind::Producer);
        let consumers = MemoryStreamClientStore::new(ClientKind::Consumer);
        let store = MemoryStreamStore::with_clients(&[&producers, &consumers]);
        store.upsert(Stream::named("orders")).await.unwrap();
        producers
            .upsert(StreamClient::named("orders", "billing"))
            .await
            .unwrap();
        consumers
            .upsert(StreamClient::named("orders", "audit"))
            .await
            .unwrap();
        consumers
            .upsert(StreamClient::named("payments", "audit"))
            .await
            .unwrap();

        store.delete("orders").await.unwrap();

        assert!(producers.list_by_stream("orders").await.unwrap().is_empty());
        assert!(consumers.list_by_stream("orders").await.unwrap().is_empty());
        assert!(consumers.get("payments", "audit").await.unwrap().is_some());
    }
}
