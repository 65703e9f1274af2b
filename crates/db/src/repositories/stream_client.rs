//! Stream client repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::OnConflict,
};

use crate::entities::{StreamClientEntity, stream_client};
use crate::models::{ClientKind, StreamClient};
use crate::store::{StoreError, StoreResult, StreamClientStore};

/// `PostgreSQL`-backed store for one kind of stream client.
///
/// Producers and consumers share the `stream_client` table, split by `kind`.
#[derive(Clone)]
pub struct StreamClientRepository {
    db: Arc<DatabaseConnection>,
    kind: ClientKind,
}

impl StreamClientRepository {
    /// Create a repository scoped to `kind`.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>, kind: ClientKind) -> Self {
        Self { db, kind }
    }

    fn key(&self, stream_name: &str, name: &str) -> (String, String, String) {
        (
            self.kind.as_str().to_string(),
            stream_name.to_string(),
            name.to_string(),
        )
    }
}

fn to_client(model: stream_client::Model) -> StoreResult<StreamClient> {
    let stream_client::Model {
        kind,
        name,
        definition,
        ..
    } = model;
    serde_json::from_value(definition)
        .map_err(|e| StoreError::Internal(format!("Corrupt definition for {kind} {name}: {e}")))
}

#[async_trait]
impl StreamClientStore for StreamClientRepository {
    async fn upsert(&self, client: StreamClient) -> StoreResult<()> {
        let definition =
            serde_json::to_value(&client).map_err(|e| StoreError::InvalidInput(e.to_string()))?;
        let now = Utc::now().fixed_offset();

        let model = stream_client::ActiveModel {
            kind: Set(self.kind.as_str().to_string()),
            stream_name: Set(client.stream_name),
            name: Set(client.name),
            definition: Set(definition),
            created_at: Set(now),
            updated_at: Set(now),
        };

        StreamClientEntity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    stream_client::Column::Kind,
                    stream_client::Column::StreamName,
                    stream_client::Column::Name,
                ])
                .update_columns([
                    stream_client::Column::Definition,
                    stream_client::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn get(&self, stream_name: &str, name: &str) -> StoreResult<Option<StreamClient>> {
        StreamClientEntity::find_by_id(self.key(stream_name, name))
            .one(self.db.as_ref())
            .await?
            .map(to_client)
            .transpose()
    }

    async fn list_by_stream(&self, stream_name: &str) -> StoreResult<Vec<StreamClient>> {
        StreamClientEntity::find()
            .filter(stream_client::Column::Kind.eq(self.kind.as_str()))
            .filter(stream_client::Column::StreamName.eq(stream_name))
            .order_by_asc(stream_client::Column::Name)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(to_client)
            .collect()
    }

    async fn delete(&self, stream_name: &str, name: &str) -> StoreResult<()> {
        let result = StreamClientEntity::delete_by_id(self.key(stream_name, name))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(format!(
                "{} not found: {name}",
                self.kind.label()
            )));
        }
        Ok(())
    }
}
