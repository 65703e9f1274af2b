//! Stream repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set, sea_query::OnConflict};

use crate::entities::{StreamEntity, stream};
use crate::models::Stream;
use crate::store::{StoreError, StoreResult, StreamStore};

/// `PostgreSQL`-backed stream store.
#[derive(Clone)]
pub struct StreamRepository {
    db: Arc<DatabaseConnection>,
}

impl StreamRepository {
    /// Create a new stream repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_stream(model: stream::Model) -> StoreResult<Stream> {
    let stream::Model {
        name, definition, ..
    } = model;
    serde_json::from_value(definition)
        .map_err(|e| StoreError::Internal(format!("Corrupt definition for stream {name}: {e}")))
}

#[async_trait]
impl StreamStore for StreamRepository {
    async fn upsert(&self, stream: Stream) -> StoreResult<()> {
        let definition =
            serde_json::to_value(&stream).map_err(|e| StoreError::InvalidInput(e.to_string()))?;
        let now = Utc::now().fixed_offset();

        let model = stream::ActiveModel {
            name: Set(stream.name),
            owner: Set(stream.owner),
            definition: Set(definition),
            created_at: Set(now),
            updated_at: Set(now),
        };

        StreamEntity::insert(model)
            .on_conflict(
                OnConflict::column(stream::Column::Name)
                    .update_columns([
                        stream::Column::Owner,
                        stream::Column::Definition,
                        stream::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn get(&self, name: &str) -> StoreResult<Option<Stream>> {
        StreamEntity::find_by_id(name)
            .one(self.db.as_ref())
            .await?
            .map(to_stream)
            .transpose()
    }

    async fn list_all(&self) -> StoreResult<Vec<Stream>> {
        StreamEntity::find()
            .order_by_asc(stream::Column::Name)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(to_stream)
            .collect()
    }

    async fn delete(&self, name: &str) -> StoreResult<()> {
        let result = StreamEntity::delete_by_id(name)
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(format!("Stream not found: {name}")));
        }
        Ok(())
    }
}
