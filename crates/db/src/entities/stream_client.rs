//! Stream client (producer / consumer) entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stream_client")]
pub struct Model {
    /// `producer` or `consumer`
    #[sea_orm(primary_key, auto_increment = false)]
    pub kind: String,

    #[sea_orm(primary_key, auto_increment = false)]
    pub stream_name: String,

    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,

    /// Full client record as JSON
    #[sea_orm(column_type = "JsonBinary")]
    pub definition: Json,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stream::Entity",
        from = "Column::StreamName",
        to = "super::stream::Column::Name",
        on_delete = "Cascade"
    )]
    Stream,
}

impl Related<super::stream::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stream.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
