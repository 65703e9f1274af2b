//! Stream entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stream")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,

    /// Owner, copied out of the definition for lookups
    #[sea_orm(nullable, indexed)]
    pub owner: Option<String>,

    /// Full stream record as JSON
    #[sea_orm(column_type = "JsonBinary")]
    pub definition: Json,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stream_client::Entity")]
    StreamClient,
}

impl Related<super::stream_client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StreamClient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
