//! Create stream_client table (producers and consumers).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StreamClient::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StreamClient::Kind).string_len(16).not_null())
                    .col(
                        ColumnDef::new(StreamClient::StreamName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(StreamClient::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(StreamClient::Definition)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StreamClient::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StreamClient::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_stream_client")
                            .col(StreamClient::Kind)
                            .col(StreamClient::StreamName)
                            .col(StreamClient::Name),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stream_client_stream")
                            .from(StreamClient::Table, StreamClient::StreamName)
                            .to(Stream::Table, Stream::Name)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stream_client_stream_name")
                    .table(StreamClient::Table)
                    .col(StreamClient::StreamName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StreamClient::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum StreamClient {
    Table,
    Kind,
    StreamName,
    Name,
    Definition,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Stream {
    Table,
    Name,
}
