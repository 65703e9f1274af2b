//! Create stream table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stream::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stream::Name)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Stream::Owner).string_len(255).null())
                    .col(ColumnDef::new(Stream::Definition).json_binary().not_null())
                    .col(
                        ColumnDef::new(Stream::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Stream::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stream_owner")
                    .table(Stream::Table)
                    .col(Stream::Owner)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stream::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Stream {
    Table,
    Name,
    Owner,
    Definition,
    CreatedAt,
    UpdatedAt,
}
