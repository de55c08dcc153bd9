//! Migration: Create search_logs table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SearchLogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(SearchLogs::Term).string().not_null())
                    .col(ColumnDef::new(SearchLogs::NormalizedTerm).string().not_null())
                    .col(ColumnDef::new(SearchLogs::UserRole).string_len(16).null())
                    .col(
                        ColumnDef::new(SearchLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_search_logs_created_at")
                    .table(SearchLogs::Table)
                    .col(SearchLogs::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SearchLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SearchLogs {
    Table,
    Id,
    Term,
    NormalizedTerm,
    UserRole,
    CreatedAt,
}
