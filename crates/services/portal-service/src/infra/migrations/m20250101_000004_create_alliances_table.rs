//! Migration: Create alliances table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alliances::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Alliances::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Alliances::Name).string().not_null())
                    .col(ColumnDef::new(Alliances::Siglas).string().not_null())
                    .col(ColumnDef::new(Alliances::Url).string().null())
                    .col(
                        ColumnDef::new(Alliances::Logos)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Alliances::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Alliances::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Alliances::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Alliances::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alliances::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Alliances {
    Table,
    Id,
    Name,
    Siglas,
    Url,
    Logos,
    IsActive,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
