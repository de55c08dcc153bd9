//! Database migrations.
//!
//! One migration per table, named m{YYYYMMDD}_{NNNNNN}_{description}.
//! Sections come before resources because of the foreign key.

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users_table;
mod m20250101_000002_create_sections_table;
mod m20250101_000003_create_resources_table;
mod m20250101_000004_create_alliances_table;
mod m20250101_000005_create_documents_table;
mod m20250101_000006_create_search_logs_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users_table::Migration),
            Box::new(m20250101_000002_create_sections_table::Migration),
            Box::new(m20250101_000003_create_resources_table::Migration),
            Box::new(m20250101_000004_create_alliances_table::Migration),
            Box::new(m20250101_000005_create_documents_table::Migration),
            Box::new(m20250101_000006_create_search_logs_table::Migration),
        ]
    }
}
