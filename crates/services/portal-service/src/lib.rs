//! Scala Learning portal library
//!
//! REST backend for the portal: accounts and role gates, alliances,
//! sections, resources, documents and public keyword search.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod infra;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use domain::CreateUser;

use crate::config::PortalConfig;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::routes::create_router;
use crate::service::{Repositories, Services, UserManager, UserService};
use crate::state::AppState;

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run the HTTP server; migrations are applied on startup.
pub async fn run_server(config: PortalConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;

    let repos = Repositories::from_connection(db.get_connection());
    let services = Services::from_repositories(repos, config.jwt.clone());

    let addr: SocketAddr = config.server.addr().parse()?;
    let state = AppState::new(services, db, config);
    let app = create_router(state);

    info!("Portal listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &PortalConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Create an administrator account.
///
/// User creation is otherwise admin-gated, so the first admin comes from here.
pub async fn create_admin(
    config: &PortalConfig,
    name: String,
    email: String,
    password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let users = UserManager::new(Arc::new(UserStore::new(db.get_connection())));

    let admin = users
        .create_user(CreateUser {
            name,
            email,
            password: Some(password),
            role: None,
            is_admin: true,
        })
        .await?;

    info!(user_id = %admin.id, email = %admin.email, "Administrator created");
    Ok(())
}
