//! Application state shared by every handler.

use std::sync::Arc;

use crate::config::PortalConfig;
use crate::infra::Database;
use crate::service::Services;

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub database: Database,
    pub config: Arc<PortalConfig>,
}

impl AppState {
    pub fn new(services: Services, database: Database, config: PortalConfig) -> Self {
        Self {
            services: Arc::new(services),
            database,
            config: Arc::new(config),
        }
    }
}
