use std::sync::Arc;

use callguard_core::orchestrator::{AlertOrchestrator, AlertPorts};
use callguard_core::ports::NotificationGateway;
use callguard_db::adapters::{PgAlertStore, PgContactDirectory};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: callguard_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Alert pipeline wired to Postgres and the push gateway.
    pub orchestrator: Arc<AlertOrchestrator>,
}

impl AppState {
    /// Wire the orchestrator's storage ports to `pool` and its push port to
    /// `gateway`.
    pub fn new(
        pool: callguard_db::DbPool,
        config: ServerConfig,
        gateway: Arc<dyn NotificationGateway>,
    ) -> Self {
        let directory = Arc::new(PgContactDirectory::new(pool.clone()));
        let ports = AlertPorts {
            store: Arc::new(PgAlertStore::new(pool.clone())),
            contacts: directory.clone(),
            gateway,
            janitor: directory,
        };
        let orchestrator = AlertOrchestrator::new(config.alert_gate, ports);

        Self {
            pool,
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
        }
    }
}
