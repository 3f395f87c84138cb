pub mod cli;
pub mod config;
pub mod rest;
pub mod storage;
pub mod tasks;

use std::sync::Arc;

use config::DaemonConfig;
use tasks::TaskStorage;

/// Shared application state passed to every REST handler.
///
/// Constructed once at server startup and injected into the router via
/// `with_state`. There is no framework-managed container: anything a handler
/// needs arrives through this struct.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<DaemonConfig>,
    /// Task table storage, sharing the daemon's SQLite pool.
    pub tasks: Arc<TaskStorage>,
    pub started_at: std::time::Instant,
}
