pub mod config;
pub mod rest;
pub mod store;

use std::sync::Arc;

use config::Config;
use store::TaskStore;

/// Shared application state passed to every REST handler.
///
/// Constructed once in main and handed to the router via axum `State` —
/// never a global.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub store: Arc<TaskStore>,
    pub started_at: std::time::Instant,
}
