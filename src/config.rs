// config.rs — Runtime configuration, read once at process start.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TASKS_FILE: &str = "data/tasks.json";

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON snapshot file.
    pub tasks_file: PathBuf,
    /// HTTP listen port.
    pub port: u16,
    /// Bind address (127.0.0.1 by default; 0.0.0.0 for LAN access).
    pub bind_address: String,
    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Config {
    pub fn new(
        tasks_file: Option<PathBuf>,
        port: Option<u16>,
        bind_address: Option<String>,
        log_level: Option<String>,
    ) -> Self {
        Self {
            tasks_file: tasks_file.unwrap_or_else(|| PathBuf::from(DEFAULT_TASKS_FILE)),
            port: port.unwrap_or(DEFAULT_PORT),
            bind_address: bind_address.unwrap_or_else(default_bind_address),
            log_level: log_level.unwrap_or_else(|| "info".to_string()),
        }
    }
}
