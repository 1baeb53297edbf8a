use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use taskd::{
    config::Config,
    rest,
    store::{persist::PersistenceAdapter, TaskStore},
    AppContext,
};

#[derive(Parser)]
#[command(
    name = "taskd",
    about = "Task-tracking backend — in-memory store with JSON snapshot persistence",
    version
)]
struct Args {
    /// Path of the JSON snapshot file (default: data/tasks.json)
    #[arg(long, env = "TASKS_FILE")]
    file: Option<std::path::PathBuf>,

    /// HTTP listen port (default: 8080)
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Bind address (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "TASKD_BIND")]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TASKD_LOG")]
    log: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Arc::new(Config::new(args.file, args.port, args.bind, args.log));

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .compact()
        .init();

    let store = Arc::new(TaskStore::new(PersistenceAdapter::new(&config.tasks_file)));
    store.load().await;
    info!(file = %config.tasks_file.display(), "task snapshot file");

    let ctx = Arc::new(AppContext {
        config,
        store,
        started_at: std::time::Instant::now(),
    });

    rest::start_rest_server(ctx).await
}
