// store/persist.rs — Best-effort JSON snapshot persistence.
//
// The snapshot file is a pretty-printed JSON array of tasks, rewritten in
// full on every save. Durability is deliberately best-effort: save errors
// are reported to the caller (which logs and moves on) and never reach a
// client, and detached saves from update/delete may finish out of order —
// the file holds *some* recent snapshot, not necessarily the latest one.
// The in-memory store stays linearizable either way.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use super::Task;

pub struct PersistenceAdapter {
    path: PathBuf,
}

impl PersistenceAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `snapshot` to the target file, creating the parent directory if
    /// needed.
    pub async fn save(&self, snapshot: &[Task]) -> Result<()> {
        let json = serde_json::to_vec_pretty(snapshot).context("serializing task snapshot")?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("creating snapshot directory '{}'", dir.display()))?;
        }

        fs::write(&self.path, json)
            .await
            .with_context(|| format!("writing snapshot '{}'", self.path.display()))?;
        Ok(())
    }

    /// Read the snapshot file. A missing, unreadable, or malformed file is
    /// not a startup failure — the store simply starts empty. Entries
    /// without an id are dropped.
    pub async fn load(&self) -> Vec<Task> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(_) => return Vec::new(),
        };

        let records: Vec<Task> = match serde_json::from_slice(&data) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    file = %self.path.display(),
                    error = %err,
                    "snapshot file is malformed; starting empty"
                );
                return Vec::new();
            }
        };

        records.into_iter().filter(|t| !t.id.is_empty()).collect()
    }
}
