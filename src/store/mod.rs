// store/mod.rs — In-memory task store.
//
// The authoritative task collection lives in a `RwLock<HashMap>`; every
// mutation holds the write lock only for the map update itself, never across
// disk I/O. `create` persists a snapshot before returning; `update`/`delete`
// launch the save as a detached task (see `persist` for the consistency
// trade-off this buys).

pub mod persist;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use persist::PersistenceAdapter;

// ─── Types ────────────────────────────────────────────────────────────────────

/// Task lifecycle status. Serialized as the exact variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    ToDo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        match s {
            "ToDo" => Ok(Self::ToDo),
            "InProgress" => Ok(Self::InProgress),
            "Done" => Ok(Self::Done),
            other => Err(StoreError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Empty means "not set"; omitted from JSON in that case.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial create/update payload. `None` means "field absent" (leave
/// unchanged on update); `Some("")` is distinct — an error for title, a
/// clearing value for description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("title is required and must not be empty")]
    MissingTitle,
    #[error("invalid status {0:?}: expected \"ToDo\", \"InProgress\" or \"Done\"")]
    InvalidStatus(String),
    #[error("task {0} not found")]
    NotFound(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

// ─── Store ────────────────────────────────────────────────────────────────────

pub struct TaskStore {
    tasks: Arc<RwLock<HashMap<String, Task>>>,
    /// Monotonic ID counter; never decremented, IDs are never reused.
    next_id: AtomicU64,
    persist: Arc<PersistenceAdapter>,
}

impl TaskStore {
    pub fn new(persist: PersistenceAdapter) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(0),
            persist: Arc::new(persist),
        }
    }

    /// Hydrate from the snapshot file, replacing the collection wholesale.
    ///
    /// The ID counter becomes the maximum numeric ID among loaded records, so
    /// future IDs never collide with them. Non-numeric IDs are kept as
    /// records but skipped for the counter.
    pub async fn load(&self) {
        let records = self.persist.load().await;
        if records.is_empty() {
            return;
        }

        let mut max_id = 0u64;
        let mut map = HashMap::with_capacity(records.len());
        for task in records {
            if let Ok(n) = task.id.parse::<u64>() {
                max_id = max_id.max(n);
            }
            map.insert(task.id.clone(), task);
        }

        let count = map.len();
        *self.tasks.write().await = map;
        self.next_id.store(max_id, Ordering::SeqCst);
        info!(count, next_id = max_id + 1, "hydrated task store from snapshot");
    }

    // ─── CRUD ────────────────────────────────────────────────────────────────

    /// All tasks, cloned. Iteration order is unspecified.
    pub async fn list(&self) -> Vec<Task> {
        self.tasks.read().await.values().cloned().collect()
    }

    pub async fn get(&self, id: &str) -> Option<Task> {
        self.tasks.read().await.get(id).cloned()
    }

    pub async fn create(&self, input: TaskInput) -> Result<Task, StoreError> {
        let title = match input.title {
            Some(t) if !t.is_empty() => t,
            _ => return Err(StoreError::MissingTitle),
        };
        let status = match input.status.as_deref() {
            None | Some("") => TaskStatus::ToDo,
            Some(s) => TaskStatus::parse(s)?,
        };

        let id = (self.next_id.fetch_add(1, Ordering::SeqCst) + 1).to_string();
        let now = Utc::now();
        let task = Task {
            id: id.clone(),
            title,
            description: input.description.unwrap_or_default(),
            status,
            created_at: now,
            updated_at: now,
        };

        self.tasks.write().await.insert(id, task.clone());
        info!(id = %task.id, "task created");

        // Unlike update/delete, the create save is awaited; failure is
        // logged and swallowed either way.
        self.save_now().await;

        Ok(task)
    }

    /// Apply the present fields of `input` to an existing task.
    ///
    /// Validation failures leave the record untouched.
    pub async fn update(&self, id: &str, input: TaskInput) -> Result<Task, StoreError> {
        let updated = {
            let mut tasks = self.tasks.write().await;
            let task = tasks
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

            // Validate every present field before mutating any of them.
            if matches!(input.title.as_deref(), Some("")) {
                return Err(StoreError::MissingTitle);
            }
            let status = input.status.as_deref().map(TaskStatus::parse).transpose()?;

            if let Some(title) = input.title {
                task.title = title;
            }
            if let Some(description) = input.description {
                task.description = description;
            }
            if let Some(status) = status {
                task.status = status;
            }
            task.updated_at = Utc::now();
            task.clone()
        };

        info!(id = %updated.id, "task updated");
        self.spawn_save();
        Ok(updated)
    }

    /// Remove a task. Returns false (and saves nothing) if the id is unknown.
    pub async fn delete(&self, id: &str) -> bool {
        let removed = self.tasks.write().await.remove(id).is_some();
        if removed {
            info!(id, "task deleted");
            self.spawn_save();
        }
        removed
    }

    // ─── Persistence hooks ───────────────────────────────────────────────────

    async fn save_now(&self) {
        let snapshot: Vec<Task> = self.list().await;
        if let Err(err) = self.persist.save(&snapshot).await {
            warn!(error = %err, "snapshot save failed; continuing from memory");
        }
    }

    /// Fire-and-forget snapshot save. Concurrent saves are intentionally not
    /// serialized against each other: the file reflects *some* recent
    /// snapshot, which keeps update/delete latency independent of the disk.
    fn spawn_save(&self) {
        let tasks = Arc::clone(&self.tasks);
        let persist = Arc::clone(&self.persist);
        tokio::spawn(async move {
            let snapshot: Vec<Task> = tasks.read().await.values().cloned().collect();
            if let Err(err) = persist.save(&snapshot).await {
                warn!(error = %err, "background snapshot save failed");
            }
        });
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
