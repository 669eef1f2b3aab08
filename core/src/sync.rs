use tracing::{debug, warn};

use crate::api::TaskApi;
use crate::error::{ApiError, SyncError};
use crate::mirror::TaskMirror;
use crate::models::{NewTask, Priority, Task};

const LOAD_FAILED: &str = "Failed to load tasks";
const CREATE_FAILED: &str = "Action failed";
const DELETE_FAILED: &str = "Failed to delete task";
const UPDATE_FAILED: &str = "Failed to update task";
const PRIORITY_FAILED: &str = "Failed to update priority";
const CLEAR_FAILED: &str = "Failed to clear completed tasks";

pub type SyncResult<T> = Result<T, SyncError>;

/// Asks the user before a destructive action is dispatched
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Confirms every prompt, for `--yes` style invocations
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Outcome of an action that needs confirmation first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guarded {
    Done,
    Cancelled,
}

/// Maps user intents to remote calls and folds the results into the mirror.
///
/// The mirror only advances after the server acknowledged the call, so a
/// failed action never needs a rollback.
pub struct SyncClient {
    api: Box<dyn TaskApi>,
    mirror: TaskMirror,
}

impl SyncClient {
    pub fn new(api: Box<dyn TaskApi>) -> Self {
        Self {
            api,
            mirror: TaskMirror::new(),
        }
    }

    pub fn mirror(&self) -> &TaskMirror {
        &self.mirror
    }

    pub fn tasks(&self) -> &[Task] {
        self.mirror.tasks()
    }

    /// Fetch the whole collection and replace the mirror with it.
    ///
    /// This is the only call that reports `AuthExpired`.
    pub async fn load(&mut self) -> SyncResult<()> {
        match self.api.list().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "Loaded tasks");
                self.mirror.replace_all(tasks);
                Ok(())
            }
            Err(ApiError::Unauthorized) => {
                warn!("Credential rejected while loading tasks");
                Err(SyncError::AuthExpired)
            }
            Err(e) => Err(surface(e, LOAD_FAILED)),
        }
    }

    /// Create a task and put it at the front of the mirror
    pub async fn create(&mut self, input: NewTask) -> SyncResult<Task> {
        if input.title.trim().is_empty() {
            return Err(SyncError::ValidationRejected(
                "Title is required".to_string(),
            ));
        }

        let task = self
            .api
            .create(&input)
            .await
            .map_err(|e| surface(e, CREATE_FAILED))?;

        debug!(id = %task.id, "Created task");
        self.mirror.prepend(task.clone());
        Ok(task)
    }

    pub async fn remove(&mut self, id: &str, confirm: &mut dyn Confirm) -> SyncResult<Guarded> {
        if id.is_empty() || !confirm.confirm("Delete this task?") {
            return Ok(Guarded::Cancelled);
        }

        self.api
            .delete(id)
            .await
            .map_err(|e| surface(e, DELETE_FAILED))?;

        if !self.mirror.remove(id) {
            debug!(id, "Deleted task was not in the mirror");
        }

        Ok(Guarded::Done)
    }

    /// Send the new completion state and swap in the server's copy.
    ///
    /// `completed_at` always comes from the server response.
    pub async fn set_completed(&mut self, id: &str, completed: bool) -> SyncResult<Task> {
        let task = self
            .api
            .set_completed(id, completed)
            .await
            .map_err(|e| surface(e, UPDATE_FAILED))?;

        if !task.is_consistent() {
            warn!(id = %task.id, completed = task.completed, "Server returned an inconsistent task");
            return Err(SyncError::NetworkOrServer(UPDATE_FAILED.to_string()));
        }

        if !self.mirror.replace(task.clone()) {
            debug!(id = %task.id, "Updated task was not in the mirror");
        }

        Ok(task)
    }

    /// Flip the completion state of a mirrored task
    pub async fn toggle_completed(&mut self, id: &str) -> SyncResult<Task> {
        let completed = self
            .mirror
            .get(id)
            .map(|t| t.completed)
            .ok_or_else(|| SyncError::ValidationRejected(format!("No task with id {}", id)))?;

        self.set_completed(id, !completed).await
    }

    /// The server does not echo the task here, so only `priority` is patched
    pub async fn set_priority(&mut self, id: &str, priority: Priority) -> SyncResult<()> {
        self.api
            .set_priority(id, priority)
            .await
            .map_err(|e| surface(e, PRIORITY_FAILED))?;

        self.mirror.patch_priority(id, priority);
        Ok(())
    }

    /// Delete every completed task on the server, then reload
    pub async fn clear_completed(&mut self, confirm: &mut dyn Confirm) -> SyncResult<Guarded> {
        if !confirm.confirm("Clear all completed tasks?") {
            return Ok(Guarded::Cancelled);
        }

        self.api
            .clear_completed()
            .await
            .map_err(|e| surface(e, CLEAR_FAILED))?;

        self.load().await?;
        Ok(Guarded::Done)
    }
}

/// Outside of `load`, an expired credential is just another failure message
fn surface(error: ApiError, fallback: &str) -> SyncError {
    warn!(error = %error, "Remote call failed");

    match error {
        ApiError::Rejected {
            status: 400 | 422,
            message,
        } => SyncError::ValidationRejected(message.unwrap_or_else(|| fallback.to_string())),
        ApiError::Rejected { message, .. } => {
            SyncError::NetworkOrServer(message.unwrap_or_else(|| fallback.to_string()))
        }
        ApiError::Unauthorized | ApiError::Transport(_) => {
            SyncError::NetworkOrServer(fallback.to_string())
        }
    }
}
