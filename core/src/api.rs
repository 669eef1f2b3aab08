use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{NewTask, Priority, Task};

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote task store operations.
///
/// `set_priority`, `delete` and `clear_completed` only acknowledge; their
/// response bodies carry nothing the client relies on.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<Task>>;

    async fn create(&self, input: &NewTask) -> ApiResult<Task>;

    /// Returns the full updated task, with `completed_at` stamped or cleared
    async fn set_completed(&self, id: &str, completed: bool) -> ApiResult<Task>;

    async fn set_priority(&self, id: &str, priority: Priority) -> ApiResult<()>;

    async fn delete(&self, id: &str) -> ApiResult<()>;

    async fn clear_completed(&self) -> ApiResult<()>;
}
