#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

pub mod api;
pub mod error;
pub mod mirror;
pub mod models;
pub mod sync;
pub mod view;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

// Re-export commonly used types
pub use api::{ApiResult, TaskApi};
pub use error::{ApiError, SyncError};
pub use mirror::TaskMirror;
pub use models::{NewTask, ParseValueError, Priority, Task, Theme};
pub use sync::{AssumeYes, Confirm, Guarded, SyncClient, SyncResult};
pub use view::{
    derive_view, filter_tasks, EntriesPerPage, Pagination, PriorityFilter, StatusFilter,
    TaskFilter, TaskPage,
};
