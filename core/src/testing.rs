//! In-memory `TaskApi` for tests

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::api::{ApiResult, TaskApi};
use crate::error::ApiError;
use crate::models::{NewTask, Priority, Task};

#[derive(Debug, Default)]
struct FakeState {
    tasks: Vec<Task>,
    next_id: u64,
    calls: usize,
    fail_next: Option<ApiError>,
    inconsistent: bool,
}

impl FakeState {
    fn new_task(&mut self, title: &str, description: Option<String>, priority: Priority) -> Task {
        self.next_id += 1;
        Task {
            id: format!("task-{}", self.next_id),
            title: title.to_string(),
            description,
            priority,
            completed: false,
            created_at: base_time() + Duration::minutes(self.next_id as i64),
            completed_at: None,
        }
    }

    fn begin(&mut self) -> ApiResult<()> {
        self.calls += 1;
        match self.fail_next.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 16, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn not_found() -> ApiError {
    ApiError::Rejected {
        status: 404,
        message: Some("Task not found".to_string()),
    }
}

/// Shared handle; clones see the same server-side state
#[derive(Debug, Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    /// Server collection in the given order, newest first
    pub fn with_titles(titles: &[&str]) -> Self {
        let api = FakeApi::default();
        {
            let mut state = api.lock();
            for title in titles {
                let task = state.new_task(title, None, Priority::Low);
                state.tasks.push(task);
            }
        }
        api
    }

    /// Simulates a change made by another client
    pub fn push_server_side(&self, title: &str) {
        let mut state = self.lock();
        let task = state.new_task(title, None, Priority::Low);
        state.tasks.insert(0, task);
    }

    pub fn fail_next(&self, error: ApiError) {
        self.lock().fail_next = Some(error);
    }

    /// Make `set_completed` answer with `completed_at` left out
    pub fn break_completed_at(&self) {
        self.lock().inconsistent = true;
    }

    /// Number of remote calls received so far
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    pub fn server_task(&self, id: &str) -> Option<Task> {
        self.lock().tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn server_tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl TaskApi for FakeApi {
    async fn list(&self) -> ApiResult<Vec<Task>> {
        let mut state = self.lock();
        state.begin()?;
        Ok(state.tasks.clone())
    }

    async fn create(&self, input: &NewTask) -> ApiResult<Task> {
        let mut state = self.lock();
        state.begin()?;
        let description = Some(input.description.clone()).filter(|d| !d.is_empty());
        let task = state.new_task(&input.title, description, input.priority);
        state.tasks.insert(0, task.clone());
        Ok(task)
    }

    async fn set_completed(&self, id: &str, completed: bool) -> ApiResult<Task> {
        let mut state = self.lock();
        state.begin()?;
        let inconsistent = state.inconsistent;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(not_found)?;

        task.completed = completed;
        task.completed_at = (completed && !inconsistent).then(Utc::now);
        Ok(task.clone())
    }

    async fn set_priority(&self, id: &str, priority: Priority) -> ApiResult<()> {
        let mut state = self.lock();
        state.begin()?;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(not_found)?;

        task.priority = priority;
        Ok(())
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        let mut state = self.lock();
        state.begin()?;
        state.tasks.retain(|t| t.id != id);
        Ok(())
    }

    async fn clear_completed(&self) -> ApiResult<()> {
        let mut state = self.lock();
        state.begin()?;
        state.tasks.retain(|t| !t.completed);
        Ok(())
    }
}
