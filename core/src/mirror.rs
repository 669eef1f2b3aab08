use crate::models::{Priority, Task};

/// Client-held copy of the remote task collection.
///
/// Order is significant: newly created tasks go to the front and in-place
/// updates keep their position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskMirror {
    tasks: Vec<Task>,
}

impl TaskMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Drop everything and take the server's collection as-is
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn prepend(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Removing an id that is not present is a no-op
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Swap in the server's representation of a task
    pub fn replace(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    /// Field-level patch, leaves every other field untouched
    pub fn patch_priority(&mut self, id: &str, priority: Priority) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.priority = priority;
                true
            }
            None => false,
        }
    }
}
