use std::path::PathBuf;

use taskdeck_core::{
    derive_view, AssumeYes, Confirm, EntriesPerPage, Guarded, NewTask, Pagination, Priority, SyncClient,
    SyncError, SyncResult, Task, TaskFilter, TaskPage, Theme,
};
use tracing::{info, warn};

use crate::{
    args::DashboardCommand,
    notify::Notifier,
    session::Session,
    theme::save_theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// State behind the task dashboard: mirror, filter, pagination and banners.
///
/// Every action runs to completion before the next one is accepted, so the
/// mirror has a single writer.
pub struct Dashboard {
    sync: SyncClient,
    session: Box<dyn Session>,
    filter: TaskFilter,
    pagination: Pagination,
    theme: Theme,
    theme_path: Option<PathBuf>,
    notifier: Notifier,
    message: Option<String>,
    logged_out: bool,
}

impl Dashboard {
    pub fn new(sync: SyncClient, session: Box<dyn Session>) -> Self {
        Self {
            sync,
            session,
            filter: TaskFilter::default(),
            pagination: Pagination::default(),
            theme: Theme::default(),
            theme_path: None,
            notifier: Notifier::default(),
            message: None,
            logged_out: false,
        }
    }

    pub fn with_entries_per_page(mut self, entries_per_page: EntriesPerPage) -> Self {
        self.pagination = Pagination::new(entries_per_page);
        self
    }

    /// Theme changes are written to `path`
    pub fn with_theme(mut self, theme: Theme, path: PathBuf) -> Self {
        self.theme = theme;
        self.theme_path = Some(path);
        self
    }

    pub fn view(&self) -> TaskPage<'_> {
        derive_view(self.sync.tasks(), &self.filter, &self.pagination)
    }

    pub fn tasks(&self) -> &[Task] {
        self.sync.tasks()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Inline error from the last failed action
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// True once the server rejected the credential
    pub fn is_logged_out(&self) -> bool {
        self.logged_out
    }

    pub fn notification(&self) -> Option<String> {
        self.notifier.current()
    }

    /// Reload the mirror. An expired credential ends the session.
    pub async fn refresh(&mut self) -> SyncResult<()> {
        let result = self.sync.load().await;
        self.record(result)?;
        self.clamp_page();
        Ok(())
    }

    pub async fn add(&mut self, input: NewTask) -> SyncResult<Task> {
        let result = self.sync.create(input).await;
        let task = self.record(result)?;
        self.notifier.notify("Task added successfully");
        Ok(task)
    }

    pub async fn delete(&mut self, id: &str, confirm: &mut dyn Confirm) -> SyncResult<Guarded> {
        let result = self.sync.remove(id, confirm).await;
        let outcome = self.record(result)?;
        if outcome == Guarded::Done {
            self.notifier.notify("Task deleted successfully");
            self.clamp_page();
        }
        Ok(outcome)
    }

    pub async fn set_completed(&mut self, id: &str, completed: bool) -> SyncResult<Task> {
        let result = self.sync.set_completed(id, completed).await;
        let task = self.record(result)?;
        self.notify_completion(&task);
        Ok(task)
    }

    pub async fn toggle(&mut self, id: &str) -> SyncResult<Task> {
        let result = self.sync.toggle_completed(id).await;
        let task = self.record(result)?;
        self.notify_completion(&task);
        Ok(task)
    }

    pub async fn set_priority(&mut self, id: &str, priority: Priority) -> SyncResult<()> {
        let result = self.sync.set_priority(id, priority).await;
        self.record(result)
    }

    pub async fn clear_completed(&mut self, confirm: &mut dyn Confirm) -> SyncResult<Guarded> {
        let result = self.sync.clear_completed(confirm).await;
        let outcome = self.record(result)?;
        self.clamp_page();
        Ok(outcome)
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
        self.clamp_page();
    }

    pub fn next_page(&mut self) {
        let total_pages = self.view().total_pages;
        self.pagination.next(total_pages);
    }

    pub fn previous_page(&mut self) {
        self.pagination.previous();
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pagination.go_to(page);
    }

    pub fn set_entries_per_page(&mut self, entries_per_page: EntriesPerPage) {
        self.pagination.set_entries_per_page(entries_per_page);
    }

    pub fn toggle_theme(&mut self) -> anyhow::Result<Theme> {
        self.theme = self.theme.toggled();
        if let Some(path) = &self.theme_path {
            save_theme(path, self.theme)?;
        }
        Ok(self.theme)
    }

    /// Apply one interactive command. Action failures stay in `message`.
    pub async fn handle(
        &mut self,
        command: DashboardCommand,
        confirm: &mut dyn Confirm,
    ) -> anyhow::Result<Flow> {
        let mut yes = AssumeYes;
        let result = match command {
            DashboardCommand::Add(args) => {
                let input = NewTask::new(args.title.join(" "))
                    .with_description(args.description.unwrap_or_default())
                    .with_priority(args.priority);
                self.add(input).await.map(|_| ())
            }
            DashboardCommand::Delete(args) => {
                let confirm: &mut dyn Confirm = if args.yes { &mut yes } else { confirm };
                self.delete(&args.id, confirm).await.map(|_| ())
            }
            DashboardCommand::Toggle(args) => self.toggle(&args.id).await.map(|_| ()),
            DashboardCommand::Priority(args) => self.set_priority(&args.id, args.priority).await,
            DashboardCommand::Clear(args) => {
                let confirm: &mut dyn Confirm = if args.yes { &mut yes } else { confirm };
                self.clear_completed(confirm).await.map(|_| ())
            }
            DashboardCommand::Refresh => self.refresh().await,
            DashboardCommand::Filter(args) => {
                self.set_filter(args.to_filter());
                Ok(())
            }
            DashboardCommand::Next => {
                self.next_page();
                Ok(())
            }
            DashboardCommand::Prev => {
                self.previous_page();
                Ok(())
            }
            DashboardCommand::PageSize { size } => {
                self.set_entries_per_page(size);
                Ok(())
            }
            DashboardCommand::Theme => {
                let theme = self.toggle_theme()?;
                info!(%theme, "Theme changed");
                Ok(())
            }
            DashboardCommand::Quit => return Ok(Flow::Exit),
        };

        match result {
            Err(SyncError::AuthExpired) => Ok(Flow::Exit),
            _ => Ok(Flow::Continue),
        }
    }

    fn notify_completion(&mut self, task: &Task) {
        if task.completed {
            self.notifier.notify("Task completed successfully");
        } else {
            self.notifier.notify("Task marked as pending");
        }
    }

    /// Keeps `message` in step with the last action. Any reload that reports
    /// `AuthExpired` ends the session, at most once.
    fn record<T>(&mut self, result: SyncResult<T>) -> SyncResult<T> {
        match &result {
            Ok(_) => self.message = None,
            Err(e) => {
                if e.is_auth_expired() {
                    self.end_session();
                }
                self.message = Some(e.to_string());
            }
        }
        result
    }

    fn end_session(&mut self) {
        if self.logged_out {
            return;
        }

        self.logged_out = true;
        if let Err(e) = self.session.terminate() {
            warn!(error = %e, "Failed to clear credential");
        }
    }

    fn clamp_page(&mut self) {
        let total_pages = self.view().total_pages;
        self.pagination.clamp(total_pages);
    }
}
