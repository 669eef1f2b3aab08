use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use taskdeck_core::{EntriesPerPage, Priority, PriorityFilter, StatusFilter, TaskFilter};

use crate::utils::date_target::DateTarget;

#[derive(Parser, Debug)]
#[command(
    name = "taskdeck",
    version,
    about,
    long_about = "Terminal dashboard for your remote task list"
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Args, Serialize)]
pub struct ConfigArgs {
    /// Profile name
    #[arg(long, env = "TASKDECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Base URL of the task API (e.g. http://localhost:5000/api)
    #[arg(long, env = "TASKDECK_API_URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Prints out current configuration
    Config,
    /// Initializes a new profile
    Init,
    /// Stores the API credential for the current profile
    Login(LoginArgs),
    /// Forgets the stored credential
    Logout,
    /// Lists tasks.
    List(ListArgs),
    /// Creates a new task.
    Add(AddArgs),
    /// Deletes a task.
    Delete(DeleteArgs),
    /// Marks a task as completed.
    Done(TaskIdArgs),
    /// Marks a task as pending again.
    Undone(TaskIdArgs),
    /// Flips the completion state of a task.
    Toggle(TaskIdArgs),
    /// Changes the priority of a task.
    Priority(PriorityArgs),
    /// Deletes all completed tasks.
    Clear(ClearArgs),
    /// Shows or changes the color theme.
    Theme(ThemeArgs),
    /// Opens the interactive dashboard.
    Dashboard,
    /// Prints a shell completion script.
    Completions(CompletionsArgs),
}

#[derive(Debug, Args, PartialEq)]
pub struct CompletionsArgs {
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Args, PartialEq)]
pub struct LoginArgs {
    /// Bearer token issued by the task API
    #[arg(long, env = "TASKDECK_TOKEN")]
    pub token: String,
}

#[derive(Debug, Clone, Args, PartialEq, Default)]
pub struct FilterArgs {
    /// Only show tasks with this priority (all, high, medium, low)
    #[arg(long, default_value_t = PriorityFilter::All)]
    pub priority: PriorityFilter,

    /// Only show tasks with this status (all, completed, pending)
    #[arg(long, default_value_t = StatusFilter::All)]
    pub status: StatusFilter,

    /// Created within a window (e.g. "today", "last week", "2024-03-16")
    #[arg(long, value_name = "DATE", value_parser = parse_date_target)]
    pub date: Option<DateTarget>,

    /// Created on or after this day (YYYY-MM-DD)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: Option<NaiveDate>,

    /// Created on or before this day (YYYY-MM-DD)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    /// Explicit `--from`/`--to` win over the `--date` window
    pub fn to_filter(&self) -> TaskFilter {
        let (date_from, date_to) = self
            .date
            .as_ref()
            .map(|d| d.to_date_range())
            .unwrap_or((None, None));

        TaskFilter {
            priority: self.priority,
            status: self.status,
            from_date: self.from.or(date_from),
            to_date: self.to.or(date_to),
        }
    }
}

#[derive(Debug, Clone, ValueEnum, PartialEq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Plain,
    Json,
}

#[derive(Debug, Args, PartialEq)]
#[command(about = "List tasks with optional filters")]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Entries per page (5, 10 or 15)
    #[arg(long, value_name = "N")]
    pub per_page: Option<EntriesPerPage>,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Args, PartialEq)]
pub struct AddArgs {
    /// Task title
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,

    /// Optional description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Priority (high, medium, low)
    #[arg(long, short, default_value_t = Priority::Low)]
    pub priority: Priority,
}

#[derive(Debug, Clone, Args, PartialEq)]
pub struct DeleteArgs {
    /// Task ID to delete
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Clone, Args, PartialEq)]
pub struct TaskIdArgs {
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Debug, Clone, Args, PartialEq)]
pub struct PriorityArgs {
    #[arg(value_name = "ID")]
    pub id: String,

    /// New priority (high, medium, low)
    pub priority: Priority,
}

#[derive(Debug, Clone, Args, PartialEq)]
pub struct ClearArgs {
    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum ThemeAction {
    Toggle,
    Light,
    Dark,
}

#[derive(Debug, Clone, Args, PartialEq)]
pub struct ThemeArgs {
    /// Omit to print the current theme
    pub action: Option<ThemeAction>,
}

/// One line typed into the interactive dashboard
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct DashboardLine {
    #[clap(subcommand)]
    pub command: DashboardCommand,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum DashboardCommand {
    /// Create a task
    Add(AddArgs),
    /// Delete a task
    #[command(alias = "rm")]
    Delete(DeleteArgs),
    /// Flip completion of a task
    Toggle(TaskIdArgs),
    /// Change priority of a task
    Priority(PriorityArgs),
    /// Delete all completed tasks
    Clear(ClearArgs),
    /// Replace the current filter
    Filter(FilterArgs),
    /// Next page
    #[command(alias = "n")]
    Next,
    /// Previous page
    #[command(alias = "p")]
    Prev,
    /// Change entries per page (5, 10, 15)
    PageSize { size: EntriesPerPage },
    /// Switch between light and dark
    Theme,
    /// Reload tasks from the server
    Refresh,
    /// Leave the dashboard
    #[command(alias = "exit", alias = "q")]
    Quit,
}

pub fn parse_date_target(s: &str) -> anyhow::Result<DateTarget> {
    s.parse()
}
