use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ParseValueError, Priority, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriorityFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl PriorityFilter {
    pub fn matches(&self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::High => priority == Priority::High,
            PriorityFilter::Medium => priority == Priority::Medium,
            PriorityFilter::Low => priority == Priority::Low,
        }
    }
}

impl From<Priority> for PriorityFilter {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::High => PriorityFilter::High,
            Priority::Medium => PriorityFilter::Medium,
            Priority::Low => PriorityFilter::Low,
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityFilter::All => f.write_str("All"),
            PriorityFilter::High => f.write_str("High"),
            PriorityFilter::Medium => f.write_str("Medium"),
            PriorityFilter::Low => f.write_str("Low"),
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(PriorityFilter::All);
        }
        s.parse::<Priority>()
            .map(PriorityFilter::from)
            .map_err(|_| ParseValueError::new("priority filter", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn matches(&self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => completed,
            StatusFilter::Pending => !completed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Completed => f.write_str("Completed"),
            StatusFilter::Pending => f.write_str("Pending"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" | "done" => Ok(StatusFilter::Completed),
            "pending" => Ok(StatusFilter::Pending),
            _ => Err(ParseValueError::new("status filter", s)),
        }
    }
}

/// View-only filter over the local mirror
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub priority: PriorityFilter,
    pub status: StatusFilter,
    /// Inclusive from the start of this day (UTC)
    pub from_date: Option<NaiveDate>,
    /// Inclusive through the end of this day (UTC)
    pub to_date: Option<NaiveDate>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        self.priority.matches(task.priority)
            && self.status.matches(task.completed)
            && self.matches_date(task.created_at)
    }

    fn matches_date(&self, created_at: DateTime<Utc>) -> bool {
        if let Some(from) = self.from_date {
            if created_at < start_of_day(from) {
                return false;
            }
        }

        // Upper bound is the next midnight, exclusive
        if let Some(to) = self.to_date {
            if let Some(bound) = to.checked_add_days(Days::new(1)) {
                if created_at >= start_of_day(bound) {
                    return false;
                }
            }
        }

        true
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Allowed page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum EntriesPerPage {
    #[default]
    Five,
    Ten,
    Fifteen,
}

impl EntriesPerPage {
    pub fn get(&self) -> usize {
        match self {
            EntriesPerPage::Five => 5,
            EntriesPerPage::Ten => 10,
            EntriesPerPage::Fifteen => 15,
        }
    }
}

impl TryFrom<usize> for EntriesPerPage {
    type Error = ParseValueError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(EntriesPerPage::Five),
            10 => Ok(EntriesPerPage::Ten),
            15 => Ok(EntriesPerPage::Fifteen),
            other => Err(ParseValueError::new("page size", &other.to_string())),
        }
    }
}

impl From<EntriesPerPage> for usize {
    fn from(value: EntriesPerPage) -> Self {
        value.get()
    }
}

impl fmt::Display for EntriesPerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl FromStr for EntriesPerPage {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .map_err(|_| ParseValueError::new("page size", s))
            .and_then(EntriesPerPage::try_from)
    }
}

/// 1-based page cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    entries_per_page: EntriesPerPage,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            current_page: 1,
            entries_per_page: EntriesPerPage::default(),
        }
    }
}

impl Pagination {
    pub fn new(entries_per_page: EntriesPerPage) -> Self {
        Pagination {
            current_page: 1,
            entries_per_page,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn entries_per_page(&self) -> EntriesPerPage {
        self.entries_per_page
    }

    /// Jump to a page, never below 1
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn next(&mut self, total_pages: usize) {
        self.current_page = (self.current_page + 1).min(total_pages).max(1);
    }

    pub fn previous(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Changing the page size always goes back to the first page
    pub fn set_entries_per_page(&mut self, entries_per_page: EntriesPerPage) {
        self.entries_per_page = entries_per_page;
        self.current_page = 1;
    }

    /// Pull the cursor back inside `[1, total_pages]`
    pub fn clamp(&mut self, total_pages: usize) {
        self.current_page = self.current_page.min(total_pages).max(1);
    }

    /// `ceil(filtered_count / entries_per_page)`, zero for an empty set
    pub fn total_pages(&self, filtered_count: usize) -> usize {
        filtered_count.div_ceil(self.entries_per_page.get())
    }
}

/// One rendered page of the filtered mirror
#[derive(Debug, Clone, PartialEq)]
pub struct TaskPage<'a> {
    pub rows: Vec<&'a Task>,
    pub current_page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub entries_per_page: EntriesPerPage,
}

impl TaskPage<'_> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// With zero results `total_pages` is 0 and this is always false
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Offset of the first visible row within the filtered set
    pub fn first_index(&self) -> usize {
        (self.current_page - 1) * self.entries_per_page.get()
    }
}

pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

/// Filter, then slice out the current page. Mirror order is kept as-is.
pub fn derive_view<'a>(
    tasks: &'a [Task],
    filter: &TaskFilter,
    pagination: &Pagination,
) -> TaskPage<'a> {
    let filtered = filter_tasks(tasks, filter);
    let filtered_count = filtered.len();
    let total_pages = pagination.total_pages(filtered_count);
    let per_page = pagination.entries_per_page.get();

    let current_page = pagination.current_page.min(total_pages.max(1));
    let start = ((current_page - 1) * per_page).min(filtered_count);
    let end = (start + per_page).min(filtered_count);

    TaskPage {
        rows: filtered[start..end].to_vec(),
        current_page,
        total_pages,
        filtered_count,
        entries_per_page: pagination.entries_per_page,
    }
}
