use std::io;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use taskdeck_core::{Priority, Task, TaskPage, Theme};
use termcolor::{Color, ColorSpec, WriteColor};

use crate::args::OutputFormat;

const HEADERS: [&str; 7] = [
    "ID",
    "Title",
    "Description",
    "Priority",
    "Status",
    "Completed At",
    "Created At",
];

#[derive(Serialize)]
struct PageJson<'a> {
    tasks: &'a [&'a Task],
    current_page: usize,
    total_pages: usize,
    filtered_count: usize,
    entries_per_page: usize,
}

/// Renders one page of tasks in the requested format
pub struct TaskPageFormatter {
    output: OutputFormat,
    theme: Theme,
}

impl TaskPageFormatter {
    pub fn new(output: OutputFormat, theme: Theme) -> Self {
        Self { output, theme }
    }

    pub fn print_page(&self, page: &TaskPage, out: &mut dyn WriteColor) -> io::Result<()> {
        match self.output {
            OutputFormat::Pretty => self.print_pretty(page, out),
            OutputFormat::Plain => print_plain(page, out),
            OutputFormat::Json => print_json(page, out),
        }
    }

    /// Notification banner and inline error above the table
    pub fn print_banner(
        &self,
        notification: Option<&str>,
        message: Option<&str>,
        out: &mut dyn WriteColor,
    ) -> io::Result<()> {
        if let Some(notification) = notification {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            writeln!(out, "{}", notification)?;
            out.reset()?;
        }

        if let Some(message) = message {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            writeln!(out, "{}", message)?;
            out.reset()?;
        }

        Ok(())
    }

    fn print_pretty(&self, page: &TaskPage, out: &mut dyn WriteColor) -> io::Result<()> {
        let rows: Vec<[String; 7]> = page.rows.iter().map(|t| columns(t)).collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        out.set_color(ColorSpec::new().set_bold(true))?;
        for (header, width) in HEADERS.iter().zip(widths) {
            write!(out, "{:<width$}  ", header, width = width)?;
        }
        writeln!(out)?;
        out.reset()?;

        for (task, row) in page.rows.iter().zip(rows.iter()) {
            for (index, (cell, width)) in row.iter().zip(widths).enumerate() {
                let spec = if index == 3 {
                    self.priority_color(task.priority)
                } else {
                    self.row_color(task)
                };
                out.set_color(&spec)?;
                write!(out, "{:<width$}", cell, width = width)?;
                out.reset()?;
                write!(out, "  ")?;
            }
            writeln!(out)?;
        }

        if page.rows.is_empty() {
            writeln!(out, "No tasks found.")?;
        }

        writeln!(out)?;
        write_footer(page, out)
    }

    fn priority_color(&self, priority: Priority) -> ColorSpec {
        let color = match priority {
            Priority::High => Color::Red,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Green,
        };

        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color))
            .set_bold(true)
            .set_intense(self.theme == Theme::Dark);
        spec
    }

    fn row_color(&self, task: &Task) -> ColorSpec {
        let mut spec = ColorSpec::new();
        if task.completed {
            spec.set_fg(Some(Color::Green))
                .set_intense(self.theme == Theme::Dark);
        } else if self.theme == Theme::Dark {
            spec.set_fg(Some(Color::White));
        }
        spec
    }
}

fn columns(task: &Task) -> [String; 7] {
    [
        task.id.clone(),
        task.title.clone(),
        task.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("-")
            .to_string(),
        task.priority.to_string(),
        status(task).to_string(),
        task.completed_at
            .map(format_time)
            .unwrap_or_else(|| "-".to_string()),
        format_time(task.created_at),
    ]
}

fn status(task: &Task) -> &'static str {
    if task.completed {
        "Completed"
    } else {
        "Pending"
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

fn print_plain(page: &TaskPage, out: &mut dyn WriteColor) -> io::Result<()> {
    for task in &page.rows {
        writeln!(out, "{}", columns(task).join("\t"))?;
    }
    write_footer(page, out)
}

fn print_json(page: &TaskPage, out: &mut dyn WriteColor) -> io::Result<()> {
    let body = PageJson {
        tasks: &page.rows,
        current_page: page.current_page,
        total_pages: page.total_pages,
        filtered_count: page.filtered_count,
        entries_per_page: page.entries_per_page.get(),
    };

    serde_json::to_writer_pretty(&mut *out, &body)?;
    writeln!(out)
}

/// Total pages is printed as computed, so an empty result reads "Page 1 of 0"
fn write_footer(page: &TaskPage, out: &mut dyn WriteColor) -> io::Result<()> {
    let previous = if page.has_previous() { "[prev]" } else { "" };
    let next = if page.has_next() { "[next]" } else { "" };

    writeln!(
        out,
        "Page {} of {} ({} tasks, {} per page) {}{}",
        page.current_page,
        page.total_pages,
        page.filtered_count,
        page.entries_per_page,
        previous,
        next
    )
}
