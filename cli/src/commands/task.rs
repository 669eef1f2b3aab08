use std::path::{Path, PathBuf};

use taskdeck_core::{Guarded, NewTask, SyncClient, Task};
use termcolor::{ColorChoice, StandardStream};

use crate::{
    app_config::AppConfig,
    args::{AddArgs, ClearArgs, DeleteArgs, ListArgs, PriorityArgs, TaskIdArgs},
    confirm::confirmer,
    dashboard::Dashboard,
    formatters::TaskPageFormatter,
    session::TokenSession,
    theme::load_theme,
    web_client::HttpTaskApi,
};

/// Open the stored session and load the task list from the server
pub async fn connect(config: &AppConfig) -> anyhow::Result<Dashboard> {
    let session = TokenSession::open(Path::new(&config.token_path))?;
    let token = session.require_token()?.to_string();

    let api = HttpTaskApi::new(&config.api_url, &token, config.timeout())?;
    let theme_path = PathBuf::from(&config.theme_path);
    let theme = load_theme(&theme_path);

    let mut dashboard = Dashboard::new(SyncClient::new(Box::new(api)), Box::new(session))
        .with_entries_per_page(config.entries_per_page)
        .with_theme(theme, theme_path);

    dashboard.refresh().await?;
    Ok(dashboard)
}

pub async fn list_cmd(config: &AppConfig, args: ListArgs) -> anyhow::Result<()> {
    let mut dashboard = connect(config).await?;

    dashboard.set_filter(args.filter.to_filter());
    if let Some(entries_per_page) = args.per_page {
        dashboard.set_entries_per_page(entries_per_page);
    }
    dashboard.go_to_page(args.page);

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    TaskPageFormatter::new(args.output, dashboard.theme())
        .print_page(&dashboard.view(), &mut stdout)
        .map_err(|e| anyhow::anyhow!("Error while formatting tasks: {}", e))
}

pub async fn add_cmd(config: &AppConfig, args: AddArgs) -> anyhow::Result<()> {
    let mut dashboard = connect(config).await?;

    let input = NewTask::new(args.title.join(" "))
        .with_description(args.description.unwrap_or_default())
        .with_priority(args.priority);
    let task = dashboard.add(input).await?;

    println!("Task added successfully ({})", task.id);
    Ok(())
}

pub async fn delete_cmd(config: &AppConfig, args: DeleteArgs) -> anyhow::Result<()> {
    let mut dashboard = connect(config).await?;
    let mut confirm = confirmer(args.yes);

    match dashboard.delete(&args.id, confirm.as_mut()).await? {
        Guarded::Done => println!("Task deleted successfully"),
        Guarded::Cancelled => println!("Cancelled"),
    }

    Ok(())
}

pub async fn set_completed_cmd(
    config: &AppConfig,
    args: TaskIdArgs,
    completed: bool,
) -> anyhow::Result<()> {
    let mut dashboard = connect(config).await?;
    let task = dashboard.set_completed(&args.id, completed).await?;
    print_completion(&task);
    Ok(())
}

pub async fn toggle_cmd(config: &AppConfig, args: TaskIdArgs) -> anyhow::Result<()> {
    let mut dashboard = connect(config).await?;
    let task = dashboard.toggle(&args.id).await?;
    print_completion(&task);
    Ok(())
}

pub async fn priority_cmd(config: &AppConfig, args: PriorityArgs) -> anyhow::Result<()> {
    let mut dashboard = connect(config).await?;
    dashboard.set_priority(&args.id, args.priority).await?;

    println!("Priority of {} set to {}", args.id, args.priority);
    Ok(())
}

pub async fn clear_cmd(config: &AppConfig, args: ClearArgs) -> anyhow::Result<()> {
    let mut dashboard = connect(config).await?;
    let before = dashboard.tasks().len();
    let mut confirm = confirmer(args.yes);

    match dashboard.clear_completed(confirm.as_mut()).await? {
        Guarded::Done => println!(
            "Cleared {} completed tasks",
            before.saturating_sub(dashboard.tasks().len())
        ),
        Guarded::Cancelled => println!("Cancelled"),
    }

    Ok(())
}

fn print_completion(task: &Task) {
    if task.completed {
        println!("Task completed successfully ({})", task.id);
    } else {
        println!("Task marked as pending ({})", task.id);
    }
}
