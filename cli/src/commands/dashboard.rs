use clap::Parser;
use taskdeck_core::SyncError;
use termcolor::{ColorChoice, StandardStream, WriteColor};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    app_config::AppConfig,
    args::{DashboardLine, OutputFormat},
    commands::task::connect,
    confirm::Prompt,
    dashboard::{Dashboard, Flow},
    formatters::TaskPageFormatter,
};

const HINT: &str =
    "add | delete | toggle | priority | clear | filter | next | prev | page-size | theme | refresh | quit (help for more)";

/// Line-driven dashboard: render, read one command, apply it, repeat
pub async fn dashboard_cmd(config: &AppConfig) -> anyhow::Result<()> {
    let mut dashboard = connect(config).await?;
    let mut confirm = Prompt;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    loop {
        render(&dashboard, &mut stdout)?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let Some(words) = tokenize(&line) else {
            eprintln!("Unbalanced quotes in: {}", line.trim());
            continue;
        };
        if words.is_empty() {
            continue;
        }

        match DashboardLine::try_parse_from(words) {
            Ok(parsed) => {
                if dashboard.handle(parsed.command, &mut confirm).await? == Flow::Exit {
                    break;
                }
            }
            Err(e) => e.print()?,
        }
    }

    if dashboard.is_logged_out() {
        return Err(SyncError::AuthExpired.into());
    }

    Ok(())
}

/// Shell-style words, so a quoted title stays one argument
fn tokenize(line: &str) -> Option<Vec<String>> {
    shlex::split(line)
}

fn render(dashboard: &Dashboard, out: &mut dyn WriteColor) -> anyhow::Result<()> {
    let formatter = TaskPageFormatter::new(OutputFormat::Pretty, dashboard.theme());
    let notification = dashboard.notification();

    writeln!(out)?;
    formatter.print_banner(notification.as_deref(), dashboard.message(), out)?;
    formatter.print_page(&dashboard.view(), out)?;
    writeln!(out, "{}", HINT)?;
    write!(out, "> ")?;
    out.flush()?;

    Ok(())
}
