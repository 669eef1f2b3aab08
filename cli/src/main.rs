#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
#![warn(clippy::expect_used)]

use crate::app_config::AppConfig;
use args::{CliArgs, Command};
use clap::Parser;
use commands::{
    completions::completions_cmd,
    config::config_cmd,
    dashboard::dashboard_cmd,
    init::init_cmd,
    session::{login_cmd, logout_cmd},
    task::{
        add_cmd, clear_cmd, delete_cmd, list_cmd, priority_cmd, set_completed_cmd, toggle_cmd,
    },
    theme::theme_cmd,
};
use profile::{get_profile_config_path, get_profile_name, Profile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app_config;
mod args;
mod commands;
mod confirm;
mod dashboard;
mod formatters;
mod init;
mod notify;
mod profile;
mod session;
mod theme;
mod utils;
mod web_client;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let args = CliArgs::parse();

    let profile_name = get_profile_name(&args.config.profile);
    let profile = Profile::from_path(&get_profile_config_path(&profile_name))?;
    let config = AppConfig::from_args(&args.config, profile.as_ref());

    match args.command.unwrap_or(Command::Dashboard) {
        Command::Config => config_cmd(&config)?,
        Command::Init => init_cmd(&config)?,
        Command::Login(args) => login_cmd(&config, &args.token)?,
        Command::Logout => logout_cmd(&config)?,
        Command::List(args) => list_cmd(&config, args).await?,
        Command::Add(args) => add_cmd(&config, args).await?,
        Command::Delete(args) => delete_cmd(&config, args).await?,
        Command::Done(args) => set_completed_cmd(&config, args, true).await?,
        Command::Undone(args) => set_completed_cmd(&config, args, false).await?,
        Command::Toggle(args) => toggle_cmd(&config, args).await?,
        Command::Priority(args) => priority_cmd(&config, args).await?,
        Command::Clear(args) => clear_cmd(&config, args).await?,
        Command::Theme(args) => theme_cmd(&config, args)?,
        Command::Dashboard => dashboard_cmd(&config).await?,
        Command::Completions(args) => completions_cmd(args),
    }

    Ok(())
}

/// Diagnostics go to stderr so they never mix with command output
fn setup_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{crate_name}=warn,taskdeck_core=warn",
                    crate_name = env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
