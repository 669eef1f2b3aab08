use std::path::Path;

use crate::{
    app_config::AppConfig,
    session::{Session, TokenSession},
};

pub fn login_cmd(config: &AppConfig, token: &str) -> anyhow::Result<()> {
    if token.trim().is_empty() {
        anyhow::bail!("Token must not be empty");
    }

    TokenSession::login(Path::new(&config.token_path), token)?;
    println!("Logged in (profile '{}').", config.profile_name);
    Ok(())
}

pub fn logout_cmd(config: &AppConfig) -> anyhow::Result<()> {
    let mut session = TokenSession::open(Path::new(&config.token_path))?;

    if session.token().is_none() {
        println!("Not logged in.");
        return Ok(());
    }

    session.terminate()?;
    println!("Logged out.");
    Ok(())
}
