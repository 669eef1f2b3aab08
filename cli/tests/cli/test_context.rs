#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated config and data directories plus a unique profile name
pub struct TestContext {
    temp_dir: TempDir,
    pub profile_name: String,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            profile_name: format!("test_{}", uuid::Uuid::new_v4().simple()),
        }
    }

    /// Context whose profile file points at `api_url`
    pub fn with_api(api_url: &str) -> Self {
        let ctx = Self::new();
        let path = ctx.profile_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, format!("api_url = \"{}\"\n", api_url)).unwrap();
        ctx
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskdeck").unwrap();

        cmd.env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_DATA_HOME", self.temp_dir.path().join("data"))
            .env("TASKDECK_PROFILE", &self.profile_name)
            .env_remove("TASKDECK_API_URL")
            .env_remove("TASKDECK_TOKEN")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn login(&self, token: &str) {
        self.command()
            .args(["login", "--token", token])
            .assert()
            .success();
    }

    pub fn token_path(&self) -> PathBuf {
        self.temp_dir
            .path()
            .join("data")
            .join("taskdeck")
            .join("profiles")
            .join(&self.profile_name)
            .join("token")
    }

    pub fn profile_path(&self) -> PathBuf {
        self.config_home()
            .join("taskdeck")
            .join("profiles")
            .join(format!("{}.toml", self.profile_name))
    }

    pub fn theme_path(&self) -> PathBuf {
        self.config_home().join("taskdeck").join("theme")
    }

    fn config_home(&self) -> PathBuf {
        self.temp_dir.path().join("config")
    }
}
