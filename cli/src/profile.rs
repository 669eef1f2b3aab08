use std::path::{Path, PathBuf};

use anyhow::{Context, Ok};
use serde::{Deserialize, Serialize};
use taskdeck_core::EntriesPerPage;

pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub api_url: Option<String>,
    pub entries_per_page: Option<EntriesPerPage>,
    /// Request timeout in seconds; unset means the transport default
    pub timeout_secs: Option<u64>,
}

impl Profile {
    pub fn from_path(profile: &Path) -> anyhow::Result<Option<Self>> {
        if !profile.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(profile).context("Failed to read profile file")?;

        let profile: Self = toml::from_str(&contents).context("Failed to deserialize profile")?;

        Ok(Some(profile))
    }

    pub fn save(&self, profile_path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string(self).context("Failed to serialize profile")?;

        if let Some(parent) = profile_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create profile directory")?;
        }

        std::fs::write(profile_path, content).context("Failed to write profile")?;

        Ok(())
    }
}

/// Get the XDG config directory, respecting XDG_CONFIG_HOME
pub fn get_config_dir() -> PathBuf {
    if let std::result::Result::Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("taskdeck")
    } else {
        directories::ProjectDirs::from("com", "taskdeck", "taskdeck")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Get the XDG data directory, respecting XDG_DATA_HOME
pub fn get_data_dir() -> PathBuf {
    if let std::result::Result::Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("taskdeck")
    } else {
        directories::ProjectDirs::from("com", "taskdeck", "taskdeck")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Get path to a profile's config file
pub fn get_profile_config_path(profile_name: &str) -> PathBuf {
    get_config_dir()
        .join("profiles")
        .join(format!("{}.toml", profile_name))
}

/// Get path to a profile's stored credential
pub fn get_profile_token_path(profile_name: &str) -> PathBuf {
    get_data_dir()
        .join("profiles")
        .join(profile_name)
        .join("token")
}

/// Theme is shared by all profiles
pub fn get_theme_path() -> PathBuf {
    get_config_dir().join("theme")
}

pub fn get_profile_name(arg_profile: &Option<String>) -> String {
    arg_profile
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
}
