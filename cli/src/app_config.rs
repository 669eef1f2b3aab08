use std::time::Duration;

use serde::Serialize;
use taskdeck_core::EntriesPerPage;

use crate::{
    args::ConfigArgs,
    profile::{self, Profile},
};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Serialize)]
pub struct AppConfig {
    pub profile_name: String,
    pub profile_path: String,
    pub profile_exists: bool,
    pub api_url: String,
    pub token_path: String,
    pub theme_path: String,
    pub entries_per_page: EntriesPerPage,
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Flags and environment win over the profile file, which wins over defaults
    pub fn from_args(args: &ConfigArgs, profile: Option<&Profile>) -> Self {
        let profile_name = profile::get_profile_name(&args.profile);

        let api_url = args
            .api_url
            .clone()
            .or_else(|| profile.and_then(|p| p.api_url.clone()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        AppConfig {
            profile_path: profile::get_profile_config_path(&profile_name)
                .to_string_lossy()
                .into_owned(),
            token_path: profile::get_profile_token_path(&profile_name)
                .to_string_lossy()
                .into_owned(),
            theme_path: profile::get_theme_path().to_string_lossy().into_owned(),
            profile_exists: profile.is_some(),
            api_url: api_url.trim_end_matches('/').to_string(),
            entries_per_page: profile
                .and_then(|p| p.entries_per_page)
                .unwrap_or_default(),
            timeout_secs: profile.and_then(|p| p.timeout_secs),
            profile_name,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
