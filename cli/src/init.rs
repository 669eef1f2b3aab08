use anyhow::Context;
use cliclack::{input, select};
use taskdeck_core::EntriesPerPage;

use crate::{app_config::AppConfig, profile::Profile};

pub fn read_profile(defaults: &AppConfig) -> anyhow::Result<Profile> {
    let profile = Profile {
        api_url: Some(read_api_url(&defaults.api_url)?),
        entries_per_page: Some(read_entries_per_page(defaults.entries_per_page)?),
        timeout_secs: defaults.timeout_secs,
    };

    Ok(profile)
}

fn read_api_url(default: &str) -> anyhow::Result<String> {
    input("Task API URL")
        .placeholder(default)
        .default_input(default)
        .required(true)
        .validate(|value: &String| {
            if value.starts_with("http://") || value.starts_with("https://") {
                Ok(())
            } else {
                Err("URL must start with http:// or https://")
            }
        })
        .interact()
        .context("Couldn't read API URL")
}

fn read_entries_per_page(default: EntriesPerPage) -> anyhow::Result<EntriesPerPage> {
    select("Entries per page")
        .item(EntriesPerPage::Five, "5", "")
        .item(EntriesPerPage::Ten, "10", "")
        .item(EntriesPerPage::Fifteen, "15", "")
        .initial_value(default)
        .interact()
        .context("Couldn't read page size")
}
