use std::path::Path;

use crate::{app_config::AppConfig, init::read_profile};

pub fn init_cmd(config: &AppConfig) -> anyhow::Result<()> {
    let profile_path = Path::new(&config.profile_path);

    if config.profile_exists {
        let overwrite = cliclack::confirm(format!(
            "Profile '{}' already exists. Overwrite?",
            config.profile_name
        ))
        .initial_value(false)
        .interact()?;

        if !overwrite {
            println!("Profile left unchanged.");
            return Ok(());
        }
    }

    let profile = read_profile(config)?;
    profile.save(profile_path)?;

    println!("Profile saved to {}", profile_path.display());
    Ok(())
}
