use std::path::Path;

use taskdeck_core::Theme;

use crate::{
    app_config::AppConfig,
    args::{ThemeAction, ThemeArgs},
    theme::{load_theme, save_theme},
};

pub fn theme_cmd(config: &AppConfig, args: ThemeArgs) -> anyhow::Result<()> {
    let path = Path::new(&config.theme_path);
    let current = load_theme(path);

    let theme = match args.action {
        None => {
            println!("{}", current);
            return Ok(());
        }
        Some(ThemeAction::Toggle) => current.toggled(),
        Some(ThemeAction::Light) => Theme::Light,
        Some(ThemeAction::Dark) => Theme::Dark,
    };

    save_theme(path, theme)?;
    println!("Theme set to {}", theme);
    Ok(())
}
