use std::path::Path;

use anyhow::Context;
use taskdeck_core::Theme;
use tracing::warn;

/// Stored theme, falling back to light when missing or unreadable
pub fn load_theme(path: &Path) -> Theme {
    match std::fs::read_to_string(path) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring stored theme");
            Theme::default()
        }),
        Err(_) => Theme::default(),
    }
}

pub fn save_theme(path: &Path, theme: Theme) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(path, theme.to_string()).context("Failed to write theme")
}
