use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

pub const NOT_LOGGED_IN: &str = "Not logged in. Run `taskdeck login --token <TOKEN>` first.";

/// Holder of the bearer credential used for every remote call
pub trait Session {
    fn token(&self) -> Option<&str>;

    /// Forget the credential; called when the server rejects it
    fn terminate(&mut self) -> anyhow::Result<()>;
}

/// Credential kept in a file under the profile's data directory
#[derive(Debug)]
pub struct TokenSession {
    path: PathBuf,
    token: Option<String>,
}

impl TokenSession {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let token = if path.exists() {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read credential at {:?}", path))?;
            Some(raw.trim().to_string()).filter(|t| !t.is_empty())
        } else {
            None
        };

        Ok(Self {
            path: path.to_path_buf(),
            token,
        })
    }

    pub fn login(path: &Path, token: &str) -> anyhow::Result<Self> {
        save_token_securely(path, token.trim())?;
        Self::open(path)
    }

    /// The credential, or the error shown before any call is attempted
    pub fn require_token(&self) -> anyhow::Result<&str> {
        self.token().ok_or_else(|| anyhow::anyhow!(NOT_LOGGED_IN))
    }
}

impl Session for TokenSession {
    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn terminate(&mut self) -> anyhow::Result<()> {
        self.token = None;
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove credential at {:?}", self.path))?;
        }
        info!(path = ?self.path, "Session terminated");
        Ok(())
    }
}

fn save_token_securely(token_path: &Path, token: &str) -> anyhow::Result<()> {
    // Ensure the directory exists
    if let Some(parent) = token_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(token_path, token)?;

    // On Unix-like systems, set file permissions to 600 (owner read/write only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(token_path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(token_path, perms)?;
    }

    Ok(())
}
