use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Environment override for the settings file location.
pub const SETTINGS_ENV: &str = "STEWARD_SETTINGS";

const SETTINGS_FILE: &str = "settings.yaml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Host-level configuration: where the managed Caddyfile lives and how the
/// server process is driven. A fixed record with explicit load/save points;
/// nothing here is consulted by the core transform itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(skip)]
    path: PathBuf,

    /// The configuration file this tool manages
    pub caddyfile_path: PathBuf,

    /// Explicit server binary; when unset the conventional install
    /// locations and `PATH` are searched
    #[serde(default)]
    pub caddy_binary: Option<PathBuf>,

    /// Reload the server after every successful save
    #[serde(default = "default_auto_reload")]
    pub auto_reload: bool,
}

fn default_auto_reload() -> bool {
    true
}

impl Settings {
    /// Default settings bound to the given file location.
    pub fn defaults_at(path: PathBuf) -> Self {
        Self {
            path,
            caddyfile_path: default_caddyfile_path(),
            caddy_binary: None,
            auto_reload: default_auto_reload(),
        }
    }

    /// Where the settings file lives unless overridden: `$STEWARD_SETTINGS`,
    /// else the platform config directory.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(SETTINGS_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }
        match ProjectDirs::from("", "", "steward") {
            Some(dirs) => dirs.config_dir().join(SETTINGS_FILE),
            None => PathBuf::from(SETTINGS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings from the given path (or the default location),
    /// writing the defaults out on first run.
    ///
    /// A file that exists but does not parse is an error; silently replacing
    /// it would discard whatever the user had configured.
    pub async fn load_or_create(path: Option<&Path>) -> Result<Self, SettingsError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path(),
        };

        if path.exists() {
            debug!("loading settings from {}", path.display());
            let content = tokio::fs::read_to_string(&path).await?;
            let mut settings: Settings = serde_yaml::from_str(&content)?;
            settings.path = path;
            Ok(settings)
        } else {
            info!("no settings file, writing defaults to {}", path.display());
            let settings = Self::defaults_at(path);
            settings.save().await?;
            Ok(settings)
        }
    }

    pub async fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_yaml::to_string(self)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

fn default_caddyfile_path() -> PathBuf {
    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join("caddy").join("Caddyfile"),
        None => PathBuf::from("Caddyfile"),
    }
}
