use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Contents written when the managed Caddyfile does not exist yet.
pub const DEFAULT_CADDYFILE: &str = "# Caddy Configuration\n\n# Example:\n# localhost:8080 {\n#     respond \"Hello, world!\"\n# }\n";

/// File access for the managed Caddyfile.
///
/// The store moves whole file contents in and out; interpreting the text is
/// the `caddyfile` module's job.
pub struct CaddyfileStore {
    path: PathBuf,
}

impl CaddyfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration text, creating a commented default file on
    /// first use so the rest of the tool always has something to parse.
    pub async fn load(&self) -> anyhow::Result<String> {
        if !self.path.exists() {
            info!("no caddyfile at {}, creating default", self.path.display());
            self.save(DEFAULT_CADDYFILE).await?;
        }
        debug!("reading caddyfile from {}", self.path.display());
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    /// Writes the full configuration text.
    pub async fn save(&self, content: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        debug!("writing caddyfile to {}", self.path.display());
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}
