//! Control of the external Caddy server process.
//!
//! The tool never serves traffic itself; it hands the configuration file to
//! a Caddy instance and asks it to reload. Everything here shells out to the
//! `caddy` binary.

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tokio::process::Command;
use tracing::{info, warn};

use crate::settings::Settings;

/// Conventional install locations probed before falling back to `PATH`.
const CADDY_PATHS: [&str; 3] = [
    "/opt/homebrew/bin/caddy",
    "/usr/local/bin/caddy",
    "/usr/bin/caddy",
];

/// What a reload request actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The running server picked up the new configuration
    Reloaded,
    /// No server was running; one was started with the configuration
    Started,
}

/// Driver for the external server process.
#[derive(Debug, Clone)]
pub struct CaddyService {
    binary: PathBuf,
    caddyfile: PathBuf,
}

impl CaddyService {
    pub fn from_settings(settings: &Settings) -> Self {
        let binary = settings
            .caddy_binary
            .clone()
            .unwrap_or_else(locate_binary);
        Self {
            binary,
            caddyfile: settings.caddyfile_path.clone(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Whether a usable server binary answers at all.
    pub async fn is_installed(&self) -> bool {
        Command::new(&self.binary)
            .arg("version")
            .output()
            .await
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    /// Asks the running server to reload the configuration file.
    ///
    /// When no server is running the reload fails with a connection error;
    /// in that case one is started instead, so the mapping still goes live.
    pub async fn reload(&self) -> anyhow::Result<ReloadOutcome> {
        let output = self
            .command()
            .arg("reload")
            .arg("--config")
            .arg(&self.caddyfile)
            .arg("--adapter")
            .arg("caddyfile")
            .output()
            .await?;

        if output.status.success() {
            info!("caddy reloaded");
            return Ok(ReloadOutcome::Reloaded);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("connection refused") || stderr.contains("no such process") {
            warn!("caddy is not running, starting it");
            self.start().await?;
            return Ok(ReloadOutcome::Started);
        }
        Err(anyhow!("caddy reload failed: {}", stderr.trim()))
    }

    /// Starts the server in the background with the managed configuration.
    pub async fn start(&self) -> anyhow::Result<()> {
        let output = self
            .command()
            .arg("start")
            .arg("--config")
            .arg(&self.caddyfile)
            .arg("--adapter")
            .arg("caddyfile")
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("caddy start failed: {}", stderr.trim()));
        }
        info!("caddy started");
        Ok(())
    }

    /// Stops the running server, if any.
    pub async fn stop(&self) -> anyhow::Result<()> {
        let output = self.command().arg("stop").output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("caddy stop failed: {}", stderr.trim()));
        }
        info!("caddy stopped");
        Ok(())
    }

    fn command(&self) -> Command {
        Command::new(&self.binary)
    }
}

/// First existing conventional install path, else `caddy` from `PATH`.
pub fn locate_binary() -> PathBuf {
    for path in CADDY_PATHS {
        if Path::new(path).exists() {
            return PathBuf::from(path);
        }
    }
    PathBuf::from("caddy")
}
