use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::caddy::{CaddyService, ReloadOutcome};
use crate::caddyfile::{self, Document, SiteRecord, site};
use crate::settings::Settings;
use crate::store::CaddyfileStore;

#[derive(Debug, Parser)]
#[command(name = "steward", version, about = "Manage local .test sites served by Caddy")]
pub struct Cli {
    /// Settings file location
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the configured sites
    List,
    /// Map a domain to a local port
    Add {
        /// Host label; the .test suffix is appended when missing
        domain: String,
        /// Local port to proxy to
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        port: u16,
    },
    /// Remove a site
    Remove { domain: String },
    /// Change the port of an existing site
    Set {
        domain: String,
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        port: u16,
    },
    /// Ask the running server to reload the configuration
    Reload,
    /// Start the server with the managed configuration
    Start,
    /// Stop the running server
    Stop,
    /// Check the installation and configuration health
    Doctor,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load_or_create(cli.settings.as_deref()).await?;
    let store = CaddyfileStore::new(settings.caddyfile_path.clone());
    let service = CaddyService::from_settings(&settings);

    match cli.command {
        Command::List => list(&store).await,
        Command::Add { domain, port } => add(&store, &service, &settings, &domain, port).await,
        Command::Remove { domain } => remove(&store, &service, &settings, &domain).await,
        Command::Set { domain, port } => set(&store, &service, &settings, &domain, port).await,
        Command::Reload => reload(&service).await,
        Command::Start => {
            service.start().await?;
            println!("caddy started");
            Ok(())
        }
        Command::Stop => {
            service.stop().await?;
            println!("caddy stopped");
            Ok(())
        }
        Command::Doctor => doctor(&store, &service).await,
    }
}

async fn load_document(store: &CaddyfileStore) -> anyhow::Result<Document> {
    let text = store.load().await?;
    Ok(caddyfile::parse_caddyfile(&text)?)
}

// Build, write, and (when configured) push the new configuration to the
// running server. A reload failure is reported but does not undo the save;
// `steward reload` retries it.
async fn persist(
    store: &CaddyfileStore,
    service: &CaddyService,
    settings: &Settings,
    doc: &Document,
) -> anyhow::Result<()> {
    let text = caddyfile::build_caddyfile(doc)?;
    store.save(&text).await?;
    if settings.auto_reload {
        if let Err(err) = service.reload().await {
            warn!("configuration saved, but reload failed: {err:#}");
        }
    }
    Ok(())
}

async fn list(store: &CaddyfileStore) -> anyhow::Result<()> {
    let doc = load_document(store).await?;
    if doc.sites().next().is_none() {
        println!("no sites configured");
    }
    for site in doc.sites() {
        println!("{:<28} -> localhost:{}", site.domain, site.port);
    }
    let opaque = doc.opaque_count();
    if opaque > 0 {
        println!("({opaque} unrecognized section(s) kept as-is)");
    }
    Ok(())
}

async fn add(
    store: &CaddyfileStore,
    service: &CaddyService,
    settings: &Settings,
    domain: &str,
    port: u16,
) -> anyhow::Result<()> {
    let mut doc = load_document(store).await?;
    let site = SiteRecord::new(domain, port);
    if doc.find_site(&site.domain).is_some() {
        bail!("site `{}` already exists", site.domain);
    }
    let (domain, port) = (site.domain.clone(), site.port);
    doc.push_site(site);
    persist(store, service, settings, &doc).await?;
    println!("added {domain} -> localhost:{port}");
    Ok(())
}

async fn remove(
    store: &CaddyfileStore,
    service: &CaddyService,
    settings: &Settings,
    domain: &str,
) -> anyhow::Result<()> {
    let mut doc = load_document(store).await?;
    if !doc.remove_site(domain) {
        bail!("no site matches `{}`", site::normalize_domain(domain));
    }
    persist(store, service, settings, &doc).await?;
    println!("removed {}", site::normalize_domain(domain));
    Ok(())
}

async fn set(
    store: &CaddyfileStore,
    service: &CaddyService,
    settings: &Settings,
    domain: &str,
    port: u16,
) -> anyhow::Result<()> {
    let mut doc = load_document(store).await?;
    match doc.find_site_mut(domain) {
        Some(site) => site.port = port,
        None => bail!("no site matches `{}`", site::normalize_domain(domain)),
    }
    persist(store, service, settings, &doc).await?;
    println!("set {} -> localhost:{}", site::normalize_domain(domain), port);
    Ok(())
}

async fn reload(service: &CaddyService) -> anyhow::Result<()> {
    match service.reload().await? {
        ReloadOutcome::Reloaded => println!("caddy reloaded"),
        ReloadOutcome::Started => println!("caddy was not running; started it"),
    }
    Ok(())
}

async fn doctor(store: &CaddyfileStore, service: &CaddyService) -> anyhow::Result<()> {
    if service.is_installed().await {
        println!("caddy binary: ok ({})", service.binary().display());
    } else {
        println!("caddy binary: NOT FOUND (looked at {})", service.binary().display());
    }

    let path = store.path();
    if !path.exists() {
        println!("caddyfile: missing ({}), will be created on first use", path.display());
        return Ok(());
    }
    println!("caddyfile: ok ({})", path.display());

    let text = store.load().await?;
    match caddyfile::parse_caddyfile(&text) {
        Ok(doc) => {
            println!(
                "configuration: {} site(s), {} unrecognized section(s)",
                doc.sites().count(),
                doc.opaque_count()
            );
            for domain in doc.duplicate_domains() {
                println!("warning: duplicate site `{domain}` (first one wins)");
            }
        }
        Err(err) => println!("configuration: BROKEN ({err})"),
    }
    Ok(())
}
