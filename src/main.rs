// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use org_kubectl::config::Config;
use org_kubectl::dispatch::run_on_clusters;
use org_kubectl::google::{ApiClient, CloudResourceManager, GkeClient, TokenSource};
use org_kubectl::hierarchy::{find_child_projects, AncestryCache, ResolveOptions, ResourceInventory};

/// Run a kubectl command against every GKE cluster beneath a folder or organization
#[derive(Parser, Debug)]
#[command(name = "org-kubectl", version)]
struct Cli {
    /// Folder or organization id the projects must descend from
    ancestor_id: String,

    /// Arguments passed through to kubectl
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    kubectl_args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, kubectl owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            ctrl_c.cancel();
        }
    });

    let tokens = Arc::new(TokenSource::new(config.access_token.clone()));
    let api = ApiClient::new(tokens, config.http_timeout).context("could not create http client")?;
    let inventory: Arc<dyn ResourceInventory> =
        Arc::new(CloudResourceManager::new(api.clone(), config.crm_endpoint.clone()));
    let gke = GkeClient::new(api, config.gke_endpoint.clone());

    let cache = Arc::new(AncestryCache::load_or_empty(&config.cache_path));
    let options = ResolveOptions {
        max_concurrency: config.max_concurrency,
    };

    let found = find_child_projects(inventory, &cli.ancestor_id, cache.clone(), &options, &cancel).await;

    // Completed lookups are valid even when resolution failed, keep them
    if let Err(e) = cache.save(&config.cache_path) {
        warn!("Could not save ancestry cache: {}", e);
    }

    let projects = found.context("could not find projects")?;
    if projects.is_empty() {
        warn!("No projects found under {}", cli.ancestor_id);
        return Ok(());
    }

    let count = run_on_clusters(&gke, &projects, &cli.kubectl_args, &cancel).await?;
    info!("Ran kubectl on {} clusters in {} projects", count, projects.len());
    Ok(())
}
