// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{cache, endpoints, env as vars, DEFAULT_HTTP_TIMEOUT_SECS};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Tool configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the persisted ancestry cache
    pub cache_path: PathBuf,
    /// Upper bound on concurrent ancestry lookups, `None` spawns one task per missing project
    pub max_concurrency: Option<usize>,
    pub crm_endpoint: Url,
    pub gke_endpoint: Url,
    pub access_token: Option<String>,
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let cache_path = match lookup(vars::CACHE_PATH) {
            Some(path) => PathBuf::from(path),
            None => default_cache_path()?,
        };

        let max_concurrency = match lookup(vars::MAX_CONCURRENCY) {
            Some(raw) => {
                let n: usize = raw
                    .parse()
                    .with_context(|| format!("{} must be a number, got {:?}", vars::MAX_CONCURRENCY, raw))?;
                (n > 0).then_some(n)
            }
            None => None,
        };

        let crm_endpoint = parse_endpoint(
            lookup(vars::CRM_ENDPOINT),
            endpoints::CLOUD_RESOURCE_MANAGER,
            vars::CRM_ENDPOINT,
        )?;
        let gke_endpoint = parse_endpoint(
            lookup(vars::GKE_ENDPOINT),
            endpoints::CONTAINER,
            vars::GKE_ENDPOINT,
        )?;

        let access_token = lookup(vars::ACCESS_TOKEN).filter(|t| !t.trim().is_empty());

        let http_timeout_secs: u64 = lookup(vars::HTTP_TIMEOUT_SECS)
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        Ok(Config {
            cache_path,
            max_concurrency,
            crm_endpoint,
            gke_endpoint,
            access_token,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}

/// `$HOME/.kube/cache/org-kubectl.json`
pub fn default_cache_path() -> Result<PathBuf> {
    let mut path = dirs::home_dir().context("could not determine home directory")?;
    path.extend(cache::DIR);
    path.push(cache::FILE_NAME);
    Ok(path)
}

fn parse_endpoint(value: Option<String>, default: &str, var: &str) -> Result<Url> {
    let raw = value.unwrap_or_else(|| default.to_string());
    // Url::join drops the last path segment unless the base ends with a slash
    let raw = if raw.ends_with('/') { raw } else { format!("{}/", raw) };
    Url::parse(&raw).with_context(|| format!("{} is not a valid URL: {}", var, raw))
}
