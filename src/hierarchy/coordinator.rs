// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Concurrent ancestry resolution over a project list.
//!
//! Cache hits are answered inline on the calling task. Every cache miss gets
//! its own task in a shared cancellation scope; the first failure cancels the
//! scope, aborts the remaining tasks and is returned instead of any partial
//! result. Lookups that completed before the failure stay in the cache.

use super::{resolve, AncestryCache, ResourceInventory};
use crate::error::{OrgKubectlError, Result};
use crate::types::ProjectId;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Tuning for `resolve_all`
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Maximum number of ancestry lookups in flight, `None` for one task per cache miss
    pub max_concurrency: Option<usize>,
}

/// Resolve every project against `target` and return the ones that match, in no particular order
#[instrument(skip(inventory, projects, cache, options, cancel), fields(projects = projects.len()))]
pub async fn resolve_all(
    inventory: Arc<dyn ResourceInventory>,
    projects: &[ProjectId],
    target: &str,
    cache: Arc<AncestryCache>,
    options: &ResolveOptions,
    cancel: &CancellationToken,
) -> Result<Vec<ProjectId>> {
    if cancel.is_cancelled() {
        return Err(OrgKubectlError::Cancelled);
    }

    let scope = cancel.child_token();
    let limiter = options
        .max_concurrency
        .map(|n| Arc::new(Semaphore::new(n.max(1))));
    let target: Arc<str> = Arc::from(target);

    let mut filtered = Vec::new();
    let mut tasks = JoinSet::new();

    for project in projects {
        match cache.has_ancestor(project, &target) {
            Some(true) => filtered.push(project.clone()),
            Some(false) => {}
            None => {
                tasks.spawn(resolve_task(
                    inventory.clone(),
                    project.clone(),
                    target.clone(),
                    cache.clone(),
                    limiter.clone(),
                    scope.clone(),
                ));
            }
        }
    }

    info!(
        "{} projects answered from cache, {} need an ancestry lookup",
        projects.len() - tasks.len(),
        tasks.len()
    );

    while let Some(joined) = tasks.join_next().await {
        match joined.map_err(OrgKubectlError::from).and_then(|r| r) {
            Ok((project, true)) => filtered.push(project),
            Ok((project, false)) => debug!("Project {} is not under {}", project, target),
            Err(e) => {
                warn!("Aborting ancestry resolution: {}", e);
                scope.cancel();
                tasks.shutdown().await;
                return Err(e);
            }
        }
    }

    Ok(filtered)
}

async fn resolve_task(
    inventory: Arc<dyn ResourceInventory>,
    project: ProjectId,
    target: Arc<str>,
    cache: Arc<AncestryCache>,
    limiter: Option<Arc<Semaphore>>,
    scope: CancellationToken,
) -> Result<(ProjectId, bool)> {
    let _permit = match limiter {
        Some(limiter) => tokio::select! {
            biased;
            _ = scope.cancelled() => return Err(OrgKubectlError::Cancelled),
            permit = limiter.acquire_owned() => {
                Some(permit.map_err(|_| OrgKubectlError::Cancelled)?)
            }
        },
        None => None,
    };

    tokio::select! {
        biased;
        _ = scope.cancelled() => Err(OrgKubectlError::Cancelled),
        is_match = resolve(inventory.as_ref(), &project, &target, &cache) => {
            Ok((project, is_match?))
        }
    }
}
