// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Project discovery and ancestry-based scoping.
//!
//! Lists every project visible to the caller, resolves each project's
//! ancestor chain (from the persisted cache or the remote inventory) and
//! keeps the projects whose chain contains the target ancestor id.

pub mod cache;
pub mod coordinator;
pub mod lister;
pub mod resolver;

pub use cache::{AncestryCache, AncestryMap, CacheLoad};
pub use coordinator::{resolve_all, ResolveOptions};
pub use lister::list_projects;
pub use resolver::resolve;

use crate::error::{ApiError, Result};
use crate::types::{AncestorId, ProjectId, ProjectPage};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// The minimum surface needed from the cloud resource inventory
#[async_trait]
pub trait ResourceInventory: Send + Sync {
    /// Fetch one page of accessible projects, `page_token` is `None` for the first page
    async fn list_projects_page(
        &self,
        page_token: Option<&str>,
    ) -> std::result::Result<ProjectPage, ApiError>;

    /// Fetch the ancestor chain of a project, in the order the inventory reports it
    async fn get_ancestry(&self, project: &str) -> std::result::Result<Vec<AncestorId>, ApiError>;
}

/// List all projects and keep those with `target` in their ancestor chain
#[instrument(skip(inventory, cache, options, cancel))]
pub async fn find_child_projects(
    inventory: Arc<dyn ResourceInventory>,
    target: &str,
    cache: Arc<AncestryCache>,
    options: &ResolveOptions,
    cancel: &CancellationToken,
) -> Result<Vec<ProjectId>> {
    let projects = list_projects(inventory.as_ref(), cancel).await?;
    info!(
        "Looking for projects with ancestor {} among {} projects",
        target,
        projects.len()
    );

    let filtered = resolve_all(inventory, &projects, target, cache, options, cancel).await?;
    info!("Found {} projects under {}", filtered.len(), target);
    Ok(filtered)
}
