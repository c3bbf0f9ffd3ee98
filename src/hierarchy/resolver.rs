// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Single-project ancestry resolution

use super::{AncestryCache, ResourceInventory};
use crate::error::{OrgKubectlError, Result};
use tracing::{debug, instrument};

/// Check whether `target` is an ancestor of `project`.
///
/// A cached chain answers without touching the network. On a miss the chain
/// is fetched, stored verbatim in the cache whether or not it matches, and
/// then tested. The project id is never tested on its own, only the chain entries.
#[instrument(skip(inventory, cache))]
pub async fn resolve(
    inventory: &dyn ResourceInventory,
    project: &str,
    target: &str,
    cache: &AncestryCache,
) -> Result<bool> {
    if let Some(is_match) = cache.has_ancestor(project, target) {
        debug!("Cache hit for {}", project);
        return Ok(is_match);
    }

    let ancestors = inventory
        .get_ancestry(project)
        .await
        .map_err(|source| OrgKubectlError::AncestryLookup {
            project: project.to_string(),
            source,
        })?;

    let mut is_match = false;
    for ancestor in &ancestors {
        debug!("Ancestry for {}: {}", project, ancestor);
        if ancestor == target {
            is_match = true;
        }
    }

    cache.insert(project, ancestors);
    Ok(is_match)
}
