// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Paginated project listing

use super::ResourceInventory;
use crate::error::{OrgKubectlError, Result};
use crate::types::ProjectId;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// List every project visible to the caller, following pagination to the end.
/// Either all pages are collected or an error is returned. No further page is
/// requested once `cancel` fires.
#[instrument(skip(inventory, cancel))]
pub async fn list_projects(
    inventory: &dyn ResourceInventory,
    cancel: &CancellationToken,
) -> Result<Vec<ProjectId>> {
    let mut projects = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(OrgKubectlError::Cancelled),
            page = inventory.list_projects_page(page_token.as_deref()) => {
                page.map_err(OrgKubectlError::ListProjects)?
            }
        };

        debug!("Received page with {} projects", page.projects.len());
        let has_next = page.has_next();
        projects.extend(page.projects);

        if !has_next {
            break;
        }
        page_token = page.next_page_token;
    }

    Ok(projects)
}
