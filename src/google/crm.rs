// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cloud Resource Manager v1 client

use super::ApiClient;
use crate::error::ApiError;
use crate::hierarchy::ResourceInventory;
use crate::types::{AncestorId, ProjectPage};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct ListProjectsResponse {
    #[serde(default)]
    projects: Vec<ProjectEntry>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ProjectEntry {
    project_id: String,
}

#[derive(Deserialize, Debug, Default)]
struct GetAncestryResponse {
    #[serde(default)]
    ancestor: Vec<Ancestor>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Ancestor {
    resource_id: ResourceId,
}

#[derive(Deserialize, Debug)]
struct ResourceId {
    id: String,
}

impl From<ListProjectsResponse> for ProjectPage {
    fn from(response: ListProjectsResponse) -> Self {
        ProjectPage {
            projects: response.projects.into_iter().map(|p| p.project_id).collect(),
            next_page_token: response.next_page_token,
        }
    }
}

impl GetAncestryResponse {
    fn into_chain(self) -> Vec<AncestorId> {
        self.ancestor.into_iter().map(|a| a.resource_id.id).collect()
    }
}

/// Resource inventory backed by `cloudresourcemanager.googleapis.com`
pub struct CloudResourceManager {
    api: ApiClient,
    endpoint: Url,
}

impl CloudResourceManager {
    pub fn new(api: ApiClient, endpoint: Url) -> Self {
        Self { api, endpoint }
    }

    fn projects_url(&self, page_token: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.endpoint.join("v1/projects")?;
        if let Some(token) = page_token {
            url.query_pairs_mut().append_pair("pageToken", token);
        }
        Ok(url)
    }

    fn ancestry_url(&self, project: &str) -> Result<Url, ApiError> {
        Ok(self
            .endpoint
            .join(&format!("v1/projects/{}:getAncestry", project))?)
    }
}

#[async_trait]
impl ResourceInventory for CloudResourceManager {
    #[instrument(skip(self))]
    async fn list_projects_page(&self, page_token: Option<&str>) -> Result<ProjectPage, ApiError> {
        let url = self.projects_url(page_token)?;
        let response: ListProjectsResponse = self.api.get_json(url).await?;
        Ok(response.into())
    }

    #[instrument(skip(self))]
    async fn get_ancestry(&self, project: &str) -> Result<Vec<AncestorId>, ApiError> {
        let url = self.ancestry_url(project)?;
        let response: GetAncestryResponse = self
            .api
            .post_json(url, &serde_json::json!({}))
            .await?;
        Ok(response.into_chain())
    }
}
