// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! GKE cluster listing

use super::ApiClient;
use crate::error::{ApiError, OrgKubectlError, Result};
use crate::types::GkeCluster;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

#[derive(Deserialize, Debug, Default)]
struct ListClustersResponse {
    #[serde(default)]
    clusters: Vec<GkeCluster>,
}

/// Client for `container.googleapis.com`
pub struct GkeClient {
    api: ApiClient,
    endpoint: Url,
}

impl GkeClient {
    pub fn new(api: ApiClient, endpoint: Url) -> Self {
        Self { api, endpoint }
    }

    /// List the clusters of a project across all zones and regions
    #[instrument(skip(self))]
    pub async fn list_clusters(&self, project: &str) -> Result<Vec<GkeCluster>> {
        let to_err = |source: ApiError| OrgKubectlError::ListClusters {
            project: project.to_string(),
            source,
        };

        let url = self.clusters_url(project).map_err(to_err)?;
        let response: ListClustersResponse = self.api.get_json(url).await.map_err(to_err)?;

        debug!("Found {} clusters in {}", response.clusters.len(), project);
        Ok(response.clusters)
    }

    fn clusters_url(&self, project: &str) -> std::result::Result<Url, ApiError> {
        Ok(self
            .endpoint
            .join(&format!("v1/projects/{}/zones/-/clusters", project))?)
    }
}
