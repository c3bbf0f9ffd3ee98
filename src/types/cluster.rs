// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

/// A GKE cluster as returned by the container API
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GkeCluster {
    pub name: String,
    /// Zone or region the cluster runs in (deprecated by the API in favour of `location`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl GkeCluster {
    /// Zone to pass to gcloud, falling back to `location` for regional clusters
    pub fn zone_or_location(&self) -> &str {
        self.zone
            .as_deref()
            .filter(|z| !z.is_empty())
            .or(self.location.as_deref())
            .unwrap_or_default()
    }

    /// Name of the kubeconfig context that `gcloud container clusters get-credentials` writes
    pub fn context_name(&self, project: &str) -> String {
        format!("gke_{}_{}_{}", project, self.zone_or_location(), self.name)
    }

    /// Check if the cluster reports the RUNNING status
    pub fn is_running(&self) -> bool {
        self.status.as_deref() == Some("RUNNING")
    }
}
