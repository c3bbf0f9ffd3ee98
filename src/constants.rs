// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read by `Config::from_env`
pub mod env {
    /// Overrides the ancestry cache location
    pub const CACHE_PATH: &str = "ORG_KUBECTL_CACHE";
    /// Caps the number of concurrent ancestry lookups (0 = unbounded)
    pub const MAX_CONCURRENCY: &str = "ORG_KUBECTL_MAX_CONCURRENCY";
    pub const CRM_ENDPOINT: &str = "ORG_KUBECTL_CRM_ENDPOINT";
    pub const GKE_ENDPOINT: &str = "ORG_KUBECTL_GKE_ENDPOINT";
    /// Bearer token to use instead of asking gcloud
    pub const ACCESS_TOKEN: &str = "ORG_KUBECTL_ACCESS_TOKEN";
    pub const HTTP_TIMEOUT_SECS: &str = "ORG_KUBECTL_HTTP_TIMEOUT_SECS";
}

/// Google Cloud API endpoints
pub mod endpoints {
    pub const CLOUD_RESOURCE_MANAGER: &str = "https://cloudresourcemanager.googleapis.com/";
    pub const CONTAINER: &str = "https://container.googleapis.com/";
}

/// Ancestry cache location, relative to the user's home directory
pub mod cache {
    pub const DIR: [&str; 2] = [".kube", "cache"];
    pub const FILE_NAME: &str = "org-kubectl.json";
}

/// Default per-request timeout for Google API calls
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// External binaries the dispatch loop shells out to
pub mod commands {
    pub const GCLOUD: &str = "gcloud";
    pub const KUBECTL: &str = "kubectl";
}
