// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Runs the user's kubectl command against every cluster of the selected projects.

pub mod credentials;
pub mod kubectl;

pub use credentials::{get_cluster_credentials, kubeconfig_has_context};
pub use kubectl::run_kubectl;

use crate::error::{OrgKubectlError, Result};
use crate::google::GkeClient;
use crate::types::ProjectId;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// Fetch credentials for and run kubectl on each cluster, project by project in sorted order.
/// Stops at the first failure. Returns the number of clusters the command ran on.
#[instrument(skip_all, fields(projects = projects.len()))]
pub async fn run_on_clusters(
    gke: &GkeClient,
    projects: &[ProjectId],
    kubectl_args: &[String],
    cancel: &CancellationToken,
) -> Result<usize> {
    let mut projects = projects.to_vec();
    projects.sort();

    let mut count = 0;
    for project in &projects {
        let clusters = or_cancelled(cancel, gke.list_clusters(project)).await?;
        if clusters.is_empty() {
            info!("No clusters in {}", project);
            continue;
        }

        for cluster in &clusters {
            if !cluster.is_running() {
                warn!(
                    "Cluster {} in {} is {}, trying anyway",
                    cluster.name,
                    project,
                    cluster.status.as_deref().unwrap_or("in an unknown state")
                );
            }

            or_cancelled(cancel, get_cluster_credentials(project, cluster)).await?;

            let context = cluster.context_name(project);
            if !kubeconfig_has_context(&context).await {
                warn!("Context {} not found in kubeconfig after fetching credentials", context);
            }

            run_kubectl(&context, kubectl_args, cancel).await?;
            count += 1;
        }
    }

    Ok(count)
}

/// Run `fut` unless `cancel` fires first
async fn or_cancelled<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(OrgKubectlError::Cancelled),
        result = fut => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::{ApiClient, TokenSource};
    use std::sync::Arc;
    use std::time::Duration;
    use url::Url;

    fn make_gke() -> GkeClient {
        let tokens = Arc::new(TokenSource::new(Some("token".to_string())));
        let api = ApiClient::new(tokens, Duration::from_secs(1)).unwrap();
        GkeClient::new(api, Url::parse("http://127.0.0.1:9/").unwrap())
    }

    #[tokio::test]
    async fn test_cancelled_before_cluster_listing() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = run_on_clusters(&make_gke(), &["p".to_string()], &[], &cancel).await;

        assert!(matches!(result, Err(OrgKubectlError::Cancelled)));
    }

    #[tokio::test]
    async fn test_or_cancelled_stops_pending_work() {
        let cancel = CancellationToken::new();
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            or_cancelled(&cancel, async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            }),
        )
        .await
        .expect("cancellation should win over the pending future");

        assert!(matches!(result, Err(OrgKubectlError::Cancelled)));
    }

    #[tokio::test]
    async fn test_or_cancelled_passes_result_through() {
        let result = or_cancelled(&CancellationToken::new(), async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
