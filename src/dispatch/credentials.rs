// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-cluster credential acquisition through gcloud

use crate::constants::commands::GCLOUD;
use crate::error::{OrgKubectlError, Result};
use crate::types::GkeCluster;
use kube::config::Kubeconfig;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Arguments for `gcloud container clusters get-credentials`
pub fn get_credentials_args(project: &str, cluster: &GkeCluster) -> Vec<String> {
    vec![
        "--project".to_string(),
        project.to_string(),
        "container".to_string(),
        "clusters".to_string(),
        "get-credentials".to_string(),
        cluster.name.clone(),
        "--zone".to_string(),
        cluster.zone_or_location().to_string(),
    ]
}

/// Write the cluster's credentials into the user's kubeconfig
#[instrument(skip(cluster), fields(cluster = %cluster.name))]
pub async fn get_cluster_credentials(project: &str, cluster: &GkeCluster) -> Result<()> {
    let to_err = |reason: String| OrgKubectlError::Credentials {
        project: project.to_string(),
        cluster: cluster.name.clone(),
        reason,
    };

    let output = Command::new(GCLOUD)
        .args(get_credentials_args(project, cluster))
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| to_err(format!("could not run {}: {}", GCLOUD, e)))?;

    if !output.status.success() {
        return Err(to_err(format!(
            "{} exited with {}: {}",
            GCLOUD,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    debug!("Fetched credentials for {} in {}", cluster.name, project);
    Ok(())
}

/// Check whether the active kubeconfig defines `context`.
/// The kubeconfig is read on the blocking pool.
pub async fn kubeconfig_has_context(context: &str) -> bool {
    match tokio::task::spawn_blocking(Kubeconfig::read).await {
        Ok(Ok(config)) => contains_context(&config, context),
        Ok(Err(e)) => {
            debug!("Could not read kubeconfig: {}", e);
            false
        }
        Err(e) => {
            debug!("Kubeconfig read task failed: {}", e);
            false
        }
    }
}

fn contains_context(config: &Kubeconfig, context: &str) -> bool {
    config.contexts.iter().any(|c| c.name == context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_cluster(name: &str, zone: &str) -> GkeCluster {
        GkeCluster {
            name: name.to_string(),
            zone: Some(zone.to_string()),
            location: Some(zone.to_string()),
            status: Some("RUNNING".to_string()),
        }
    }

    #[test]
    fn test_get_credentials_args() {
        let args = get_credentials_args("my-project", &make_cluster("prod", "europe-west4-a"));
        assert_eq!(
            args,
            vec![
                "--project",
                "my-project",
                "container",
                "clusters",
                "get-credentials",
                "prod",
                "--zone",
                "europe-west4-a"
            ]
        );
    }

    #[test]
    fn test_contains_context() {
        let yaml = r#"
apiVersion: v1
kind: Config
clusters: []
users: []
contexts:
- name: gke_my-project_europe-west4-a_prod
  context:
    cluster: gke_my-project_europe-west4-a_prod
    user: gke_my-project_europe-west4-a_prod
"#;
        let config = Kubeconfig::from_yaml(yaml).unwrap();

        assert!(contains_context(&config, "gke_my-project_europe-west4-a_prod"));
        assert!(!contains_context(&config, "gke_my-project_europe-west4-a_stage"));
    }

    #[tokio::test]
    async fn test_kubeconfig_has_context_reads_kubeconfig_env() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config");
        std::fs::write(
            &path,
            "apiVersion: v1\nkind: Config\ncontexts:\n- name: gke_p_z_c\n  context:\n    cluster: gke_p_z_c\n    user: gke_p_z_c\n",
        )
        .unwrap();
        std::env::set_var("KUBECONFIG", &path);

        assert!(kubeconfig_has_context("gke_p_z_c").await);
        assert!(!kubeconfig_has_context("gke_p_z_other").await);
    }
}
