// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use crate::constants::commands::KUBECTL;
use crate::error::{OrgKubectlError, Result};
use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub fn kubectl_args(context: &str, extra: &[String]) -> Vec<String> {
    let mut args = vec!["--context".to_string(), context.to_string()];
    args.extend(extra.iter().cloned());
    args
}

/// Run kubectl against `context`, sharing this process's stdio
pub async fn run_kubectl(context: &str, extra: &[String], cancel: &CancellationToken) -> Result<()> {
    let args = kubectl_args(context, extra);
    info!("{} {}", KUBECTL, args.join(" "));

    let to_err = |reason: String| OrgKubectlError::Kubectl {
        context: context.to_string(),
        reason,
    };

    let mut child = Command::new(KUBECTL)
        .args(&args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| to_err(format!("could not start {}: {}", KUBECTL, e)))?;

    let waited = tokio::select! {
        status = child.wait() => Some(status),
        _ = cancel.cancelled() => None,
    };
    let Some(status) = waited else {
        let _ = child.kill().await;
        return Err(OrgKubectlError::Cancelled);
    };
    let status = status.map_err(|e| to_err(e.to_string()))?;

    if !status.success() {
        return Err(to_err(format!("exited with {}", status)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kubectl_args_prepends_context() {
        let extra = vec!["get".to_string(), "pods".to_string(), "-A".to_string()];
        assert_eq!(
            kubectl_args("gke_p_z_c", &extra),
            vec!["--context", "gke_p_z_c", "get", "pods", "-A"]
        );
    }

    #[test]
    fn test_kubectl_args_without_extra() {
        assert_eq!(kubectl_args("ctx", &[]), vec!["--context", "ctx"]);
    }
}
