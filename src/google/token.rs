// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bearer token acquisition

use crate::constants::commands::GCLOUD;
use crate::error::ApiError;
use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

/// Supplies the OAuth access token sent with every API request.
/// The token is fetched at most once per process.
#[derive(Debug, Default)]
pub struct TokenSource {
    token: OnceCell<String>,
}

impl TokenSource {
    /// Use a fixed token, or ask gcloud when `None`
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: match token {
                Some(t) => OnceCell::new_with(Some(t)),
                None => OnceCell::new(),
            },
        }
    }

    pub async fn token(&self) -> Result<&str, ApiError> {
        self.token
            .get_or_try_init(print_access_token)
            .await
            .map(String::as_str)
    }
}

#[instrument]
async fn print_access_token() -> Result<String, ApiError> {
    debug!("Requesting access token from gcloud");
    let output = Command::new(GCLOUD)
        .args(["auth", "print-access-token"])
        .output()
        .await
        .map_err(|e| ApiError::Token(format!("could not run {}: {}", GCLOUD, e)))?;

    if !output.status.success() {
        return Err(ApiError::Token(format!(
            "{} exited with {}: {}",
            GCLOUD,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(ApiError::Token(format!("{} returned an empty token", GCLOUD)));
    }
    Ok(token)
}
