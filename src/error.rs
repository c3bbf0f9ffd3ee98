// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single call against a Google Cloud REST API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to obtain access token: {0}")]
    Token(String),

    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum OrgKubectlError {
    #[error("could not list projects: {0}")]
    ListProjects(#[source] ApiError),

    #[error("could not get ancestry for {project}: {source}")]
    AncestryLookup {
        project: String,
        #[source]
        source: ApiError,
    },

    #[error("could not read cache file {}: {source}", .path.display())]
    CacheLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write cache file {}: {source}", .path.display())]
    CacheSave {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode cache: {0}")]
    CacheEncode(#[from] serde_json::Error),

    #[error("could not list gke clusters in {project}: {source}")]
    ListClusters {
        project: String,
        #[source]
        source: ApiError,
    },

    #[error("could not get cluster credentials for {cluster} in {project}: {reason}")]
    Credentials {
        project: String,
        cluster: String,
        reason: String,
    },

    #[error("could not run kubectl for context {context}: {reason}")]
    Kubectl { context: String, reason: String },

    #[error("ancestry resolution was cancelled")]
    Cancelled,

    #[error("ancestry task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, OrgKubectlError>;
