// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Persisted project → ancestor chain mapping.
//!
//! The cache is loaded once at startup, shared by reference between the
//! resolver tasks and saved once when resolution is over. Chains written
//! during a run are never re-fetched within that run.

use crate::error::{OrgKubectlError, Result};
use crate::types::{AncestorId, ProjectId};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Serialized form of the cache: project id → ancestor ids
pub type AncestryMap = BTreeMap<ProjectId, Vec<AncestorId>>;

/// Outcome of reading the cache file
#[derive(Debug)]
pub enum CacheLoad {
    Loaded(AncestryCache),
    /// No cache file yet
    Missing,
    /// The file exists but does not hold a valid mapping
    Corrupt(serde_json::Error),
}

impl CacheLoad {
    /// The loaded cache, or an empty one when the file was missing or corrupt
    pub fn into_cache(self) -> AncestryCache {
        match self {
            CacheLoad::Loaded(cache) => cache,
            CacheLoad::Missing | CacheLoad::Corrupt(_) => AncestryCache::new(),
        }
    }
}

/// Ancestry mapping guarded by a single lock
#[derive(Debug, Default)]
pub struct AncestryCache {
    entries: Mutex<AncestryMap>,
}

impl AncestryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(entries: AncestryMap) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Read the cache file. Only I/O errors other than "not found" are returned as errors.
    pub fn load(path: &Path) -> Result<CacheLoad> {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CacheLoad::Missing),
            Err(source) => {
                return Err(OrgKubectlError::CacheLoad {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        match serde_json::from_slice::<AncestryMap>(&data) {
            Ok(entries) => Ok(CacheLoad::Loaded(Self::from_map(entries))),
            Err(e) => Ok(CacheLoad::Corrupt(e)),
        }
    }

    /// Read the cache file, degrading to an empty cache on any failure
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(CacheLoad::Loaded(cache)) => {
                info!("Loaded ancestry cache with {} projects from {}", cache.len(), path.display());
                cache
            }
            Ok(CacheLoad::Missing) => {
                debug!("No ancestry cache at {}, starting empty", path.display());
                Self::new()
            }
            Ok(CacheLoad::Corrupt(e)) => {
                warn!("Ignoring corrupt ancestry cache {}: {}", path.display(), e);
                Self::new()
            }
            Err(e) => {
                warn!("Ignoring unreadable ancestry cache: {}", e);
                Self::new()
            }
        }
    }

    /// Write the cache as pretty-printed JSON, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_vec_pretty(&self.snapshot())?;
        let io_err = |source: std::io::Error| OrgKubectlError::CacheSave {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        // Write next to the target and rename so a crash never leaves a truncated cache
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;

        debug!("Saved ancestry cache with {} projects to {}", self.len(), path.display());
        Ok(())
    }

    /// Whether `target` is in the cached chain of `project`, `None` on a cache miss
    pub fn has_ancestor(&self, project: &str, target: &str) -> Option<bool> {
        self.lock()
            .get(project)
            .map(|chain| chain.iter().any(|a| a == target))
    }

    pub fn get(&self, project: &str) -> Option<Vec<AncestorId>> {
        self.lock().get(project).cloned()
    }

    /// Record the chain of `project`. A later write for the same project replaces the earlier one.
    pub fn insert(&self, project: impl Into<ProjectId>, chain: Vec<AncestorId>) {
        self.lock().insert(project.into(), chain);
    }

    /// Copy of the current mapping
    pub fn snapshot(&self) -> AncestryMap {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, AncestryMap> {
        // The map is never left half-updated, so a poisoned lock is still usable
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
