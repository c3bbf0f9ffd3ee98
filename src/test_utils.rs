// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking the cloud resource inventory.

use crate::error::ApiError;
use crate::hierarchy::ResourceInventory;
use crate::types::{AncestorId, ProjectId, ProjectPage};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// An in-memory inventory with scripted project pages and ancestry responses.
#[derive(Default)]
pub struct MockInventory {
    pages: Vec<Vec<ProjectId>>,
    failing_page: Option<usize>,
    ancestry: HashMap<ProjectId, Vec<AncestorId>>,
    failing: HashSet<ProjectId>,
    delay: Option<Duration>,
    project_delays: HashMap<ProjectId, Duration>,
    page_delay: Option<Duration>,
    page_calls: Mutex<Vec<Option<String>>>,
    ancestry_calls: Mutex<Vec<ProjectId>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these pages in order, linked by `page-N` tokens
    pub fn with_pages(mut self, pages: Vec<Vec<&str>>) -> Self {
        self.pages = pages
            .into_iter()
            .map(|page| page.into_iter().map(str::to_string).collect())
            .collect();
        self
    }

    /// Fail the request for the page at this index
    pub fn failing_page(mut self, index: usize) -> Self {
        self.failing_page = Some(index);
        self
    }

    pub fn with_ancestry(mut self, project: &str, ancestors: &[&str]) -> Self {
        self.ancestry.insert(
            project.to_string(),
            ancestors.iter().map(|a| a.to_string()).collect(),
        );
        self
    }

    /// Fail the ancestry lookup for this project, after its own delay if one is set
    pub fn failing_ancestry(mut self, project: &str) -> Self {
        self.failing.insert(project.to_string());
        self
    }

    /// Delay every successful ancestry lookup
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Delay this project's lookup, success or failure, instead of the shared delay
    pub fn with_project_delay(mut self, project: &str, delay: Duration) -> Self {
        self.project_delays.insert(project.to_string(), delay);
        self
    }

    /// Delay every page request
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = Some(delay);
        self
    }

    pub fn page_calls(&self) -> Vec<Option<String>> {
        self.page_calls.lock().unwrap().clone()
    }

    pub fn ancestry_calls(&self) -> Vec<ProjectId> {
        self.ancestry_calls.lock().unwrap().clone()
    }

    /// Highest number of ancestry lookups observed running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResourceInventory for MockInventory {
    async fn list_projects_page(&self, page_token: Option<&str>) -> Result<ProjectPage, ApiError> {
        self.page_calls
            .lock()
            .unwrap()
            .push(page_token.map(str::to_string));

        if let Some(delay) = self.page_delay {
            tokio::time::sleep(delay).await;
        }

        let index = page_token
            .and_then(|t| t.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);

        if self.failing_page == Some(index) {
            return Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "backend error".to_string(),
            });
        }

        let projects = self.pages.get(index).cloned().unwrap_or_default();
        let next_page_token = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));

        Ok(ProjectPage {
            projects,
            next_page_token,
        })
    }

    async fn get_ancestry(&self, project: &str) -> Result<Vec<AncestorId>, ApiError> {
        self.ancestry_calls.lock().unwrap().push(project.to_string());

        let project_delay = self.project_delays.get(project).copied();
        if let Some(delay) = project_delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.contains(project) {
            return Err(ApiError::Other(format!("injected failure for {}", project)));
        }

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay.filter(|_| project_delay.is_none()) {
            tokio::time::sleep(delay).await;
        }

        self.ancestry
            .get(project)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: StatusCode::FORBIDDEN,
                body: format!("no ancestry scripted for {}", project),
            })
    }
}
