// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Opaque project identifier, only ever compared for equality
pub type ProjectId = String;

/// Resource hierarchy node id (project, folder or organization)
pub type AncestorId = String;

/// One page of a project listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPage {
    pub projects: Vec<ProjectId>,
    /// Token for the next page, `None` (or empty) when this is the last page
    pub next_page_token: Option<String>,
}

impl ProjectPage {
    pub fn has_next(&self) -> bool {
        self.next_page_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}
