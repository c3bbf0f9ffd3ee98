// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Domain types shared between the hierarchy resolver and the dispatch loop.

pub mod cluster;
pub mod project;

pub use cluster::GkeCluster;
pub use project::{AncestorId, ProjectId, ProjectPage};
