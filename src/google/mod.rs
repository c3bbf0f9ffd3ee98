// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Minimal REST clients for the Google Cloud APIs the tool talks to.

pub mod api;
pub mod crm;
pub mod gke;
pub mod token;

pub use api::ApiClient;
pub use crm::CloudResourceManager;
pub use gke::GkeClient;
pub use token::TokenSource;
