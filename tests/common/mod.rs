//! Common test utilities and helpers
//!
//! This module provides shared functionality used across integration tests:
//! - Binary path resolution (via `get_ryml_build_binary`)
//! - A scripted build helper and install-tree fixtures (via `helpers`)

pub(crate) mod helpers;

// Re-export for convenient access
#[allow(unused_imports)]
pub(crate) use helpers::{MockHelper, get_ryml_build_binary};
