// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Hierarchy`](crate::hierarchy::Hierarchy) implementations for other Understory crates.
//!
//! Enabled via feature flags to keep the core small and `no_std` by default.

#[cfg(feature = "view_tree_adapter")]
pub mod view_tree;
