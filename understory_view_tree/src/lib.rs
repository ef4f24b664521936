// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view_tree --heading-base-level=0

//! Understory View Tree: a Kurbo-native tree of views with ordered children.
//!
//! This crate models the classic retained view hierarchy found in widget toolkits:
//! every node has a frame in its parent's coordinate space, an ordered list of children
//! (last is front-most), and flags that control whether it takes part in hit testing.
//!
//! - Structural edits keep node identity: [`Tree::detach`] takes a subtree out of the
//!   hierarchy without destroying it, and [`Tree::attach`] puts it back at any position.
//! - [`Tree::hit_test_point`] walks roots and children front to back and returns the
//!   deepest node that is visible, interactive, and contains the point.
//! - [`Tree::attach_preserving_world`] moves a node between parents while keeping its
//!   on-screen position, which is what drag-and-drop transfers need.
//!
//! ## Not a layout engine
//!
//! Frames are set by the caller. This crate does not measure or arrange anything.
//!
//! ## API overview
//!
//! - [`Tree`]: container managing nodes, structure, and queries.
//! - [`LocalNode`]: per-node frame and flags.
//! - [`NodeFlags`]: visibility and interaction controls.
//! - [`NodeId`]: generational handle of a node.
//! - [`Error`]: structural edit failures.
//!
//! ### Minimal usage
//!
//! ```
//! use understory_view_tree::{LocalNode, Tree};
//! use kurbo::{Point, Rect};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, LocalNode::with_frame(Rect::new(0.0, 0.0, 200.0, 200.0)));
//! let left = tree.insert(Some(root), LocalNode::with_frame(Rect::new(0.0, 0.0, 100.0, 200.0)));
//! let right = tree.insert(Some(root), LocalNode::with_frame(Rect::new(100.0, 0.0, 200.0, 200.0)));
//! let card = tree.insert(Some(left), LocalNode::with_frame(Rect::new(10.0, 10.0, 40.0, 40.0)));
//!
//! assert_eq!(tree.hit_test_point(Point::new(20.0, 20.0)).unwrap().node, card);
//!
//! // Move the card to the right column without changing where it appears.
//! let world = tree.world_frame(card).unwrap();
//! tree.attach_preserving_world(card, right, usize::MAX, world).unwrap();
//! assert_eq!(tree.parent(card), Some(right));
//! assert_eq!(tree.world_frame(card), Some(world));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Hit, Tree};
pub use types::{Error, LocalNode, NodeFlags, NodeId};
