// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the view tree: node identifiers, flags, local geometry, and errors.

use kurbo::Rect;

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across structural edits
/// (detach, attach, reorder) but becomes invalid once the node is destroyed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On [`destroy`](crate::Tree::destroy), the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and interaction.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible. Hidden nodes and their subtrees are skipped by hit testing.
        const VISIBLE     = 0b0000_0001;
        /// Node receives pointer interaction. Non-interactive nodes and their subtrees are skipped by hit testing.
        const INTERACTIVE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::INTERACTIVE
    }
}

/// Local data for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Frame in the parent's coordinate space (or world space for roots).
    ///
    /// A node's own content space has its origin at the frame's top-left corner,
    /// so a child frame of `(0, 0, 10, 10)` sits at the parent's origin.
    pub frame: Rect,
    /// Visibility and interaction flags.
    pub flags: NodeFlags,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            frame: Rect::ZERO,
            flags: NodeFlags::default(),
        }
    }
}

impl LocalNode {
    /// A visible, interactive node with the given frame.
    pub fn with_frame(frame: Rect) -> Self {
        Self {
            frame,
            ..Default::default()
        }
    }
}

/// Errors reported by structural edits.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The node id does not refer to a live node.
    #[error("node {0:?} is not alive")]
    Stale(NodeId),
    /// The edit would make a node its own ancestor.
    #[error("attaching {node:?} under {parent:?} would create a cycle")]
    Cycle {
        /// The node being attached.
        node: NodeId,
        /// The requested parent.
        parent: NodeId,
    },
}
