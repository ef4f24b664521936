// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The view hierarchy as seen by the coordinator.
//!
//! ## Overview
//!
//! The coordinator never owns the view tree. It reads it through [`Hierarchy`]
//! (ancestry, hit testing, geometry) and performs exactly two kinds of edits:
//! detaching the dragged element at pickup and inserting it at drop.
//!
//! All coordinates are world-space [`kurbo`] values shared with the gesture stream.
//!
//! Enable the `view_tree_adapter` feature for an implementation over
//! `understory_view_tree::Tree`.

use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::Error;

/// Read access and structural edits over a live view tree.
///
/// Queries must be side-effect free. Stale nodes (destroyed or never known)
/// must be answered with `None`/`false`, and edits on them with
/// [`Error::StaleReference`], never with a panic.
pub trait Hierarchy {
    /// Node identifier.
    type Node: Copy + Eq + Debug;

    /// Returns whether `node` still exists (attached or detached).
    fn is_alive(&self, node: Self::Node) -> bool;

    /// Parent of `node`, or `None` for roots and detached nodes.
    fn parent_of(&self, node: Self::Node) -> Option<Self::Node>;

    /// Deepest front-most node under `point` that is visible, interactive, and
    /// contains the point.
    ///
    /// Every root is searched, front-most first; there is no root parameter.
    /// Detached nodes (including the element being dragged) are never hit.
    fn hit_test(&self, point: Point) -> Option<Self::Node>;

    /// Returns whether `node` is attached and could receive a hit at `point`:
    /// visible, interactive, and containing the point along its whole ancestry.
    fn accepts_hit(&self, node: Self::Node, point: Point) -> bool;

    /// Position of `node` among the children of `container`.
    fn index_of(&self, node: Self::Node, container: Self::Node) -> Option<usize>;

    /// World-space frame of `node`.
    fn world_frame(&self, node: Self::Node) -> Option<Rect>;

    /// Detach `node` from its container, keeping it (and its subtree) alive.
    fn remove(&mut self, node: Self::Node) -> Result<(), Error>;

    /// Insert `node` into `container` at `index` (clamped to the child count) so
    /// that it occupies `world_frame` on screen.
    fn insert(
        &mut self,
        node: Self::Node,
        container: Self::Node,
        index: usize,
        world_frame: Rect,
    ) -> Result<(), Error>;

    /// Proper ancestors of `node`, nearest first.
    fn ancestors(&self, node: Self::Node) -> Ancestors<'_, Self>
    where
        Self: Sized,
    {
        Ancestors {
            hierarchy: self,
            next: self.parent_of(node),
        }
    }

    /// `node` followed by its ancestors, nearest first.
    fn ancestors_or_self(&self, node: Self::Node) -> Ancestors<'_, Self>
    where
        Self: Sized,
    {
        Ancestors {
            hierarchy: self,
            next: Some(node).filter(|n| self.is_alive(*n)),
        }
    }

    /// Returns whether `ancestor` is a proper ancestor of `node`.
    fn is_descendant_of(&self, node: Self::Node, ancestor: Self::Node) -> bool
    where
        Self: Sized,
    {
        self.ancestors(node).any(|a| a == ancestor)
    }
}

/// Iterator over a chain of ancestors, nearest first.
///
/// Returned by [`Hierarchy::ancestors`] and [`Hierarchy::ancestors_or_self`].
pub struct Ancestors<'a, H: Hierarchy> {
    hierarchy: &'a H,
    next: Option<H::Node>,
}

impl<H: Hierarchy> Iterator for Ancestors<'_, H> {
    type Item = H::Node;

    fn next(&mut self) -> Option<H::Node> {
        let cur = self.next?;
        self.next = self.hierarchy.parent_of(cur);
        Some(cur)
    }
}

impl<H: Hierarchy> Debug for Ancestors<'_, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ancestors")
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}
