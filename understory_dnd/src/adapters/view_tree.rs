// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Hierarchy`] for Understory View Tree.
//!
//! ## Feature
//!
//! Enable with `view_tree_adapter`.
//!
//! ## Notes
//!
//! Frames in the view tree are parent-relative. Insertion goes through
//! [`Tree::attach_preserving_world`], so an absorbed element keeps the on-screen
//! position it had under the pointer and a reclaimed one returns to its
//! original frame.
//!
//! Every edit failure (stale node, or an insert that would create a cycle) is
//! reported as [`Error::StaleReference`].

use kurbo::{Point, Rect};
use understory_view_tree::{NodeId, Tree};

use crate::Error;
use crate::hierarchy::Hierarchy;

impl Hierarchy for Tree {
    type Node = NodeId;

    fn is_alive(&self, node: NodeId) -> bool {
        Self::is_alive(self, node)
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node)
    }

    fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.hit_test_point(point).map(|hit| hit.node)
    }

    fn accepts_hit(&self, node: NodeId, point: Point) -> bool {
        self.accepts_point(node, point)
    }

    fn index_of(&self, node: NodeId, container: NodeId) -> Option<usize> {
        if self.parent(node) != Some(container) {
            return None;
        }
        self.index_in_parent(node)
    }

    fn world_frame(&self, node: NodeId) -> Option<Rect> {
        Self::world_frame(self, node)
    }

    fn remove(&mut self, node: NodeId) -> Result<(), Error> {
        self.detach(node).map_err(|_| Error::StaleReference)
    }

    fn insert(
        &mut self,
        node: NodeId,
        container: NodeId,
        index: usize,
        world_frame: Rect,
    ) -> Result<(), Error> {
        self.attach_preserving_world(node, container, index, world_frame)
            .map_err(|_| Error::StaleReference)
    }
}
