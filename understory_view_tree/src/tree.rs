// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, structural edits, queries.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};

use crate::types::{Error, LocalNode, NodeFlags, NodeId};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level view tree.
///
/// Nodes are either attached (a root, or a child of an attached or detached
/// node) or detached. A detached node stays alive with its subtree intact but
/// is unreachable from any root, so it never shows up in hit tests.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    roots: Vec<NodeId>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

/// Result of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The front-most node under the point.
    pub node: NodeId,
    /// Path from root to node (inclusive).
    pub path: Vec<NodeId>,
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
}

impl Node {
    fn new(local: LocalNode) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            local,
        }
    }

    fn accepts_hits(&self) -> bool {
        self.local
            .flags
            .contains(NodeFlags::VISIBLE | NodeFlags::INTERACTIVE)
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Insert a new node as the last (front-most) child of `parent`, or as a
    /// new front-most root if `parent` is `None` or not alive.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generations[idx] = self.generations[idx].wrapping_add(1);
            self.nodes[idx] = Some(Node::new(local));
            idx
        } else {
            self.nodes.push(Some(Node::new(local)));
            self.generations.push(1);
            self.nodes.len() - 1
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId stores 32-bit slot indices."
        )]
        let id = NodeId::new(idx as u32, self.generations[idx]);
        match parent.filter(|p| self.is_alive(*p)) {
            Some(p) => self.link(id, p, usize::MAX),
            None => self.roots.push(id),
        }
        id
    }

    /// Destroy a node and its subtree, freeing their slots.
    ///
    /// Existing ids for destroyed nodes become stale. No-op for stale ids.
    pub fn destroy(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        self.unlink(id);
        let mut stack = Vec::from([id]);
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes[cur.idx()].take() {
                stack.extend(node.children);
                self.free_list.push(cur.idx());
            }
        }
    }

    /// Detach a node (with its subtree) from its parent or from the root list.
    ///
    /// The node stays alive and can be re-attached with [`Tree::attach`].
    /// Detaching an already detached node is a no-op.
    pub fn detach(&mut self, id: NodeId) -> Result<(), Error> {
        if !self.is_alive(id) {
            return Err(Error::Stale(id));
        }
        self.unlink(id);
        Ok(())
    }

    /// Attach `id` as a child of `parent` at `index`, clamped to the child count.
    ///
    /// The node is detached from its current position first. Its frame is kept
    /// as-is, so it is interpreted in the new parent's space; use
    /// [`Tree::attach_preserving_world`] to keep its on-screen position.
    pub fn attach(&mut self, id: NodeId, parent: NodeId, index: usize) -> Result<(), Error> {
        if !self.is_alive(id) {
            return Err(Error::Stale(id));
        }
        if !self.is_alive(parent) {
            return Err(Error::Stale(parent));
        }
        if id == parent || self.is_descendant_of(parent, id) {
            return Err(Error::Cycle { node: id, parent });
        }
        self.unlink(id);
        self.link(id, parent, index);
        Ok(())
    }

    /// Attach `id` under `parent` at `index` and set its frame so that it
    /// occupies `world_frame` in world space.
    pub fn attach_preserving_world(
        &mut self,
        id: NodeId,
        parent: NodeId,
        index: usize,
        world_frame: Rect,
    ) -> Result<(), Error> {
        self.attach(id, parent, index)?;
        let origin = self.content_origin(parent);
        self.set_frame(id, world_frame - origin);
        Ok(())
    }

    /// Update a node's frame (in its parent's space).
    pub fn set_frame(&mut self, id: NodeId, frame: Rect) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.frame = frame;
        }
    }

    /// Update flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.flags = flags;
        }
    }

    /// Hit test a world-space point. Returns the front-most accepting node.
    ///
    /// Roots and children are searched back to front (last is front-most).
    /// A node accepts a hit when it is [visible](NodeFlags::VISIBLE),
    /// [interactive](NodeFlags::INTERACTIVE), and its frame contains the point;
    /// descendants of a rejecting node are never considered.
    pub fn hit_test_point(&self, pt: Point) -> Option<Hit> {
        let node = self
            .roots
            .iter()
            .rev()
            .find_map(|&root| self.hit_recursive(root, pt))?;
        Some(Hit {
            node,
            path: self.path_to_root(node),
        })
    }

    /// Returns whether `id` could be reached by a hit test at `pt`: it is
    /// attached under a root, and it and every ancestor are visible,
    /// interactive, and contain the point.
    ///
    /// Occlusion by front-most siblings is not considered.
    pub fn accepts_point(&self, id: NodeId, pt: Point) -> bool {
        if !self.is_attached(id) {
            return false;
        }
        let mut local = pt;
        for node_id in self.path_to_root(id) {
            let node = self.node(node_id);
            if !node.accepts_hits() || !node.local.frame.contains(local) {
                return false;
            }
            local -= node.local.frame.origin().to_vec2();
        }
        true
    }

    /// Returns whether `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.generations.get(id.idx()).copied() == Some(id.generation())
            && self.nodes[id.idx()].is_some()
    }

    /// Returns whether `id` is reachable from a root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let top = self.path_to_root(id)[0];
        self.roots.contains(&top)
    }

    /// Parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of a node, back to front. Empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| &n.children)
    }

    /// Root nodes, back to front.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Position of `id` among its parent's children.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.node(parent).children.iter().position(|c| *c == id)
    }

    /// Local data of a node.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.node_opt(id).map(|n| &n.local)
    }

    /// Frame of a node in its parent's space.
    pub fn frame(&self, id: NodeId) -> Option<Rect> {
        self.local(id).map(|l| l.frame)
    }

    /// Frame of a node in world space.
    ///
    /// Detached subtrees are measured from their own top-most node, whose
    /// frame is taken as world space.
    pub fn world_frame(&self, id: NodeId) -> Option<Rect> {
        let frame = self.frame(id)?;
        let origin = self.parent(id).map_or(Vec2::ZERO, |p| self.content_origin(p));
        Some(frame + origin)
    }

    /// Returns whether `ancestor` is a proper ancestor of `id`.
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// Path from the top-most ancestor down to `id` (inclusive).
    ///
    /// Empty for stale ids.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut cur = Some(id);
        while let Some(n) = cur {
            out.push(n);
            cur = self.node(n).parent;
        }
        out.reverse();
        out
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Returns `true` if the tree has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- internals ---

    fn hit_recursive(&self, id: NodeId, pt: Point) -> Option<NodeId> {
        let node = self.node(id);
        if !node.accepts_hits() || !node.local.frame.contains(pt) {
            return None;
        }
        let local = pt - node.local.frame.origin().to_vec2();
        node.children
            .iter()
            .rev()
            .find_map(|&child| self.hit_recursive(child, local))
            .or(Some(id))
    }

    /// World-space offset of a node's content space.
    fn content_origin(&self, id: NodeId) -> Vec2 {
        self.path_to_root(id)
            .into_iter()
            .map(|n| self.node(n).local.frame.origin().to_vec2())
            .fold(Vec2::ZERO, |acc, v| acc + v)
    }

    // Callers guarantee liveness.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes[id.idx()].as_ref()
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes[id.idx()].as_mut()
    }

    fn link(&mut self, id: NodeId, parent: NodeId, index: usize) {
        let Some(p) = self.node_opt_mut(parent) else {
            return;
        };
        let at = index.min(p.children.len());
        p.children.insert(at, id);
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink(&mut self, id: NodeId) {
        let parent = self.node_opt_mut(id).and_then(|n| n.parent.take());
        match parent {
            Some(p) => {
                if let Some(p) = self.node_opt_mut(p) {
                    p.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(x0: f64, y0: f64, x1: f64, y1: f64) -> LocalNode {
        LocalNode::with_frame(Rect::new(x0, y0, x1, y1))
    }

    #[test]
    fn front_most_child_wins_hit_test() {
        let mut tree = Tree::new();
        let root = tree.insert(None, frame(0.0, 0.0, 200.0, 200.0));
        let a = tree.insert(Some(root), frame(10.0, 10.0, 60.0, 60.0));
        let b = tree.insert(Some(root), frame(40.0, 40.0, 120.0, 120.0));

        let hit = tree.hit_test_point(Point::new(50.0, 50.0)).unwrap();
        assert_eq!(hit.node, b, "last child is front-most");
        assert_eq!(hit.path, [root, b]);

        let hit = tree.hit_test_point(Point::new(20.0, 20.0)).unwrap();
        assert_eq!(hit.node, a);

        let hit = tree.hit_test_point(Point::new(150.0, 150.0)).unwrap();
        assert_eq!(hit.node, root);
        assert!(tree.hit_test_point(Point::new(250.0, 10.0)).is_none());
    }

    #[test]
    fn child_frames_are_relative_to_parent() {
        let mut tree = Tree::new();
        let root = tree.insert(None, frame(100.0, 100.0, 300.0, 300.0));
        let child = tree.insert(Some(root), frame(10.0, 10.0, 20.0, 20.0));

        assert_eq!(
            tree.world_frame(child),
            Some(Rect::new(110.0, 110.0, 120.0, 120.0))
        );
        assert_eq!(
            tree.hit_test_point(Point::new(115.0, 115.0)).map(|h| h.node),
            Some(child)
        );
        // Outside the parent means the child is never reached.
        assert_eq!(
            tree.hit_test_point(Point::new(15.0, 15.0)).map(|h| h.node),
            None
        );
    }

    #[test]
    fn hidden_and_inert_subtrees_are_skipped() {
        let mut tree = Tree::new();
        let root = tree.insert(None, frame(0.0, 0.0, 100.0, 100.0));
        let panel = tree.insert(Some(root), frame(0.0, 0.0, 50.0, 50.0));
        let leaf = tree.insert(Some(panel), frame(0.0, 0.0, 10.0, 10.0));
        let pt = Point::new(5.0, 5.0);
        assert_eq!(tree.hit_test_point(pt).map(|h| h.node), Some(leaf));
        assert!(tree.accepts_point(leaf, pt));

        tree.set_flags(panel, NodeFlags::VISIBLE);
        assert_eq!(tree.hit_test_point(pt).map(|h| h.node), Some(root));
        assert!(!tree.accepts_point(leaf, pt));

        tree.set_flags(panel, NodeFlags::INTERACTIVE);
        assert_eq!(tree.hit_test_point(pt).map(|h| h.node), Some(root));

        tree.set_flags(panel, NodeFlags::default());
        assert_eq!(tree.hit_test_point(pt).map(|h| h.node), Some(leaf));
    }

    #[test]
    fn detach_keeps_node_alive_and_attach_clamps_index() {
        let mut tree = Tree::new();
        let root = tree.insert(None, frame(0.0, 0.0, 100.0, 100.0));
        let a = tree.insert(Some(root), frame(0.0, 0.0, 10.0, 10.0));
        let b = tree.insert(Some(root), frame(10.0, 0.0, 20.0, 10.0));
        let c = tree.insert(Some(root), frame(20.0, 0.0, 30.0, 10.0));

        assert_eq!(tree.index_in_parent(b), Some(1));
        tree.detach(b).unwrap();
        assert!(tree.is_alive(b));
        assert!(!tree.is_attached(b));
        assert_eq!(tree.parent(b), None);
        assert_eq!(tree.children(root), [a, c]);
        assert!(tree.hit_test_point(Point::new(15.0, 5.0)).map(|h| h.node) == Some(root));

        tree.attach(b, root, 1).unwrap();
        assert_eq!(tree.children(root), [a, b, c]);

        tree.attach(b, root, 99).unwrap();
        assert_eq!(tree.children(root), [a, c, b]);
    }

    #[test]
    fn attach_preserving_world_converts_frame() {
        let mut tree = Tree::new();
        let root = tree.insert(None, frame(0.0, 0.0, 500.0, 500.0));
        let left = tree.insert(Some(root), frame(0.0, 0.0, 200.0, 500.0));
        let right = tree.insert(Some(root), frame(300.0, 0.0, 500.0, 500.0));
        let item = tree.insert(Some(left), frame(10.0, 10.0, 30.0, 30.0));

        let world = tree.world_frame(item).unwrap();
        tree.detach(item).unwrap();
        tree.attach_preserving_world(item, right, usize::MAX, world + Vec2::new(300.0, 0.0))
            .unwrap();
        assert_eq!(tree.parent(item), Some(right));
        assert_eq!(tree.frame(item), Some(Rect::new(10.0, 10.0, 30.0, 30.0)));
        assert_eq!(
            tree.world_frame(item),
            Some(Rect::new(310.0, 10.0, 330.0, 30.0))
        );
    }

    #[test]
    fn attach_rejects_cycles_and_stale_ids() {
        let mut tree = Tree::new();
        let root = tree.insert(None, frame(0.0, 0.0, 100.0, 100.0));
        let child = tree.insert(Some(root), frame(0.0, 0.0, 10.0, 10.0));
        assert_eq!(
            tree.attach(root, child, 0),
            Err(Error::Cycle {
                node: root,
                parent: child
            })
        );
        assert_eq!(
            tree.attach(root, root, 0),
            Err(Error::Cycle {
                node: root,
                parent: root
            })
        );

        tree.destroy(child);
        assert_eq!(tree.attach(child, root, 0), Err(Error::Stale(child)));
        assert_eq!(tree.detach(child), Err(Error::Stale(child)));
    }

    #[test]
    fn destroy_frees_subtree_and_generations_do_not_alias() {
        let mut tree = Tree::new();
        let root = tree.insert(None, frame(0.0, 0.0, 100.0, 100.0));
        let a = tree.insert(Some(root), frame(0.0, 0.0, 10.0, 10.0));
        let a1 = tree.insert(Some(a), frame(0.0, 0.0, 5.0, 5.0));
        assert_eq!(tree.len(), 3);

        tree.destroy(a);
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(a1));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);

        let reused = tree.insert(Some(root), frame(0.0, 0.0, 10.0, 10.0));
        assert_ne!(reused, a);
        assert_ne!(reused, a1);
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(a1));
        assert!(tree.is_alive(reused));
    }

    #[test]
    fn descendant_queries_follow_structure() {
        let mut tree = Tree::new();
        let root = tree.insert(None, frame(0.0, 0.0, 100.0, 100.0));
        let a = tree.insert(Some(root), frame(0.0, 0.0, 50.0, 50.0));
        let a1 = tree.insert(Some(a), frame(0.0, 0.0, 5.0, 5.0));
        assert!(tree.is_descendant_of(a1, root));
        assert!(tree.is_descendant_of(a1, a));
        assert!(!tree.is_descendant_of(a, a1));
        assert!(!tree.is_descendant_of(a, a));
        assert_eq!(tree.path_to_root(a1), [root, a, a1]);
    }
}
