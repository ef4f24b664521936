// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal in-memory hierarchy and recording delegates for unit tests.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::{Point, Rect, Vec2};

use crate::Error;
use crate::delegate::{AbsorberDelegate, DonorDelegate};
use crate::hierarchy::Hierarchy;

pub(crate) type Payload = &'static str;

/// Everything observable during a session, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    ShouldBegin(u32, u32),
    WillBegin(u32, u32),
    DidBegin(u32, u32),
    DidAbort(u32, u32),
    WillDonate(u32, u32),
    DidDonate(u32, u32),
    DidReclaim(u32, u32),
    CanAbsorb(u32, u32, Option<Payload>),
    DidAbsorb(u32, u32, Option<Payload>),
    Removed(u32),
    Inserted { node: u32, container: u32 },
}

pub(crate) type Log = Rc<RefCell<Vec<Call>>>;

struct Node {
    parent: Option<u32>,
    children: Vec<u32>,
    // World space keeps the mock simple.
    frame: Rect,
    visible: bool,
    interactive: bool,
}

/// Vec-backed hierarchy; node ids are slot indices and are never reused.
#[derive(Default)]
pub(crate) struct TestTree {
    nodes: Vec<Option<Node>>,
    roots: Vec<u32>,
    log: Option<Log>,
    /// Makes the next `insert` fail, as if the target had been torn down.
    pub(crate) fail_inserts: Cell<usize>,
    /// Makes the next `remove` fail.
    pub(crate) fail_removes: Cell<usize>,
}

impl TestTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_log(log: &Log) -> Self {
        Self {
            log: Some(Rc::clone(log)),
            ..Self::default()
        }
    }

    fn push(&mut self, parent: Option<u32>, frame: Rect) -> u32 {
        let id = u32::try_from(self.nodes.len()).unwrap();
        self.nodes.push(Some(Node {
            parent,
            children: Vec::new(),
            frame,
            visible: true,
            interactive: true,
        }));
        match parent {
            Some(p) => self.node_mut(p).children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub(crate) fn root(&mut self, frame: Rect) -> u32 {
        self.push(None, frame)
    }

    pub(crate) fn child(&mut self, parent: u32, frame: Rect) -> u32 {
        self.push(Some(parent), frame)
    }

    pub(crate) fn destroy(&mut self, id: u32) {
        let Some(node) = self.nodes[id as usize].take() else {
            return;
        };
        match node.parent {
            Some(p) => {
                if let Some(Some(p)) = self.nodes.get_mut(p as usize) {
                    p.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }
        for c in node.children {
            if let Some(Some(child)) = self.nodes.get_mut(c as usize) {
                child.parent = None;
            }
            self.destroy(c);
        }
    }

    /// Move `id` and its subtree, as a scroll or relayout would.
    pub(crate) fn move_by(&mut self, id: u32, delta: Vec2) {
        let node = self.node_mut(id);
        node.frame = node.frame + delta;
        for c in node.children.clone() {
            self.move_by(c, delta);
        }
    }

    pub(crate) fn set_visible(&mut self, id: u32, visible: bool) {
        self.node_mut(id).visible = visible;
    }

    pub(crate) fn set_interactive(&mut self, id: u32, interactive: bool) {
        self.node_mut(id).interactive = interactive;
    }

    pub(crate) fn children(&self, id: u32) -> &[u32] {
        self.node(id).map_or(&[], |n| &n.children)
    }

    fn node(&self, id: u32) -> Option<&Node> {
        self.nodes.get(id as usize)?.as_ref()
    }

    fn node_mut(&mut self, id: u32) -> &mut Node {
        self.nodes[id as usize].as_mut().unwrap()
    }

    fn hit(&self, id: u32, pt: Point) -> Option<u32> {
        let n = self.node(id)?;
        if !n.visible || !n.interactive || !n.frame.contains(pt) {
            return None;
        }
        n.children
            .iter()
            .rev()
            .find_map(|&c| self.hit(c, pt))
            .or(Some(id))
    }

    fn record(&self, call: Call) {
        if let Some(log) = &self.log {
            log.borrow_mut().push(call);
        }
    }
}

impl Hierarchy for TestTree {
    type Node = u32;

    fn is_alive(&self, node: u32) -> bool {
        self.node(node).is_some()
    }

    fn parent_of(&self, node: u32) -> Option<u32> {
        self.node(node)?.parent
    }

    fn hit_test(&self, point: Point) -> Option<u32> {
        self.roots.iter().rev().find_map(|&r| self.hit(r, point))
    }

    fn accepts_hit(&self, node: u32, point: Point) -> bool {
        let mut top = node;
        let mut cur = Some(node);
        while let Some(id) = cur {
            let Some(n) = self.node(id) else {
                return false;
            };
            if !n.visible || !n.interactive || !n.frame.contains(point) {
                return false;
            }
            top = id;
            cur = n.parent;
        }
        self.roots.contains(&top)
    }

    fn index_of(&self, node: u32, container: u32) -> Option<usize> {
        self.node(container)?.children.iter().position(|c| *c == node)
    }

    fn world_frame(&self, node: u32) -> Option<Rect> {
        self.node(node).map(|n| n.frame)
    }

    fn remove(&mut self, node: u32) -> Result<(), Error> {
        if self.fail_removes.get() > 0 {
            self.fail_removes.set(self.fail_removes.get() - 1);
            return Err(Error::StaleReference);
        }
        let parent = self.node(node).ok_or(Error::StaleReference)?.parent;
        match parent {
            Some(p) => self.node_mut(p).children.retain(|c| *c != node),
            None => self.roots.retain(|r| *r != node),
        }
        self.node_mut(node).parent = None;
        self.record(Call::Removed(node));
        Ok(())
    }

    fn insert(
        &mut self,
        node: u32,
        container: u32,
        index: usize,
        world_frame: Rect,
    ) -> Result<(), Error> {
        if self.fail_inserts.get() > 0 {
            self.fail_inserts.set(self.fail_inserts.get() - 1);
            return Err(Error::StaleReference);
        }
        if !self.is_alive(node) || !self.is_alive(container) {
            return Err(Error::StaleReference);
        }
        let c = self.node_mut(container);
        let at = index.min(c.children.len());
        c.children.insert(at, node);
        let n = self.node_mut(node);
        n.parent = Some(container);
        n.frame = world_frame;
        self.record(Call::Inserted { node, container });
        Ok(())
    }
}

/// Donor and absorber delegate that logs every callback.
#[derive(Default)]
pub(crate) struct Recorder {
    pub(crate) log: Log,
    pub(crate) veto: Cell<bool>,
    pub(crate) reject: Cell<bool>,
    pub(crate) payload: Cell<Option<Payload>>,
}

impl Recorder {
    pub(crate) fn with_log(log: &Log) -> Rc<Self> {
        Rc::new(Self {
            log: Rc::clone(log),
            ..Self::default()
        })
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

impl DonorDelegate<u32, Payload> for Recorder {
    fn should_begin(&self, donor: u32, element: u32) -> bool {
        self.record(Call::ShouldBegin(donor, element));
        !self.veto.get()
    }

    fn will_begin(&self, donor: u32, element: u32) -> Option<Payload> {
        self.record(Call::WillBegin(donor, element));
        self.payload.get()
    }

    fn did_begin(&self, donor: u32, element: u32) {
        self.record(Call::DidBegin(donor, element));
    }

    fn did_abort(&self, donor: u32, element: u32) {
        self.record(Call::DidAbort(donor, element));
    }

    fn will_donate(&self, donor: u32, element: u32) {
        self.record(Call::WillDonate(donor, element));
    }

    fn did_donate(&self, donor: u32, element: u32) {
        self.record(Call::DidDonate(donor, element));
    }

    fn did_reclaim(&self, donor: u32, element: u32) {
        self.record(Call::DidReclaim(donor, element));
    }
}

impl AbsorberDelegate<u32, Payload> for Recorder {
    fn can_absorb(&self, absorber: u32, element: u32, payload: Option<&Payload>) -> bool {
        self.record(Call::CanAbsorb(absorber, element, payload.copied()));
        !self.reject.get()
    }

    fn did_absorb(&self, absorber: u32, element: u32, payload: Option<&Payload>) {
        self.record(Call::DidAbsorb(absorber, element, payload.copied()));
    }
}
