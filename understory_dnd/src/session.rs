// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The record kept for one drag-and-drop session.
//!
//! A [`Session`] is created by the [coordinator](crate::coordinator::Coordinator)
//! when a pickup is accepted and dropped when the session ends, releasing the
//! payload with it. Callers can inspect it but never change it.

use kurbo::{Point, Rect, Vec2};

use crate::types::Phase;

/// Where the dragged element came from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Origin<K> {
    /// The container the element was detached from.
    pub container: K,
    /// The element's index among the container's children.
    pub index: usize,
    /// The element's frame at pickup, relative to the container's world-space
    /// origin. Reclaiming puts it back here even if the container has moved.
    pub frame: Rect,
}

/// State of the active session.
#[derive(Debug)]
pub struct Session<K, P> {
    pub(crate) element: K,
    pub(crate) donor: K,
    pub(crate) origin: Origin<K>,
    pub(crate) pickup_frame: Rect,
    pub(crate) pickup_point: Point,
    pub(crate) current_point: Point,
    pub(crate) absorber: Option<K>,
    pub(crate) payload: Option<P>,
    pub(crate) phase: Phase,
}

impl<K: Copy, P> Session<K, P> {
    pub(crate) fn new(
        element: K,
        donor: K,
        origin: Origin<K>,
        pickup_frame: Rect,
        point: Point,
    ) -> Self {
        Self {
            element,
            donor,
            origin,
            pickup_frame,
            pickup_point: point,
            current_point: point,
            absorber: None,
            payload: None,
            phase: Phase::Validating,
        }
    }

    /// The element being dragged.
    pub fn element(&self) -> K {
        self.element
    }

    /// The donor resolved at pickup.
    pub fn donor(&self) -> K {
        self.donor
    }

    /// Origin container, index, and frame captured at pickup.
    pub fn origin(&self) -> &Origin<K> {
        &self.origin
    }

    /// World-space frame of the element at pickup.
    pub fn pickup_frame(&self) -> Rect {
        self.pickup_frame
    }

    /// Pointer position at pickup.
    pub fn pickup_point(&self) -> Point {
        self.pickup_point
    }

    /// Last tracked pointer position.
    pub fn current_point(&self) -> Point {
        self.current_point
    }

    /// Pointer movement since pickup.
    pub fn translation(&self) -> Vec2 {
        self.current_point - self.pickup_point
    }

    /// Where the element is on screen now: its pickup frame moved along with
    /// the pointer.
    pub fn dragged_frame(&self) -> Rect {
        self.pickup_frame + self.translation()
    }

    /// The candidate absorber, once the drop has been resolved.
    pub fn absorber(&self) -> Option<K> {
        self.absorber
    }

    /// The payload supplied by the donor, if any.
    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }
}
