// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture stream input and the transitions it produces.
//!
//! Gesture recognition is out of scope. A recognizer turns pointer input into
//! [`GestureEvent`]s and feeds them, in order, to
//! [`Coordinator::handle`](crate::coordinator::Coordinator::handle).

use kurbo::Point;

use crate::types::{DeclineReason, DropOutcome};

/// One event of a drag gesture, in world coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureEvent<K> {
    /// The user grabbed `element` at `point`.
    Pickup {
        /// The element under the pointer.
        element: K,
        /// Pointer position.
        point: Point,
    },
    /// The pointer moved.
    Move {
        /// Pointer position.
        point: Point,
    },
    /// The user let go.
    Release {
        /// Pointer position.
        point: Point,
    },
    /// The gesture was interrupted.
    Cancel,
}

/// What the coordinator did with a [`GestureEvent`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Transition<K> {
    /// A session started.
    Began {
        /// The donor that gave up the element.
        donor: K,
    },
    /// A pickup did not start a session.
    Declined(DeclineReason),
    /// The tracked pointer position was updated.
    Moved,
    /// The session ended.
    Finished(DropOutcome<K>),
    /// The event did not apply (a move, release, or cancel with no session).
    Ignored,
}
