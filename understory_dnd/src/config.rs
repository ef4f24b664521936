// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinator policies.

/// Which point is hit-tested to find the drop target.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum DropAnchor {
    /// The pointer position carried by the release event.
    #[default]
    Pointer,
    /// The center of the dragged element's frame, moved along with the pointer.
    ElementCenter,
}

/// Where an absorbed element goes among the absorber's children.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Placement {
    /// Last child, drawn on top of its siblings.
    #[default]
    Front,
    /// First child, drawn below its siblings.
    Back,
}

/// Policies for the [coordinator](crate::coordinator::Coordinator).
///
/// The default hit-tests at the pointer and places absorbed elements in front.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Config {
    /// Point used to find the drop target.
    pub drop_anchor: DropAnchor,
    /// Insertion position inside the absorber.
    pub placement: Placement,
}
