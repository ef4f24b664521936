// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for drag and drop: roles, session phases, and outcomes.
//!
//! ## Overview
//!
//! These types describe the protocol between the [coordinator](crate::coordinator)
//! and its callers. Outcomes are plain values: a declined pickup or a reclaimed
//! drop is a normal result, not an [`Error`](crate::Error).

/// Role a node can be registered under.
///
/// A node may hold several roles at once (for example a container that is both
/// [`Donor`](Role::Donor) and [`Absorber`](Role::Absorber)), but at most one
/// registration per role.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Role {
    /// The node can be picked up to start a session.
    Draggable,
    /// The node can give away draggable descendants.
    Donor,
    /// The node can take in dropped elements.
    Absorber,
}

impl Role {
    /// The single-role [`Roles`] set for this role.
    pub const fn as_roles(self) -> Roles {
        match self {
            Self::Draggable => Roles::DRAGGABLE,
            Self::Donor => Roles::DONOR,
            Self::Absorber => Roles::ABSORBER,
        }
    }
}

bitflags::bitflags! {
    /// Set of roles held by a node.
    ///
    /// Returned by [`Registry::roles_of`](crate::registry::Registry::roles_of).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Roles: u8 {
        /// See [`Role::Draggable`].
        const DRAGGABLE = 0b0000_0001;
        /// See [`Role::Donor`].
        const DONOR     = 0b0000_0010;
        /// See [`Role::Absorber`].
        const ABSORBER  = 0b0000_0100;
    }
}

/// Phase of the drag-and-drop state machine.
///
/// Success path: `Idle → Validating → Dragging → Resolving → Donating → Absorbed → Idle`.
///
/// Failure path: `Validating → Dragging → Resolving → Rejected → Reclaimed → Idle`
/// (`Rejected` is skipped when no candidate absorber exists).
///
/// `Discarded` is the last resort when the element cannot be put back anywhere.
///
/// Between calls, [`Coordinator::phase`](crate::coordinator::Coordinator::phase)
/// only ever reports `Idle` or `Dragging`. The other phases are transient: they
/// are passed through inside a single `pickup`, `release`, or `cancel` call, and
/// the terminal ones are reported through [`DropOutcome::phase`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Phase {
    /// No session.
    #[default]
    Idle,
    /// Transient: a pickup is being checked against the registry and the donor delegate.
    Validating,
    /// The element is detached and follows the pointer.
    Dragging,
    /// Transient: the drop target is being resolved and asked for acceptance.
    Resolving,
    /// Transient: the element is being moved into the accepting absorber.
    Donating,
    /// Terminal: the absorber took the element.
    Absorbed,
    /// Transient: the candidate absorber declined the element.
    Rejected,
    /// Terminal: the element is back at its origin.
    Reclaimed,
    /// Terminal: the element could not be placed anywhere and was left detached.
    Discarded,
}

impl Phase {
    /// Returns `true` for phases that end a session.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Absorbed | Self::Reclaimed | Self::Discarded)
    }
}

/// Why a pickup did not start a session.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DeclineReason {
    /// Another session is in progress.
    SessionActive,
    /// The element is not registered as draggable, or is not attached to a container.
    NotDraggable,
    /// No enabled donor was found among the element and its ancestors.
    NoDonor,
    /// The donor's delegate answered `false` to
    /// [`should_begin`](crate::delegate::DonorDelegate::should_begin).
    Vetoed,
    /// The element vanished from the hierarchy while the pickup was in progress.
    StaleReference,
}

/// Result of a pickup.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PickupOutcome<K> {
    /// A session started; the element is detached and dragging.
    Began {
        /// The donor that gave up the element.
        donor: K,
    },
    /// No session was created.
    Declined(DeclineReason),
}

impl<K> PickupOutcome<K> {
    /// Returns `true` if a session started.
    pub const fn began(&self) -> bool {
        matches!(self, Self::Began { .. })
    }
}

/// Why a session ended with the element back at its origin.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ReclaimReason {
    /// No qualifying absorber was under the drop point.
    NoAbsorber,
    /// The candidate absorber declined the element.
    Rejected,
    /// The gesture was cancelled.
    Cancelled,
    /// The absorber accepted but the element could not be inserted into it.
    AbsorberUnavailable,
}

/// Terminal result of a session.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DropOutcome<K> {
    /// The element now lives in the absorber.
    Absorbed {
        /// The donor that gave up the element.
        donor: K,
        /// The absorber that took it.
        absorber: K,
    },
    /// The element was put back into its origin container.
    Reclaimed {
        /// The donor that keeps the element.
        donor: K,
        /// Why the drop did not complete.
        reason: ReclaimReason,
    },
    /// Neither the absorber nor the origin container could take the element
    /// back; it was left detached.
    Discarded {
        /// The donor that gave up the element.
        donor: K,
    },
}

impl<K> DropOutcome<K> {
    /// Terminal phase corresponding to this outcome.
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Absorbed { .. } => Phase::Absorbed,
            Self::Reclaimed { .. } => Phase::Reclaimed,
            Self::Discarded { .. } => Phase::Discarded,
        }
    }
}
