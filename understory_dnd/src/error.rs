// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors.

use crate::types::Role;

/// Errors reported by registration and by [`Hierarchy`](crate::hierarchy::Hierarchy) edits.
///
/// Declined pickups and reclaimed drops are not errors; see
/// [`PickupOutcome`](crate::types::PickupOutcome) and [`DropOutcome`](crate::types::DropOutcome).
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// A donor or absorber was registered with a delegate that is not alive.
    ///
    /// The registration is rejected and the registry is left unchanged.
    #[error("{0:?} registration requires a live delegate")]
    InvalidDelegate(Role),
    /// A node or container is no longer part of the hierarchy.
    #[error("node is no longer part of the hierarchy")]
    StaleReference,
}
