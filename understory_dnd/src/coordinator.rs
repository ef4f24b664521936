// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session coordinator.
//!
//! ## Overview
//!
//! [`Coordinator`] drives one drag-and-drop session at a time from pickup to a
//! terminal outcome. It owns the [`Registry`] and the active [`Session`], and
//! borrows the view tree through [`Hierarchy`] for each operation.
//!
//! ## Pickup
//!
//! A pickup begins a session when no session is active, the element is an
//! enabled draggable attached to a container, an enabled donor is found among
//! the element and its ancestors, and the donor's delegate does not veto.
//! The element's origin (container, index, and frame relative to the container)
//! is recorded, the donor is told `will_begin` (and may supply a payload), the
//! element is detached, then the donor is told `did_begin`.
//!
//! A declined pickup creates no session and, apart from `should_begin` on a
//! resolved donor, calls no delegate. The one exception is a detach that fails
//! after `will_begin`: the donor is then told `did_abort` instead of `did_begin`.
//!
//! ## Drop target
//!
//! The candidate absorber is the nearest node among the hit-test result and its
//! ancestors that is an enabled absorber and itself accepts a hit at the drop
//! point (visible, interactive, containing the point). There is exactly one
//! candidate: if it declines, the element goes back to its donor.
//!
//! ## Completion
//!
//! - Accepted: `will_donate`, insert into the absorber keeping the element's
//!   on-screen position, `did_absorb`, `did_donate`.
//! - Otherwise: reinsert at the origin container and index, at the same place
//!   relative to the container (which may have moved meanwhile), then `did_reclaim`.
//! - If the absorber insert fails the drop downgrades to a reclaim; if the
//!   reinsert fails too the element is left detached ([`DropOutcome::Discarded`]).
//!
//! Every session ends back in [`Phase::Idle`] with its payload dropped.

use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::Error;
use crate::config::{Config, DropAnchor, Placement};
use crate::gesture::{GestureEvent, Transition};
use crate::hierarchy::Hierarchy;
use crate::registry::Registry;
use crate::session::{Origin, Session};
use crate::types::{DeclineReason, DropOutcome, Phase, PickupOutcome, ReclaimReason, Role};

/// Drag-and-drop session coordinator.
///
/// ## Usage
///
/// - Register draggables, donors, and absorbers through [`Coordinator::registry_mut`].
/// - Feed gesture events with [`Coordinator::handle`], or call
///   [`pickup`](Coordinator::pickup), [`drag_to`](Coordinator::drag_to),
///   [`release`](Coordinator::release), and [`cancel`](Coordinator::cancel) directly.
/// - Pass the same hierarchy to every call of a session.
pub struct Coordinator<K, P = ()> {
    registry: Registry<K, P>,
    config: Config,
    session: Option<Session<K, P>>,
}

impl<K, P> Default for Coordinator<K, P> {
    fn default() -> Self {
        Self {
            registry: Registry::default(),
            config: Config::default(),
            session: None,
        }
    }
}

impl<K: Copy + Eq + Debug, P> Debug for Coordinator<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Coordinator")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + Debug, P> Coordinator<K, P> {
    /// Create an idle coordinator with an empty registry and default policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle coordinator with the given policies.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Registrations.
    pub fn registry(&self) -> &Registry<K, P> {
        &self.registry
    }

    /// Registrations, for registering and unregistering participants.
    pub fn registry_mut(&mut self) -> &mut Registry<K, P> {
        &mut self.registry
    }

    /// Current policies.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Replace the policies. Takes effect at the next drop.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// Current phase; [`Phase::Idle`] when no session is active.
    pub fn phase(&self) -> Phase {
        self.session.as_ref().map_or(Phase::Idle, Session::phase)
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&Session<K, P>> {
        self.session.as_ref()
    }

    /// Returns `true` while a session is active.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Returns whether [`Coordinator::pickup`] of `element` would begin a session.
    ///
    /// Lets a gesture recognizer decide whether to claim a touch. Asks the
    /// donor's [`should_begin`](crate::delegate::DonorDelegate::should_begin)
    /// but changes nothing.
    pub fn can_begin<H>(&self, hierarchy: &H, element: K) -> bool
    where
        H: Hierarchy<Node = K>,
    {
        self.session.is_none() && self.validate(hierarchy, element).is_ok()
    }

    /// The drop candidate at `point`, if any. See the [module docs](self).
    pub fn resolve_absorber<H>(&self, hierarchy: &H, point: Point) -> Option<K>
    where
        H: Hierarchy<Node = K>,
    {
        let hit = hierarchy.hit_test(point)?;
        hierarchy.ancestors_or_self(hit).find(|&n| {
            self.registry.is_enabled(n, Role::Absorber) && hierarchy.accepts_hit(n, point)
        })
    }

    /// Feed one gesture event.
    pub fn handle<H>(&mut self, hierarchy: &mut H, event: GestureEvent<K>) -> Transition<K>
    where
        H: Hierarchy<Node = K>,
    {
        match event {
            GestureEvent::Pickup { element, point } => {
                match self.pickup(hierarchy, element, point) {
                    PickupOutcome::Began { donor } => Transition::Began { donor },
                    PickupOutcome::Declined(reason) => Transition::Declined(reason),
                }
            }
            GestureEvent::Move { point } => {
                if self.drag_to(point) {
                    Transition::Moved
                } else {
                    Transition::Ignored
                }
            }
            GestureEvent::Release { point } => self
                .release(hierarchy, point)
                .map_or(Transition::Ignored, Transition::Finished),
            GestureEvent::Cancel => self
                .cancel(hierarchy)
                .map_or(Transition::Ignored, Transition::Finished),
        }
    }

    /// Try to begin a session by picking up `element` at `point`.
    pub fn pickup<H>(&mut self, hierarchy: &mut H, element: K, point: Point) -> PickupOutcome<K>
    where
        H: Hierarchy<Node = K>,
    {
        if self.session.is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!(element = ?element, "dnd pickup declined: session active");
            return PickupOutcome::Declined(DeclineReason::SessionActive);
        }
        self.registry.prune(hierarchy);

        let donor = match self.validate(hierarchy, element) {
            Ok(donor) => donor,
            Err(reason) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(element = ?element, ?reason, "dnd pickup declined");
                return PickupOutcome::Declined(reason);
            }
        };
        let Some((origin, pickup_frame)) = Self::capture_origin(hierarchy, element) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(element = ?element, "dnd pickup declined: no origin geometry");
            return PickupOutcome::Declined(DeclineReason::StaleReference);
        };
        let delegate = self.registry.donor_delegate(donor);

        let payload = delegate.as_ref().and_then(|d| d.will_begin(donor, element));
        if let Err(err) = hierarchy.remove(element) {
            #[cfg(feature = "tracing")]
            tracing::warn!(element = ?element, donor = ?donor, error = %err, "dnd pickup: detach failed");
            #[cfg(not(feature = "tracing"))]
            let _ = err;
            drop(payload);
            if let Some(d) = &delegate {
                d.did_abort(donor, element);
            }
            return PickupOutcome::Declined(DeclineReason::StaleReference);
        }

        let mut session = Session::new(element, donor, origin, pickup_frame, point);
        session.payload = payload;
        if let Some(d) = &delegate {
            d.did_begin(donor, element);
        }
        session.phase = Phase::Dragging;
        self.session = Some(session);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            element = ?element,
            donor = ?donor,
            container = ?origin.container,
            index = origin.index,
            "dnd session began"
        );
        PickupOutcome::Began { donor }
    }

    /// Track the pointer. Returns `false` when no session is active.
    ///
    /// No delegate is called.
    pub fn drag_to(&mut self, point: Point) -> bool {
        match &mut self.session {
            Some(session) => {
                session.current_point = point;
                true
            }
            None => false,
        }
    }

    /// End the session by dropping at `point`.
    ///
    /// Returns `None` when no session is active.
    pub fn release<H>(&mut self, hierarchy: &mut H, point: Point) -> Option<DropOutcome<K>>
    where
        H: Hierarchy<Node = K>,
    {
        let mut session = self.session.take()?;
        session.current_point = point;
        session.phase = Phase::Resolving;

        let anchor = match self.config.drop_anchor {
            DropAnchor::Pointer => point,
            DropAnchor::ElementCenter => session.dragged_frame().center(),
        };
        let Some(absorber) = self.resolve_absorber(hierarchy, anchor) else {
            return Some(self.reclaim(hierarchy, session, ReclaimReason::NoAbsorber));
        };
        session.absorber = Some(absorber);

        let absorber_delegate = self.registry.absorber_delegate(absorber);
        let accepted = absorber_delegate.as_ref().is_none_or(|a| {
            a.can_absorb(absorber, session.element, session.payload.as_ref())
        });
        if !accepted {
            session.phase = Phase::Rejected;
            #[cfg(feature = "tracing")]
            tracing::debug!(element = ?session.element, absorber = ?absorber, "dnd drop rejected");
            return Some(self.reclaim(hierarchy, session, ReclaimReason::Rejected));
        }

        session.phase = Phase::Donating;
        let (element, donor) = (session.element, session.donor);
        let donor_delegate = self.registry.donor_delegate(donor);
        if let Some(d) = &donor_delegate {
            d.will_donate(donor, element);
        }
        let index = match self.config.placement {
            Placement::Front => usize::MAX,
            Placement::Back => 0,
        };
        if let Err(err) = hierarchy.insert(element, absorber, index, session.dragged_frame()) {
            #[cfg(feature = "tracing")]
            tracing::warn!(element = ?element, absorber = ?absorber, error = %err, "dnd absorb failed");
            #[cfg(not(feature = "tracing"))]
            let _ = err;
            return Some(self.reclaim(hierarchy, session, ReclaimReason::AbsorberUnavailable));
        }
        if let Some(a) = &absorber_delegate {
            a.did_absorb(absorber, element, session.payload.as_ref());
        }
        if let Some(d) = &donor_delegate {
            d.did_donate(donor, element);
        }
        session.phase = Phase::Absorbed;
        Some(self.finish(hierarchy, session, DropOutcome::Absorbed { donor, absorber }))
    }

    /// End the session as if dropped where nothing accepts it.
    ///
    /// Returns `None` when no session is active.
    pub fn cancel<H>(&mut self, hierarchy: &mut H) -> Option<DropOutcome<K>>
    where
        H: Hierarchy<Node = K>,
    {
        let session = self.session.take()?;
        Some(self.reclaim(hierarchy, session, ReclaimReason::Cancelled))
    }

    fn validate<H>(&self, hierarchy: &H, element: K) -> Result<K, DeclineReason>
    where
        H: Hierarchy<Node = K>,
    {
        if !self.registry.is_draggable(element) || hierarchy.parent_of(element).is_none() {
            return Err(DeclineReason::NotDraggable);
        }
        let donor = self
            .registry
            .resolve_donor(hierarchy, element)
            .ok_or(DeclineReason::NoDonor)?;
        let allowed = self
            .registry
            .donor_delegate(donor)
            .is_none_or(|d| d.should_begin(donor, element));
        if allowed {
            Ok(donor)
        } else {
            Err(DeclineReason::Vetoed)
        }
    }

    /// Origin of `element` and its world-space frame.
    fn capture_origin<H>(hierarchy: &H, element: K) -> Option<(Origin<K>, Rect)>
    where
        H: Hierarchy<Node = K>,
    {
        let container = hierarchy.parent_of(element)?;
        let index = hierarchy.index_of(element, container)?;
        let frame = hierarchy.world_frame(element)?;
        let base = hierarchy.world_frame(container)?.origin().to_vec2();
        let origin = Origin {
            container,
            index,
            frame: frame - base,
        };
        Some((origin, frame))
    }

    fn reclaim<H>(
        &mut self,
        hierarchy: &mut H,
        mut session: Session<K, P>,
        reason: ReclaimReason,
    ) -> DropOutcome<K>
    where
        H: Hierarchy<Node = K>,
    {
        let (element, donor, origin) = (session.element, session.donor, session.origin);
        // The container may have moved since pickup.
        let reinserted = hierarchy
            .world_frame(origin.container)
            .ok_or(Error::StaleReference)
            .and_then(|base| {
                let frame = origin.frame + base.origin().to_vec2();
                hierarchy.insert(element, origin.container, origin.index, frame)
            });
        if let Err(err) = reinserted {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                element = ?element,
                container = ?origin.container,
                error = %err,
                "dnd reclaim failed; discarding dragged element"
            );
            #[cfg(not(feature = "tracing"))]
            let _ = err;
            session.phase = Phase::Discarded;
            return self.finish(hierarchy, session, DropOutcome::Discarded { donor });
        }
        session.phase = Phase::Reclaimed;
        if let Some(d) = self.registry.donor_delegate(donor) {
            d.did_reclaim(donor, element);
        }
        self.finish(hierarchy, session, DropOutcome::Reclaimed { donor, reason })
    }

    fn finish<H>(
        &mut self,
        hierarchy: &H,
        session: Session<K, P>,
        outcome: DropOutcome<K>,
    ) -> DropOutcome<K>
    where
        H: Hierarchy<Node = K>,
    {
        debug_assert_eq!(session.phase, outcome.phase(), "phase/outcome mismatch");
        #[cfg(feature = "tracing")]
        tracing::debug!(element = ?session.element, ?outcome, "dnd session ended");
        // Dropping the session releases the payload.
        drop(session);
        self.registry.prune(hierarchy);
        outcome
    }
}
