// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Donor and absorber delegates.
//!
//! ## Overview
//!
//! Delegates are told about the progress of a session so they can keep their own
//! state and visuals in step with the structural changes the coordinator makes.
//! Every method has a default, so a delegate only implements the callbacks it
//! cares about.
//!
//! Methods take `&self`: the registry holds delegates through [`Weak`] handles and
//! the coordinator calls them through a temporary strong handle. Delegates that
//! record state use interior mutability (`Cell`, `RefCell`).
//!
//! ## Callback order
//!
//! Acceptance: `will_begin`, detach, `did_begin`, `can_absorb`, `will_donate`,
//! insert into absorber, `did_absorb`, `did_donate`.
//!
//! Rejection: `will_begin`, detach, `did_begin`, `can_absorb` (if a candidate
//! exists), reinsert at origin, `did_reclaim`.
//!
//! Failed detach: `will_begin`, `did_abort`. No session is created.
//!
//! When a delegate has been dropped its callbacks are skipped, and
//! [`DonorDelegate::should_begin`] and [`AbsorberDelegate::can_absorb`] are taken
//! to be `true`.

use alloc::rc::{Rc, Weak};

/// Callbacks for a container that gives away draggable descendants.
///
/// `K` is the node identifier and `P` the payload type carried through a session.
pub trait DonorDelegate<K, P> {
    /// Asks whether `element` may be dragged out of `donor`. Defaults to `true`.
    fn should_begin(&self, donor: K, element: K) -> bool {
        let _ = (donor, element);
        true
    }

    /// Called before `element` is detached. The returned payload is kept for the
    /// session, shown to the absorber, and dropped when the session ends.
    fn will_begin(&self, donor: K, element: K) -> Option<P> {
        let _ = (donor, element);
        None
    }

    /// Called after `element` has been detached from `donor`.
    fn did_begin(&self, donor: K, element: K) {
        let _ = (donor, element);
    }

    /// Called instead of [`did_begin`](Self::did_begin) when `element` could not
    /// be detached after [`will_begin`](Self::will_begin).
    ///
    /// No session exists, the element was not moved, and the payload has
    /// already been dropped.
    fn did_abort(&self, donor: K, element: K) {
        let _ = (donor, element);
    }

    /// Called after an absorber accepted `element`, before it is inserted there.
    fn will_donate(&self, donor: K, element: K) {
        let _ = (donor, element);
    }

    /// Called after the absorber has been told it received `element`.
    fn did_donate(&self, donor: K, element: K) {
        let _ = (donor, element);
    }

    /// Called after `element` has been reinserted at its origin.
    fn did_reclaim(&self, donor: K, element: K) {
        let _ = (donor, element);
    }
}

/// Callbacks for a container that takes in dropped elements.
pub trait AbsorberDelegate<K, P> {
    /// Asks whether `absorber` accepts `element`. Defaults to `true`.
    ///
    /// Called before any change to the absorber. A `false` answer is final: the
    /// element goes back to its donor and no other absorber is asked.
    fn can_absorb(&self, absorber: K, element: K, payload: Option<&P>) -> bool {
        let _ = (absorber, element, payload);
        true
    }

    /// Called after `element` has been inserted into `absorber`.
    fn did_absorb(&self, absorber: K, element: K, payload: Option<&P>) {
        let _ = (absorber, element, payload);
    }
}

/// A strong handle to a registered delegate.
///
/// Returned by [`Registry::resolve_delegate`](crate::registry::Registry::resolve_delegate).
pub enum DelegateRef<K, P> {
    /// Delegate of a donor.
    Donor(Rc<dyn DonorDelegate<K, P>>),
    /// Delegate of an absorber.
    Absorber(Rc<dyn AbsorberDelegate<K, P>>),
}

impl<K, P> Clone for DelegateRef<K, P> {
    fn clone(&self) -> Self {
        match self {
            Self::Donor(d) => Self::Donor(Rc::clone(d)),
            Self::Absorber(a) => Self::Absorber(Rc::clone(a)),
        }
    }
}

impl<K, P> core::fmt::Debug for DelegateRef<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Donor(_) => f.write_str("DelegateRef::Donor(..)"),
            Self::Absorber(_) => f.write_str("DelegateRef::Absorber(..)"),
        }
    }
}

/// A non-owning handle to a registered delegate, as stored by the registry.
pub(crate) enum WeakDelegate<K, P> {
    None,
    Donor(Weak<dyn DonorDelegate<K, P>>),
    Absorber(Weak<dyn AbsorberDelegate<K, P>>),
}

impl<K, P> WeakDelegate<K, P> {
    pub(crate) fn upgrade(&self) -> Option<DelegateRef<K, P>> {
        match self {
            Self::None => None,
            Self::Donor(d) => d.upgrade().map(DelegateRef::Donor),
            Self::Absorber(a) => a.upgrade().map(DelegateRef::Absorber),
        }
    }
}
