// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registration table: which nodes take part in drag and drop, and how.
//!
//! ## Overview
//!
//! The registry maps nodes to [roles](Role). Donor and absorber registrations
//! carry a delegate, held weakly: the registry never keeps a delegate alive, and
//! a delegate that has been dropped is simply skipped by the coordinator.
//!
//! Registrations for nodes that no longer exist in the hierarchy are ignored by
//! every lookup that takes a [`Hierarchy`] and are removed by [`Registry::prune`].
//!
//! ## Nesting
//!
//! Donors may be nested. The effective donor of an element is the nearest
//! enabled donor among the element and its ancestors ([`Registry::resolve_donor`]).

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;

use crate::Error;
use crate::delegate::{AbsorberDelegate, DelegateRef, DonorDelegate, WeakDelegate};
use crate::hierarchy::Hierarchy;
use crate::types::{Role, Roles};

struct Entry<K, P> {
    node: K,
    role: Role,
    delegate: WeakDelegate<K, P>,
    enabled: bool,
}

/// Table of draggable, donor, and absorber registrations.
pub struct Registry<K, P = ()> {
    entries: Vec<Entry<K, P>>,
}

impl<K, P> Default for Registry<K, P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: core::fmt::Debug, P> core::fmt::Debug for Registry<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut list = f.debug_list();
        for e in &self.entries {
            list.entry(&(&e.node, e.role, e.enabled));
        }
        list.finish()
    }
}

impl<K: Copy + Eq, P> Registry<K, P> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `node` as draggable. No-op if it already is.
    ///
    /// A donor ancestor is not required yet; it is looked up at pickup time.
    pub fn register_draggable(&mut self, node: K) {
        if self.position(node, Role::Draggable).is_none() {
            self.entries.push(Entry {
                node,
                role: Role::Draggable,
                delegate: WeakDelegate::None,
                enabled: true,
            });
        }
    }

    /// Make `container` a donor whose callbacks go to `delegate`.
    ///
    /// Replaces any previous donor registration of `container` (re-enabling it).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDelegate`] if `delegate` is not alive. The registry is left unchanged.
    pub fn register_donor<D>(&mut self, container: K, delegate: Weak<D>) -> Result<(), Error>
    where
        D: DonorDelegate<K, P> + 'static,
    {
        if delegate.strong_count() == 0 {
            return Err(Error::InvalidDelegate(Role::Donor));
        }
        let delegate: Weak<dyn DonorDelegate<K, P>> = delegate;
        self.upsert(container, Role::Donor, WeakDelegate::Donor(delegate));
        Ok(())
    }

    /// Make `container` an absorber whose callbacks go to `delegate`.
    ///
    /// Replaces any previous absorber registration of `container` (re-enabling it).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDelegate`] if `delegate` is not alive. The registry is left unchanged.
    pub fn register_absorber<A>(&mut self, container: K, delegate: Weak<A>) -> Result<(), Error>
    where
        A: AbsorberDelegate<K, P> + 'static,
    {
        if delegate.strong_count() == 0 {
            return Err(Error::InvalidDelegate(Role::Absorber));
        }
        let delegate: Weak<dyn AbsorberDelegate<K, P>> = delegate;
        self.upsert(container, Role::Absorber, WeakDelegate::Absorber(delegate));
        Ok(())
    }

    /// Remove the `role` registration of `node`.
    ///
    /// Returns whether a registration was removed; calling it again is a no-op.
    pub fn unregister(&mut self, node: K, role: Role) -> bool {
        match self.position(node, role) {
            Some(i) => {
                self.entries.swap_remove(i);
                true
            }
            None => false,
        }
    }

    /// Remove every registration of `node`. Returns the roles it held.
    pub fn unregister_all(&mut self, node: K) -> Roles {
        let roles = self.roles_of(node);
        self.entries.retain(|e| e.node != node);
        roles
    }

    /// Enable or disable the `role` registration of `node`.
    ///
    /// Disabled donors are skipped by [`Registry::resolve_donor`], disabled
    /// absorbers are never drop candidates, and disabled draggables cannot be
    /// picked up. Returns `false` if `node` has no such registration.
    pub fn set_enabled(&mut self, node: K, role: Role, enabled: bool) -> bool {
        match self.position(node, role) {
            Some(i) => {
                self.entries[i].enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Returns whether `node` holds an enabled `role` registration.
    pub fn is_enabled(&self, node: K, role: Role) -> bool {
        self.position(node, role)
            .is_some_and(|i| self.entries[i].enabled)
    }

    /// Returns whether `node` is registered (and enabled) as draggable.
    pub fn is_draggable(&self, node: K) -> bool {
        self.is_enabled(node, Role::Draggable)
    }

    /// All roles registered for `node`, enabled or not.
    pub fn roles_of(&self, node: K) -> Roles {
        self.entries
            .iter()
            .filter(|e| e.node == node)
            .fold(Roles::empty(), |acc, e| acc | e.role.as_roles())
    }

    /// Nearest enabled donor among `node` and its ancestors.
    pub fn resolve_donor<H>(&self, hierarchy: &H, node: K) -> Option<K>
    where
        H: Hierarchy<Node = K>,
    {
        hierarchy
            .ancestors_or_self(node)
            .find(|n| self.is_enabled(*n, Role::Donor))
    }

    /// Live delegate registered for `container` under `role`.
    ///
    /// Returns `None` for draggable registrations, unknown containers, and
    /// delegates that have been dropped.
    pub fn resolve_delegate(&self, container: K, role: Role) -> Option<DelegateRef<K, P>> {
        let i = self.position(container, role)?;
        self.entries[i].delegate.upgrade()
    }

    /// Live donor delegate of `container`.
    pub fn donor_delegate(&self, container: K) -> Option<Rc<dyn DonorDelegate<K, P>>> {
        match self.resolve_delegate(container, Role::Donor)? {
            DelegateRef::Donor(d) => Some(d),
            DelegateRef::Absorber(_) => None,
        }
    }

    /// Live absorber delegate of `container`.
    pub fn absorber_delegate(&self, container: K) -> Option<Rc<dyn AbsorberDelegate<K, P>>> {
        match self.resolve_delegate(container, Role::Absorber)? {
            DelegateRef::Absorber(a) => Some(a),
            DelegateRef::Donor(_) => None,
        }
    }

    /// Drop registrations of nodes that `hierarchy` no longer knows.
    ///
    /// Returns the number of registrations removed.
    pub fn prune<H>(&mut self, hierarchy: &H) -> usize
    where
        H: Hierarchy<Node = K>,
    {
        let before = self.entries.len();
        self.entries.retain(|e| hierarchy.is_alive(e.node));
        before - self.entries.len()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every registration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, node: K, role: Role) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.node == node && e.role == role)
    }

    fn upsert(&mut self, node: K, role: Role, delegate: WeakDelegate<K, P>) {
        let entry = Entry {
            node,
            role,
            delegate,
            enabled: true,
        };
        match self.position(node, role) {
            Some(i) => self.entries[i] = entry,
            None => self.entries.push(entry),
        }
    }
}
