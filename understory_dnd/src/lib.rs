// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dnd --heading-base-level=0

//! Understory DnD: a `no_std` coordinator for drag-and-drop sessions between containers.
//!
//! ## Overview
//!
//! This crate moves a view from one container to another by drag and drop.
//! Nodes take part under three roles:
//!
//! - a **draggable** element can be picked up;
//! - a **donor** container gives away draggable descendants;
//! - an **absorber** container takes in dropped elements.
//!
//! The [`Coordinator`](crate::coordinator::Coordinator) runs one session at a time.
//! At pickup it finds the nearest donor above the element, asks it for permission
//! and an optional payload, and detaches the element. At release it hit-tests the
//! drop point, asks the nearest absorber whether it accepts, and either moves the
//! element into it (keeping its on-screen position) or puts it back exactly where
//! it came from.
//!
//! ## Inputs
//!
//! - The view tree, through the [`Hierarchy`](crate::hierarchy::Hierarchy) trait.
//!   The coordinator never owns it; pass it to each call.
//! - Registrations, in the [`Registry`](crate::registry::Registry). Delegates are
//!   held weakly and may be dropped at any time.
//! - A stream of [`GestureEvent`](crate::gesture::GestureEvent)s from a gesture
//!   recognizer, in world coordinates.
//!
//! ## Outcomes
//!
//! Declined pickups and failed drops are ordinary results
//! ([`PickupOutcome`](crate::types::PickupOutcome), [`DropOutcome`](crate::types::DropOutcome)).
//! [`Error`] is reserved for misuse of the registry and failed hierarchy edits.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect};
//! use understory_dnd::coordinator::Coordinator;
//! use understory_dnd::delegate::{AbsorberDelegate, DonorDelegate};
//! use understory_dnd::types::{DropOutcome, PickupOutcome};
//! # use understory_dnd::Error;
//! # use understory_dnd::hierarchy::Hierarchy;
//! # #[derive(Default)]
//! # struct Board { parent: Vec<Option<u32>>, frames: Vec<Rect>, kids: Vec<Vec<u32>> }
//! # impl Board {
//! #     fn add(&mut self, parent: Option<u32>, frame: Rect) -> u32 {
//! #         let id = self.frames.len() as u32;
//! #         self.parent.push(parent);
//! #         self.frames.push(frame);
//! #         self.kids.push(Vec::new());
//! #         if let Some(p) = parent { self.kids[p as usize].push(id); }
//! #         id
//! #     }
//! # }
//! # impl Hierarchy for Board {
//! #     type Node = u32;
//! #     fn is_alive(&self, n: u32) -> bool { (n as usize) < self.frames.len() }
//! #     fn parent_of(&self, n: u32) -> Option<u32> { self.parent[n as usize] }
//! #     fn hit_test(&self, pt: Point) -> Option<u32> {
//! #         let mut cur = 0;
//! #         if !self.frames[0].contains(pt) { return None; }
//! #         while let Some(&c) = self.kids[cur as usize].iter().rev().find(|&&c| self.frames[c as usize].contains(pt)) { cur = c; }
//! #         Some(cur)
//! #     }
//! #     fn accepts_hit(&self, n: u32, pt: Point) -> bool { self.frames[n as usize].contains(pt) }
//! #     fn index_of(&self, n: u32, c: u32) -> Option<usize> { self.kids[c as usize].iter().position(|&k| k == n) }
//! #     fn world_frame(&self, n: u32) -> Option<Rect> { Some(self.frames[n as usize]) }
//! #     fn remove(&mut self, n: u32) -> Result<(), Error> {
//! #         if let Some(p) = self.parent[n as usize].take() { self.kids[p as usize].retain(|&k| k != n); }
//! #         Ok(())
//! #     }
//! #     fn insert(&mut self, n: u32, c: u32, i: usize, f: Rect) -> Result<(), Error> {
//! #         let kids = &mut self.kids[c as usize];
//! #         kids.insert(i.min(kids.len()), n);
//! #         self.parent[n as usize] = Some(c);
//! #         self.frames[n as usize] = f;
//! #         Ok(())
//! #     }
//! # }
//!
//! struct Column;
//! impl DonorDelegate<u32, &'static str> for Column {
//!     fn will_begin(&self, _donor: u32, _element: u32) -> Option<&'static str> {
//!         Some("card")
//!     }
//! }
//! impl AbsorberDelegate<u32, &'static str> for Column {
//!     fn can_absorb(&self, _absorber: u32, _element: u32, payload: Option<&&'static str>) -> bool {
//!         payload == Some(&"card")
//!     }
//! }
//!
//! let mut board = Board::default();
//! let root = board.add(None, Rect::new(0.0, 0.0, 200.0, 100.0));
//! let todo = board.add(Some(root), Rect::new(0.0, 0.0, 100.0, 100.0));
//! let done = board.add(Some(root), Rect::new(100.0, 0.0, 200.0, 100.0));
//! let card = board.add(Some(todo), Rect::new(10.0, 10.0, 90.0, 30.0));
//!
//! let column = Rc::new(Column);
//! let mut dnd: Coordinator<u32, &'static str> = Coordinator::new();
//! dnd.registry_mut().register_draggable(card);
//! dnd.registry_mut().register_donor(todo, Rc::downgrade(&column))?;
//! dnd.registry_mut().register_absorber(done, Rc::downgrade(&column))?;
//!
//! let began = dnd.pickup(&mut board, card, Point::new(20.0, 20.0));
//! assert_eq!(began, PickupOutcome::Began { donor: todo });
//! dnd.drag_to(Point::new(120.0, 20.0));
//! let outcome = dnd.release(&mut board, Point::new(120.0, 20.0));
//! assert_eq!(outcome, Some(DropOutcome::Absorbed { donor: todo, absorber: done }));
//! assert_eq!(board.parent_of(card), Some(done));
//! # Ok::<(), Error>(())
//! ```
//!
//! With the `view_tree_adapter` feature, `understory_view_tree::Tree` implements
//! [`Hierarchy`](crate::hierarchy::Hierarchy) directly.
//!
//! ## Features
//!
//! - `std` (default): forwards to dependencies.
//! - `tracing`: emits `debug` events for session transitions and `warn` events
//!   for hierarchy edits that failed mid-session.
//! - `view_tree_adapter`: [`Hierarchy`](crate::hierarchy::Hierarchy) for `understory_view_tree`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
#[cfg(test)]
mod test_tree;

pub mod adapters;
pub mod config;
pub mod coordinator;
pub mod delegate;
pub mod gesture;
pub mod hierarchy;
pub mod registry;
pub mod session;
pub mod types;

pub use error::Error;
