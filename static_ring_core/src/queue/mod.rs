// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The circular queue and its intrusive nodes.
//!
//! A queue is a single ring of caller-owned records. Each record embeds a
//! [`Node`] holding its `next`/`prev` slot indices and an `active` flag:
//!
//! - An identity ([`NodeId`]): the slot index in the backing storage.
//! - Ring links, fixed at construction in storage order and only rewritten
//!   when an interior node is [erased](StaticQueue::erase).
//! - The `active` flag, set while the record carries an enqueued payload.
//!
//! Two cursors move around the ring. `head` is the next slot to fill and
//! `tail` the oldest live node; the nodes from `tail` up to `head` form the
//! live span and the rest form the free region. When both cursors reference
//! the same node the queue is full if that node is active and empty if not.
//!
//! ```text
//!        tail              head
//!         │                 │
//!   ┌───┬─▼─┬───┬───┬───┬───▼───┬───┐
//!   │   │ A │ B │ C │ D │       │   │   ──► next
//!   └───┴───┴───┴───┴───┴───────┴───┘
//!         └── live span ──┘ └ free ─┘
//! ```
//!
//! Records are never moved. `put` hands out a [`Slot`] to fill in place and
//! `pop` hands the released record back for reading.

mod erase;
mod id;
mod node;
mod slot;
mod store;
mod traverse;
mod visit;

pub(crate) use id::ANCHOR;
pub use id::{INVALID, NodeId};
pub use node::{Linked, Node};
pub use slot::Slot;
pub use store::StaticQueue;
pub use traverse::Iter;
pub use visit::Visit;
