// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-capacity circular queue over caller-provided storage.
//!
//! `static_ring_core` provides a FIFO queue for environments without dynamic
//! allocation. The caller owns a slice of records, each embedding a
//! [`Node`]; the queue links those records into a ring once and afterwards
//! only flips flags and moves two cursors. It is `no_std` and never
//! allocates.
//!
//! # Example
//!
//! ```
//! use static_ring_core::{Node, StaticQueue, linked};
//!
//! #[derive(Default)]
//! struct Message {
//!     number: u32,
//!     node: Node,
//! }
//!
//! linked!(Message, node);
//!
//! let mut storage: [Message; 4] = Default::default();
//! let mut queue = StaticQueue::new(&mut storage)?;
//!
//! queue.put()?.number = 10;
//! queue.put()?.number = 11;
//! queue.put_first()?.number = 9;
//!
//! assert_eq!(queue.pop()?.number, 9);
//! assert_eq!(queue.pop()?.number, 10);
//! assert_eq!(queue.len(), 1);
//! # Ok::<(), static_ring_core::QueueError>(())
//! ```
//!
//! # Architecture
//!
//! **[`queue`]**: The ring itself: [`StaticQueue`], the embedded [`Node`],
//! the [`Linked`] access trait and its [`linked!`] helper macro. Operations
//! are split by concern: enqueue/dequeue, [`erase`](StaticQueue::erase),
//! callback traversal with [`for_each`](StaticQueue::for_each), and the
//! read-only [`iter`](StaticQueue::iter).
//!
//! **[`error`]**: [`QueueError`], returned by every fallible operation.
//!
//! **[`config`]**: [`QueueConfig`] presets choosing how much validation
//! `erase` performs.
//!
//! **[`audit`]**: [`StaticQueue::audit`], an O(capacity) structural check.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! operation instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(test)]
extern crate alloc;

pub mod audit;
pub mod config;
pub mod error;
pub mod queue;
pub mod trace;

pub use audit::{AuditError, AuditReport};
pub use config::{EraseCheck, QueueConfig};
pub use error::QueueError;
pub use queue::{INVALID, Iter, Linked, Node, NodeId, Slot, StaticQueue, Visit};
