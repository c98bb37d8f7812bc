// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for queue operations.
//!
//! This module provides a [`TraceSink`] trait with one method per event that
//! a [`StaticQueue`](crate::StaticQueue) emits. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing and the wrapper is
//! zero-sized. When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! Every event carries the `op_index` of the queue operation that produced
//! it. The index increases by one per public call that can mutate the queue,
//! including rejected calls, so a recording can be laid out on a timeline.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::error::QueueError;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which end of the queue an insertion used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PutEnd {
    /// Normal enqueue at the write cursor; dequeued last.
    Head,
    /// Insertion behind the read cursor; dequeued next.
    Tail,
}

/// Which operation a [`RejectEvent`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// [`put`](crate::StaticQueue::put).
    Put,
    /// [`put_first`](crate::StaticQueue::put_first).
    PutFirst,
    /// [`pop`](crate::StaticQueue::pop).
    Pop,
    /// [`peek`](crate::StaticQueue::peek).
    Peek,
    /// [`erase`](crate::StaticQueue::erase).
    Erase,
}

/// Which cursor repair an erase performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EraseKind {
    /// The node was the only live one; cursors returned to the anchor.
    Sole,
    /// The node was the oldest; `tail` advanced past it.
    Oldest,
    /// The node was the newest; `head` stepped back onto it.
    Newest,
    /// The node was spliced out and relinked behind `tail` as a free slot.
    Interior,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a slot is activated by `put` or `put_first`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PutEvent {
    /// Operation counter.
    pub op_index: u64,
    /// Slot that was activated.
    pub slot: u32,
    /// Which end was used.
    pub end: PutEnd,
    /// Number of active nodes afterwards.
    pub len: u32,
}

/// Emitted when `pop` releases the oldest node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopEvent {
    /// Operation counter.
    pub op_index: u64,
    /// Slot that was released.
    pub slot: u32,
    /// Number of active nodes afterwards.
    pub len: u32,
}

/// Emitted when a node is erased, directly or from `for_each`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EraseEvent {
    /// Operation counter.
    pub op_index: u64,
    /// Slot that was erased.
    pub slot: u32,
    /// Cursor repair that was applied.
    pub kind: EraseKind,
    /// Number of active nodes afterwards.
    pub len: u32,
}

/// Emitted by `clear`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearEvent {
    /// Operation counter.
    pub op_index: u64,
    /// Number of nodes that were active before the clear.
    pub released: u32,
}

/// Emitted when an operation fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RejectEvent {
    /// Operation counter.
    pub op_index: u64,
    /// The failed operation.
    pub op: OpKind,
    /// Why it failed.
    pub error: QueueError,
}

/// Emitted when `pop` or `peek` had to move `tail` past stale nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TailRepairEvent {
    /// Operation counter.
    pub op_index: u64,
    /// Inactive nodes skipped.
    pub skipped: u32,
    /// Whether the scan found nothing live and reset to the anchor.
    pub reset: bool,
}

/// Emitted when `for_each` finishes, however it finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisitSummary {
    /// Operation counter.
    pub op_index: u64,
    /// Nodes handed to the callback.
    pub visited: u32,
    /// Nodes erased on the callback's request.
    pub erased: u32,
    /// Whether traversal ended early (`Stop` or a callback error).
    pub stopped: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a queue.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a successful `put` or `put_first`.
    fn on_put(&mut self, e: &PutEvent) {
        _ = e;
    }

    /// Called after a successful `pop`.
    fn on_pop(&mut self, e: &PopEvent) {
        _ = e;
    }

    /// Called after a node is erased.
    fn on_erase(&mut self, e: &EraseEvent) {
        _ = e;
    }

    /// Called after `clear`.
    fn on_clear(&mut self, e: &ClearEvent) {
        _ = e;
    }

    /// Called when an operation is rejected.
    fn on_reject(&mut self, e: &RejectEvent) {
        _ = e;
    }

    /// Called when the read cursor had to skip stale nodes.
    fn on_tail_repair(&mut self, e: &TailRepairEvent) {
        _ = e;
    }

    /// Called when `for_each` returns.
    fn on_visit_summary(&mut self, s: &VisitSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Default for Tracer<'_> {
    fn default() -> Self {
        Self::none()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PutEvent`].
    #[inline]
    pub fn put(&mut self, e: &PutEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_put(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PopEvent`].
    #[inline]
    pub fn pop(&mut self, e: &PopEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pop(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`EraseEvent`].
    #[inline]
    pub fn erase(&mut self, e: &EraseEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_erase(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ClearEvent`].
    #[inline]
    pub fn clear(&mut self, e: &ClearEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_clear(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RejectEvent`].
    #[inline]
    pub fn reject(&mut self, e: &RejectEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reject(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TailRepairEvent`].
    #[inline]
    pub fn tail_repair(&mut self, e: &TailRepairEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tail_repair(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`VisitSummary`].
    #[inline]
    pub fn visit_summary(&mut self, s: &VisitSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_visit_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_put() -> PutEvent {
        PutEvent {
            op_index: 3,
            slot: 1,
            end: PutEnd::Head,
            len: 2,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_put(&sample_put());
        sink.on_reject(&RejectEvent {
            op_index: 4,
            op: OpKind::Pop,
            error: QueueError::Empty,
        });
        sink.on_visit_summary(&VisitSummary {
            op_index: 5,
            visited: 0,
            erased: 0,
            stopped: false,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.put(&sample_put());
        tracer.clear(&ClearEvent {
            op_index: 0,
            released: 0,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            slots: Vec<u32>,
        }
        impl TraceSink for RecordingSink {
            fn on_put(&mut self, e: &PutEvent) {
                self.slots.push(e.slot);
            }
        }

        let mut sink = RecordingSink { slots: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.put(&sample_put());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.slots, &[1]);
    }
}
