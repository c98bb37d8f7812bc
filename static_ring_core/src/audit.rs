// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural self-check for a queue.
//!
//! [`StaticQueue::audit`] walks the whole ring and verifies the properties
//! every operation relies on:
//!
//! - each `next` link stays inside the storage and is mirrored by `prev`,
//! - following `next` from the anchor visits every node exactly once,
//! - the running count matches the number of active flags,
//! - coinciding cursors agree with the count (full or empty),
//! - no active node lies in the free region between `head` and `tail`.
//!
//! Auditing is O(capacity) and never modifies the queue. Tests and harnesses
//! call it after every step; production code may call it after restoring
//! storage from an untrusted source.

use core::fmt;

use crate::queue::{ANCHOR, Linked, StaticQueue};

/// Counts gathered by a successful [`StaticQueue::audit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AuditReport {
    /// Nodes reachable from the anchor. Always equals the capacity.
    pub ring_len: u32,
    /// Active nodes.
    pub active: u32,
    /// Nodes from `tail` up to (excluding) `head`, or the whole ring if full.
    pub span_len: u32,
    /// Inactive nodes inside the live span, skipped by the next `pop`.
    pub stale: u32,
}

/// A broken structural property found by [`StaticQueue::audit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuditError {
    /// `slot`'s `next` link leaves the storage or is not mirrored by `prev`.
    BrokenLink {
        /// Slot whose outgoing link is wrong.
        slot: u32,
    },
    /// The ring through the anchor is shorter than the storage.
    RingLength {
        /// Nodes reached before returning to the anchor.
        ring_len: u32,
    },
    /// The running count disagrees with the active flags.
    CountMismatch {
        /// Active flags found in storage.
        counted: u32,
        /// Value of the running count.
        recorded: u32,
    },
    /// `head == tail` but the count says neither full nor empty.
    Coincidence {
        /// The shared cursor position.
        slot: u32,
    },
    /// An active node sits between `head` and `tail`.
    ActiveOutsideSpan {
        /// The misplaced node.
        slot: u32,
    },
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BrokenLink { slot } => write!(f, "slot {slot} has an inconsistent next link"),
            Self::RingLength { ring_len } => {
                write!(f, "ring through the anchor has only {ring_len} nodes")
            }
            Self::CountMismatch { counted, recorded } => {
                write!(f, "{counted} active flags but count is {recorded}")
            }
            Self::Coincidence { slot } => {
                write!(f, "cursors meet at slot {slot} but queue is neither full nor empty")
            }
            Self::ActiveOutsideSpan { slot } => {
                write!(f, "active slot {slot} lies in the free region")
            }
        }
    }
}

impl core::error::Error for AuditError {}

impl<T: Linked> StaticQueue<'_, T> {
    /// Verifies the ring structure and returns its counts.
    ///
    /// # Errors
    ///
    /// Returns the first [`AuditError`] found, checked in the order listed in
    /// the [module docs](crate::audit).
    pub fn audit(&self) -> Result<AuditReport, AuditError> {
        for slot in 0..self.capacity {
            let next = self.next_of(slot);
            if next >= self.capacity || self.prev_of(next) != slot {
                return Err(AuditError::BrokenLink { slot });
            }
        }

        // Links form a permutation now, so the walk returns to the anchor.
        let mut ring_len = 0;
        let mut cursor = ANCHOR;
        loop {
            cursor = self.next_of(cursor);
            ring_len += 1;
            if cursor == ANCHOR || ring_len > self.capacity {
                break;
            }
        }
        if ring_len != self.capacity {
            return Err(AuditError::RingLength { ring_len });
        }

        let mut active = 0;
        for slot in 0..self.capacity {
            if self.is_live(slot) {
                active += 1;
            }
        }
        if active != self.len {
            return Err(AuditError::CountMismatch {
                counted: active,
                recorded: self.len,
            });
        }

        if self.head == self.tail {
            let expected = if self.is_live(self.head) {
                self.capacity
            } else {
                0
            };
            if self.len != expected {
                return Err(AuditError::Coincidence { slot: self.head });
            }
        }

        if !self.is_full() {
            let mut cursor = self.head;
            loop {
                if self.is_live(cursor) {
                    return Err(AuditError::ActiveOutsideSpan { slot: cursor });
                }
                cursor = self.next_of(cursor);
                if cursor == self.tail {
                    break;
                }
            }
        }

        let mut span_len = 0;
        let mut stale = 0;
        if !self.is_empty() {
            let mut cursor = self.tail;
            loop {
                span_len += 1;
                if !self.is_live(cursor) {
                    stale += 1;
                }
                cursor = self.next_of(cursor);
                if cursor == self.head {
                    break;
                }
            }
        }

        Ok(AuditReport {
            ring_len,
            active,
            span_len,
            stale,
        })
    }
}
