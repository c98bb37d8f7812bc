// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot identity types.

use core::fmt;

/// Sentinel value indicating "no slot" in link fields.
///
/// Also bounds the capacity: a ring holds at most `INVALID - 1` nodes.
pub const INVALID: u32 = u32::MAX;

/// The slot that `head` and `tail` return to whenever the queue is reset.
pub(crate) const ANCHOR: u32 = 0;

/// A handle to a node in a [`StaticQueue`](super::StaticQueue).
///
/// A `NodeId` names a slot of the backing storage, not a particular payload:
/// after the node is popped or erased the same id refers to whatever is
/// written into that slot next.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the slot index into the backing storage.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Creates a handle for the slot at `index`.
    ///
    /// Operations reject indices outside the storage with
    /// [`QueueError::NotInQueue`](crate::QueueError::NotInQueue).
    #[inline]
    #[must_use]
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}
