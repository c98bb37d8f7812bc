// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types returned by queue operations.

use core::fmt;

/// Errors from [`StaticQueue`](crate::StaticQueue) operations.
///
/// A rejected operation leaves every node and the count as they were and
/// hands out no record. It still advances the operation index, and a failing
/// `pop` or `peek` may move the read cursor past stale nodes (returning both
/// cursors to the anchor if nothing is live).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueueError {
    /// An insertion found no free slot.
    Full,
    /// A read found no active node, or an erase targeted an inactive node.
    Empty,
    /// The node is outside the storage, or not in the live span when walk
    /// verification is enabled.
    NotInQueue,
    /// The storage length cannot form a ring.
    InvalidCapacity {
        /// The rejected number of records.
        capacity: usize,
    },
}

impl QueueError {
    /// Returns the numeric status code used by C-style callers.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Full => -401,
            Self::Empty => -402,
            Self::NotInQueue => -403,
            Self::InvalidCapacity { .. } => -404,
        }
    }
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("queue is full"),
            Self::Empty => f.write_str("queue has no active node"),
            Self::NotInQueue => f.write_str("node is not part of the queue"),
            Self::InvalidCapacity { capacity } => {
                write!(f, "cannot build a ring from {capacity} records")
            }
        }
    }
}

impl core::error::Error for QueueError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn codes_are_distinct_and_negative() {
        let all = [
            QueueError::Full,
            QueueError::Empty,
            QueueError::NotInQueue,
            QueueError::InvalidCapacity { capacity: 0 },
        ];
        for (i, a) in all.iter().enumerate() {
            assert!(a.code() < 0, "{a:?} should map to a negative code");
            for b in &all[i + 1..] {
                assert_ne!(a.code(), b.code(), "{a:?} and {b:?} share a code");
            }
        }
    }

    #[test]
    fn display_names_capacity() {
        let msg = QueueError::InvalidCapacity { capacity: 0 }.to_string();
        assert!(msg.contains('0'), "got: {msg}");
    }
}
