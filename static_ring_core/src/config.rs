// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Queue configuration.

/// How [`erase`](crate::StaticQueue::erase) validates the node it is given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EraseCheck {
    /// Trust the node's `active` flag. O(1).
    #[default]
    TrustFlag,
    /// Additionally walk the live span from `tail` and reject nodes that are
    /// not found with [`QueueError::NotInQueue`](crate::QueueError::NotInQueue).
    /// O(len).
    Walk,
}

/// Configuration for a [`StaticQueue`](crate::StaticQueue).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct QueueConfig {
    /// Validation performed by `erase`.
    pub erase_check: EraseCheck,
}

impl QueueConfig {
    /// Bounded-time configuration: every operation except `for_each` is O(1).
    #[must_use]
    pub const fn realtime() -> Self {
        Self {
            erase_check: EraseCheck::TrustFlag,
        }
    }

    /// Configuration that verifies erase targets against the live span.
    #[must_use]
    pub const fn checked() -> Self {
        Self {
            erase_check: EraseCheck::Walk,
        }
    }
}
