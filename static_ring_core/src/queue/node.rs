// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The intrusive link record and the trait that exposes it.

use super::id::INVALID;

/// Intrusive link record embedded in every caller record.
///
/// Holds the ring links (as slot indices) and the flag telling whether the
/// record currently carries a live, enqueued payload. Only the queue rewrites
/// a node; callers create nodes with [`Node::new`] and must not replace one
/// that belongs to a live queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    pub(crate) next: u32,
    pub(crate) prev: u32,
    pub(crate) active: bool,
}

impl Node {
    /// Creates an unlinked, inactive node.
    ///
    /// `const` so that storage arrays can live in `static` items.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: INVALID,
            prev: INVALID,
            active: false,
        }
    }

    /// Returns whether the node currently holds an enqueued payload.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

/// Access to the [`Node`] embedded in a caller record.
///
/// Implement this for the record type stored in the queue, usually with the
/// [`linked!`](crate::linked) macro:
///
/// ```
/// use static_ring_core::{Node, linked};
///
/// struct Sample {
///     value: i32,
///     node: Node,
/// }
///
/// linked!(Sample, node);
/// ```
pub trait Linked {
    /// Returns the embedded node.
    fn node(&self) -> &Node;

    /// Returns the embedded node mutably.
    fn node_mut(&mut self) -> &mut Node;
}

impl Linked for Node {
    #[inline]
    fn node(&self) -> &Node {
        self
    }

    #[inline]
    fn node_mut(&mut self) -> &mut Node {
        self
    }
}

/// Implements [`Linked`] for a record type by naming its [`Node`] field.
///
/// ```
/// use static_ring_core::{Node, linked};
///
/// struct Job<'a> {
///     name: &'a str,
///     link: Node,
/// }
///
/// linked!(Job<'_>, link);
/// ```
#[macro_export]
macro_rules! linked {
    ($ty:ty, $field:ident) => {
        impl $crate::Linked for $ty {
            #[inline]
            fn node(&self) -> &$crate::Node {
                &self.$field
            }

            #[inline]
            fn node_mut(&mut self) -> &mut $crate::Node {
                &mut self.$field
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Record {
        value: u8,
        node: Node,
    }

    crate::linked!(Record, node);

    #[test]
    fn new_node_is_unlinked_and_inactive() {
        let node = Node::new();
        assert!(!node.is_active());
        assert_eq!(node.next, INVALID);
        assert_eq!(node.prev, INVALID);
        assert_eq!(node, Node::default());
    }

    #[test]
    fn macro_exposes_the_named_field() {
        let mut record = Record {
            value: 7,
            node: Node::new(),
        };
        record.node_mut().active = true;
        assert!(record.node().is_active());
        assert!(record.node.is_active());
        assert_eq!(record.value, 7);
    }
}
