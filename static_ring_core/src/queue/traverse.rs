// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only traversal.

use super::id::NodeId;
use super::node::Linked;
use super::store::StaticQueue;

/// An iterator over the live nodes of a queue, oldest first.
///
/// Created by [`StaticQueue::iter`].
#[derive(Debug)]
pub struct Iter<'q, T> {
    items: &'q [T],
    current: u32,
    remaining: u32,
    steps: u32,
}

impl<T: Linked> StaticQueue<'_, T> {
    /// Returns an iterator over the live nodes, oldest first.
    ///
    /// Unlike [`peek`](Self::peek), iterating never repairs the read cursor:
    /// stale nodes are skipped on the fly.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            items: &*self.items,
            current: self.tail,
            remaining: self.len,
            steps: self.capacity,
        }
    }
}

impl<'q, T: Linked> Iterator for Iter<'q, T> {
    type Item = (NodeId, &'q T);

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 && self.steps > 0 {
            let idx = self.current;
            let item = &self.items[idx as usize];
            self.current = item.node().next;
            self.steps -= 1;
            if item.node().is_active() {
                self.remaining -= 1;
                return Some((NodeId(idx), item));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Upper bound only: a damaged ring may end the walk early.
        (0, Some(self.remaining as usize))
    }
}

impl<'q, T: Linked> IntoIterator for &'q StaticQueue<'_, T> {
    type Item = (NodeId, &'q T);
    type IntoIter = Iter<'q, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
