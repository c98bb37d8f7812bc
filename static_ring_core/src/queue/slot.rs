// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Borrowed access to a record chosen by a queue operation.

use core::ops::{Deref, DerefMut};

use super::id::NodeId;
use super::node::{Linked, Node};

/// A record handed out by the queue, together with its slot handle.
///
/// Derefs to the caller's record type, so payload fields are written and read
/// through it directly. Keep [`id`](Self::id) to erase the record later.
///
/// The embedded [`Node`] is owned by the queue. It is captured when the slot
/// is created and written back when the slot is dropped, so assigning a whole
/// record (`*slot = Record { .. }`) replaces only the payload.
#[derive(Debug)]
pub struct Slot<'q, T: Linked> {
    id: NodeId,
    item: &'q mut T,
    links: Node,
}

impl<'q, T: Linked> Slot<'q, T> {
    pub(crate) fn new(id: NodeId, item: &'q mut T) -> Self {
        let links = *item.node();
        Self { id, item, links }
    }

    /// Returns the slot handle.
    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<T: Linked> Deref for Slot<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.item
    }
}

impl<T: Linked> DerefMut for Slot<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        self.item
    }
}

impl<T: Linked> Drop for Slot<'_, T> {
    fn drop(&mut self) {
        *self.item.node_mut() = self.links;
    }
}
