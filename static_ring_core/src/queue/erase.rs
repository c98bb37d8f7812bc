// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Removal of arbitrary live nodes.

use crate::config::EraseCheck;
use crate::error::QueueError;
use crate::trace::{EraseEvent, EraseKind, OpKind};

use super::id::NodeId;
use super::node::Linked;
use super::store::StaticQueue;

impl<T: Linked> StaticQueue<'_, T> {
    /// Removes the live node `id` from the queue.
    ///
    /// The node's flag is cleared and the cursors are repaired so that the
    /// remaining nodes keep their relative order:
    ///
    /// - the only live node returns both cursors to the anchor,
    /// - the oldest node moves `tail` forward,
    /// - the newest node moves `head` back onto it,
    /// - any other node is spliced out and relinked just behind `tail`,
    ///   where it becomes the next free slot at the `put_first` end.
    ///
    /// The record's payload is not touched.
    ///
    /// # Errors
    ///
    /// - [`QueueError::NotInQueue`] if `id` is outside the storage, or, with
    ///   [`EraseCheck::Walk`], if the node is not found in the live span.
    /// - [`QueueError::Empty`] if the node is not active.
    #[doc(alias = "remove")]
    pub fn erase(&mut self, id: NodeId) -> Result<(), QueueError> {
        let op_index = self.begin_op();
        if let Err(error) = self.check_erase(id) {
            return Err(self.reject(op_index, OpKind::Erase, error));
        }
        self.erase_live(id.0, op_index);
        Ok(())
    }

    fn check_erase(&self, id: NodeId) -> Result<(), QueueError> {
        if !self.contains_slot(id) {
            return Err(QueueError::NotInQueue);
        }
        if !self.is_live(id.0) {
            return Err(QueueError::Empty);
        }
        if self.config.erase_check == EraseCheck::Walk && !self.in_live_span(id.0) {
            return Err(QueueError::NotInQueue);
        }
        Ok(())
    }

    /// Walks from `tail` towards `head` looking for `idx`.
    fn in_live_span(&self, idx: u32) -> bool {
        let mut cursor = self.tail;
        for _ in 0..self.capacity {
            if cursor == idx {
                return true;
            }
            cursor = self.next_of(cursor);
            if cursor == self.head {
                return false;
            }
        }
        false
    }

    /// Classifies the cursor repair needed to erase the live node `idx`.
    pub(crate) fn erase_kind(&self, idx: u32) -> EraseKind {
        let newest = self.prev_of(self.head);
        match (idx == self.tail, idx == newest) {
            (true, true) => EraseKind::Sole,
            (true, false) => EraseKind::Oldest,
            (false, true) => EraseKind::Newest,
            (false, false) => EraseKind::Interior,
        }
    }

    /// Erases the live node `idx` without validation.
    pub(crate) fn erase_live(&mut self, idx: u32, op_index: u64) -> EraseKind {
        let kind = self.erase_kind(idx);
        self.node_mut(idx).active = false;

        match kind {
            EraseKind::Sole => self.reset_cursors(),
            EraseKind::Oldest => self.tail = self.next_of(idx),
            EraseKind::Newest => self.head = idx,
            EraseKind::Interior => {
                let was_full = self.head == self.tail;
                self.unlink(idx);
                let tail = self.tail;
                self.link_before(idx, tail);
                // A full ring has no free slot for `head`; the relinked node becomes it.
                if was_full {
                    self.head = idx;
                }
            }
        }
        self.len -= 1;

        debug_assert!(
            self.head != self.tail || !self.is_live(self.head) || self.len == self.capacity,
            "cursors coincide on a live node but the queue is not full"
        );

        self.tracer.erase(&EraseEvent {
            op_index,
            slot: idx,
            kind,
            len: self.len,
        });
        kind
    }
}
