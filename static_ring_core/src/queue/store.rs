// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring construction, cursors, and the enqueue/dequeue API.

use core::fmt;

use crate::config::QueueConfig;
use crate::error::QueueError;
use crate::trace::{
    ClearEvent, OpKind, PopEvent, PutEnd, PutEvent, RejectEvent, TailRepairEvent, Tracer,
};

use super::id::{ANCHOR, INVALID, NodeId};
use super::node::{Linked, Node};
use super::slot::Slot;

/// Fixed-capacity circular queue over caller-provided records.
///
/// Every record embeds one [`Node`]. At construction all nodes are linked into
/// a single ring in storage order; afterwards the queue only toggles the
/// nodes' `active` flags, moves its two cursors, and occasionally relinks a
/// node (see [`erase`](Self::erase)). It never allocates and never moves
/// payload data.
///
/// - `head` is the write cursor: the slot the next [`put`](Self::put)
///   activates.
/// - `tail` is the read cursor: the oldest live node, returned by the next
///   [`pop`](Self::pop).
///
/// When the cursors coincide the queue is full if that node is active and
/// empty otherwise. No slot is held back.
pub struct StaticQueue<'a, T> {
    // -- Storage --
    pub(crate) items: &'a mut [T],
    pub(crate) capacity: u32,

    // -- Cursors --
    pub(crate) head: u32,
    pub(crate) tail: u32,

    // -- Bookkeeping --
    pub(crate) len: u32,
    pub(crate) op_index: u64,
    pub(crate) config: QueueConfig,
    pub(crate) tracer: Tracer<'a>,
}

impl<T> fmt::Debug for StaticQueue<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticQueue")
            .field("capacity", &self.capacity)
            .field("len", &self.len)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a, T: Linked> StaticQueue<'a, T> {
    /// Builds a queue over `items` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::InvalidCapacity`] if `items` is empty or holds
    /// `u32::MAX` records or more.
    pub fn new(items: &'a mut [T]) -> Result<Self, QueueError> {
        Self::with_tracer(items, QueueConfig::default(), Tracer::none())
    }

    /// Builds a queue over `items` with the given configuration.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_config(items: &'a mut [T], config: QueueConfig) -> Result<Self, QueueError> {
        Self::with_tracer(items, config, Tracer::none())
    }

    /// Builds a queue over `items` that reports its operations to `tracer`.
    ///
    /// All embedded nodes are overwritten: they are linked into one ring in
    /// storage order and marked inactive, whatever state they were in.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_tracer(
        items: &'a mut [T],
        config: QueueConfig,
        tracer: Tracer<'a>,
    ) -> Result<Self, QueueError> {
        let capacity = match u32::try_from(items.len()) {
            Ok(n) if n > 0 && n < INVALID => n,
            _ => {
                return Err(QueueError::InvalidCapacity {
                    capacity: items.len(),
                });
            }
        };

        let last = capacity - 1;
        for (idx, item) in (0..capacity).zip(items.iter_mut()) {
            let node = item.node_mut();
            node.next = if idx == last { ANCHOR } else { idx + 1 };
            node.prev = if idx == ANCHOR { last } else { idx - 1 };
            node.active = false;
        }

        Ok(Self {
            items,
            capacity,
            head: ANCHOR,
            tail: ANCHOR,
            len: 0,
            op_index: 0,
            config,
            tracer,
        })
    }

    // -- Capacity API --

    /// Returns the fixed number of nodes in the ring.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }

    /// Returns the number of active nodes. O(1).
    #[doc(alias = "num_items")]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns whether no slot is free.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.head == self.tail && self.is_live(self.head)
    }

    /// Returns whether no node is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail && !self.is_live(self.head)
    }

    /// Returns the configuration the queue was built with.
    #[must_use]
    pub fn config(&self) -> QueueConfig {
        self.config
    }

    // -- Enqueue / dequeue API --

    /// Activates the slot at the write cursor and returns it for the caller
    /// to fill. The record is dequeued after everything already queued.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Full`] if no slot is free.
    #[doc(alias = "push_back")]
    pub fn put(&mut self) -> Result<Slot<'_, T>, QueueError> {
        let op_index = self.begin_op();
        if self.is_full() {
            return Err(self.reject(op_index, OpKind::Put, QueueError::Full));
        }

        let idx = self.head;
        self.node_mut(idx).active = true;
        self.head = self.next_of(idx);
        self.len += 1;

        self.tracer.put(&PutEvent {
            op_index,
            slot: idx,
            end: PutEnd::Head,
            len: self.len,
        });
        Ok(self.slot(idx))
    }

    /// Activates the slot just behind the read cursor and returns it. The
    /// record is dequeued next.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Full`] if no slot is free.
    #[doc(alias = "push_front")]
    pub fn put_first(&mut self) -> Result<Slot<'_, T>, QueueError> {
        let op_index = self.begin_op();
        if self.is_full() {
            return Err(self.reject(op_index, OpKind::PutFirst, QueueError::Full));
        }

        let idx = self.prev_of(self.tail);
        self.tail = idx;
        self.node_mut(idx).active = true;
        self.len += 1;

        self.tracer.put(&PutEvent {
            op_index,
            slot: idx,
            end: PutEnd::Tail,
            len: self.len,
        });
        Ok(self.slot(idx))
    }

    /// Releases the oldest active node and returns it for the caller to read.
    ///
    /// The record stays in place: its payload is readable until the slot is
    /// filled again.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] if no node is active.
    #[doc(alias = "pop_front")]
    pub fn pop(&mut self) -> Result<Slot<'_, T>, QueueError> {
        let op_index = self.begin_op();
        if let Err(error) = self.settle_tail(op_index) {
            return Err(self.reject(op_index, OpKind::Pop, error));
        }

        let idx = self.tail;
        self.node_mut(idx).active = false;
        self.tail = self.next_of(idx);
        self.len -= 1;

        self.tracer.pop(&PopEvent {
            op_index,
            slot: idx,
            len: self.len,
        });
        Ok(self.slot(idx))
    }

    /// Returns the oldest active node without releasing it.
    ///
    /// Takes `&mut self` because the read cursor is moved past stale nodes
    /// permanently, exactly as [`pop`](Self::pop) would.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] if no node is active.
    #[doc(alias = "peak")]
    pub fn peek(&mut self) -> Result<Slot<'_, T>, QueueError> {
        let op_index = self.begin_op();
        if let Err(error) = self.settle_tail(op_index) {
            return Err(self.reject(op_index, OpKind::Peek, error));
        }
        Ok(self.slot(self.tail))
    }

    /// Deactivates every node and returns both cursors to the anchor.
    ///
    /// Ring order is left as it is; only the flags and cursors are reset.
    pub fn clear(&mut self) {
        let op_index = self.begin_op();
        let released = self.len;
        for item in self.items.iter_mut() {
            item.node_mut().active = false;
        }
        self.reset_cursors();
        self.len = 0;
        self.tracer.clear(&ClearEvent {
            op_index,
            released,
        });
    }

    // -- Navigation API --

    /// Returns the write cursor.
    #[must_use]
    pub fn head(&self) -> NodeId {
        NodeId(self.head)
    }

    /// Returns the read cursor.
    #[must_use]
    pub fn tail(&self) -> NodeId {
        NodeId(self.tail)
    }

    /// Returns the node the next `pop` would release, if any.
    #[must_use]
    pub fn oldest(&self) -> Option<NodeId> {
        if self.len == 0 {
            return None;
        }
        let mut cursor = self.tail;
        for _ in 0..self.capacity {
            if self.is_live(cursor) {
                return Some(NodeId(cursor));
            }
            cursor = self.next_of(cursor);
        }
        None
    }

    /// Returns the most recently enqueued node still at the head end, if any.
    #[must_use]
    pub fn newest(&self) -> Option<NodeId> {
        if self.len == 0 {
            return None;
        }
        let mut cursor = self.prev_of(self.head);
        for _ in 0..self.capacity {
            if self.is_live(cursor) {
                return Some(NodeId(cursor));
            }
            cursor = self.prev_of(cursor);
        }
        None
    }

    /// Returns the node after `id` in ring order.
    #[must_use]
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.contains_slot(id).then(|| NodeId(self.next_of(id.0)))
    }

    /// Returns the node before `id` in ring order.
    #[must_use]
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.contains_slot(id).then(|| NodeId(self.prev_of(id.0)))
    }

    /// Returns whether `id` currently holds an enqueued payload.
    #[must_use]
    pub fn is_active(&self, id: NodeId) -> bool {
        self.contains_slot(id) && self.is_live(id.0)
    }

    /// Returns the record in slot `id`, active or not.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.items.get(id.0 as usize)
    }

    /// Returns the record in slot `id` mutably, active or not.
    ///
    /// The record comes wrapped in a [`Slot`] so its embedded node survives
    /// whole-record assignment.
    #[must_use]
    pub fn get_mut(&mut self, id: NodeId) -> Option<Slot<'_, T>> {
        self.contains_slot(id).then(|| self.slot(id.0))
    }

    // -- Internal helpers --

    #[inline]
    pub(crate) fn node(&self, idx: u32) -> &Node {
        self.items[idx as usize].node()
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, idx: u32) -> &mut Node {
        self.items[idx as usize].node_mut()
    }

    #[inline]
    pub(crate) fn next_of(&self, idx: u32) -> u32 {
        self.node(idx).next
    }

    #[inline]
    pub(crate) fn prev_of(&self, idx: u32) -> u32 {
        self.node(idx).prev
    }

    #[inline]
    pub(crate) fn is_live(&self, idx: u32) -> bool {
        self.node(idx).active
    }

    #[inline]
    pub(crate) fn contains_slot(&self, id: NodeId) -> bool {
        id.0 < self.capacity
    }

    pub(crate) fn slot(&mut self, idx: u32) -> Slot<'_, T> {
        Slot::new(NodeId(idx), &mut self.items[idx as usize])
    }

    /// Returns the index of this operation and advances the counter.
    pub(crate) fn begin_op(&mut self) -> u64 {
        let op_index = self.op_index;
        self.op_index = op_index.wrapping_add(1);
        op_index
    }

    /// Reports a rejected operation and hands the error back.
    pub(crate) fn reject(&mut self, op_index: u64, op: OpKind, error: QueueError) -> QueueError {
        self.tracer.reject(&RejectEvent {
            op_index,
            op,
            error,
        });
        error
    }

    /// Puts both cursors on the anchor (the canonical empty position).
    pub(crate) fn reset_cursors(&mut self) {
        self.head = ANCHOR;
        self.tail = ANCHOR;
    }

    /// Removes `idx` from its ring position, joining its neighbours.
    pub(crate) fn unlink(&mut self, idx: u32) {
        let prev = self.prev_of(idx);
        let next = self.next_of(idx);
        self.node_mut(prev).next = next;
        self.node_mut(next).prev = prev;

        let node = self.node_mut(idx);
        node.prev = INVALID;
        node.next = INVALID;
    }

    /// Inserts the unlinked node `idx` immediately before `at`.
    pub(crate) fn link_before(&mut self, idx: u32, at: u32) {
        let prev = self.prev_of(at);
        self.node_mut(prev).next = idx;
        self.node_mut(at).prev = idx;

        let node = self.node_mut(idx);
        node.prev = prev;
        node.next = at;
    }

    /// Moves `tail` forward past inactive nodes so it references the oldest
    /// live node.
    ///
    /// If the scan reaches an inactive `head` nothing is live: the cursors
    /// return to the anchor and `Empty` is reported. If it reaches an active
    /// `head`, that node is the only live one and `head` steps past it.
    pub(crate) fn settle_tail(&mut self, op_index: u64) -> Result<(), QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }

        let mut skipped = 0;
        while !self.is_live(self.tail) {
            self.tail = self.next_of(self.tail);
            skipped += 1;
            if self.tail == self.head {
                if !self.is_live(self.head) {
                    self.reset_cursors();
                    self.tracer.tail_repair(&TailRepairEvent {
                        op_index,
                        skipped,
                        reset: true,
                    });
                    return Err(QueueError::Empty);
                }
                self.head = self.next_of(self.head);
                break;
            }
        }

        if skipped > 0 {
            self.tracer.tail_repair(&TailRepairEvent {
                op_index,
                skipped,
                reset: false,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::linked;

    #[derive(Debug, Default)]
    struct Item {
        number: u32,
        node: Node,
    }

    linked!(Item, node);

    fn storage<const N: usize>() -> [Item; N] {
        core::array::from_fn(|_| Item::default())
    }

    fn put(queue: &mut StaticQueue<'_, Item>, number: u32) -> Result<NodeId, QueueError> {
        let mut slot = queue.put()?;
        slot.number = number;
        Ok(slot.id())
    }

    fn put_first(queue: &mut StaticQueue<'_, Item>, number: u32) -> Result<NodeId, QueueError> {
        let mut slot = queue.put_first()?;
        slot.number = number;
        Ok(slot.id())
    }

    fn pop(queue: &mut StaticQueue<'_, Item>) -> Result<u32, QueueError> {
        queue.pop().map(|slot| slot.number)
    }

    fn ring_order(queue: &StaticQueue<'_, Item>) -> Vec<u32> {
        let mut order = Vec::new();
        let mut cursor = ANCHOR;
        for _ in 0..queue.capacity {
            order.push(cursor);
            cursor = queue.next_of(cursor);
        }
        order
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut items: [Item; 0] = [];
        let err = StaticQueue::new(&mut items).unwrap_err();
        assert_eq!(err, QueueError::InvalidCapacity { capacity: 0 });
    }

    #[test]
    fn new_links_storage_order_ring() {
        let mut items = storage::<4>();
        items[2].node.active = true;
        let queue = StaticQueue::new(&mut items).unwrap();

        assert_eq!(ring_order(&queue), [0, 1, 2, 3]);
        assert_eq!(queue.prev_of(0), 3, "anchor closes the ring");
        assert!(queue.is_empty());
        assert!(!queue.is_full());
        assert!(!queue.is_active(NodeId(2)), "init clears stale flags");
        assert_eq!(queue.head(), NodeId(0));
        assert_eq!(queue.tail(), NodeId(0));
    }

    #[test]
    fn fifo_until_full_then_refill() {
        let mut items = storage::<4>();
        let mut queue = StaticQueue::new(&mut items).unwrap();

        for n in [10, 11, 1337, 59] {
            put(&mut queue, n).unwrap();
        }
        assert!(queue.is_full());
        assert_eq!(put(&mut queue, 59), Err(QueueError::Full));

        assert_eq!(pop(&mut queue), Ok(10));
        put(&mut queue, 60).unwrap();
        assert!(queue.is_full());

        for expected in [11, 1337, 59, 60] {
            assert_eq!(pop(&mut queue), Ok(expected));
        }
        assert_eq!(pop(&mut queue), Err(QueueError::Empty));
        assert!(queue.is_empty());
    }

    #[test]
    fn put_first_is_dequeued_next() {
        let mut items = storage::<4>();
        let mut queue = StaticQueue::new(&mut items).unwrap();

        put(&mut queue, 10).unwrap();
        put_first(&mut queue, 11).unwrap();
        put(&mut queue, 1337).unwrap();
        put_first(&mut queue, 59).unwrap();
        assert!(queue.is_full());
        assert_eq!(put_first(&mut queue, 1), Err(QueueError::Full));

        for expected in [59, 11, 10, 1337] {
            assert_eq!(pop(&mut queue), Ok(expected));
        }
    }

    #[test]
    fn put_first_into_empty_queue() {
        let mut items = storage::<3>();
        let mut queue = StaticQueue::new(&mut items).unwrap();

        let id = put_first(&mut queue, 5).unwrap();
        assert_eq!(id, NodeId(2), "tail steps back from the anchor");
        assert_eq!(queue.len(), 1);
        assert_eq!(pop(&mut queue), Ok(5));
        assert!(queue.is_empty());
    }

    #[test]
    fn peek_does_not_release() {
        let mut items = storage::<4>();
        let mut queue = StaticQueue::new(&mut items).unwrap();

        put(&mut queue, 1337).unwrap();
        assert_eq!(queue.peek().map(|s| s.number), Ok(1337));
        put_first(&mut queue, 59).unwrap();
        assert_eq!(queue.peek().map(|s| s.number), Ok(59));
        assert_eq!(queue.len(), 2);

        queue.clear();
        assert!(queue.peek().is_err());
        assert_eq!(queue.peek().unwrap_err(), QueueError::Empty);
    }

    #[test]
    fn clear_resets_cursors_and_flags() {
        let mut items = storage::<3>();
        let mut queue = StaticQueue::new(&mut items).unwrap();

        put(&mut queue, 1).unwrap();
        put(&mut queue, 2).unwrap();
        pop(&mut queue).unwrap();
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.head(), NodeId(ANCHOR));
        assert_eq!(queue.tail(), NodeId(ANCHOR));
        assert!((0..3).all(|i| !queue.is_active(NodeId(i))));
    }

    #[test]
    fn single_slot_ring() {
        let mut items = storage::<1>();
        let mut queue = StaticQueue::new(&mut items).unwrap();

        put(&mut queue, 9).unwrap();
        assert!(queue.is_full());
        assert!(!queue.is_empty());
        assert_eq!(put_first(&mut queue, 8), Err(QueueError::Full));
        assert_eq!(pop(&mut queue), Ok(9));
        assert!(queue.is_empty());
        put_first(&mut queue, 7).unwrap();
        assert_eq!(pop(&mut queue), Ok(7));
    }

    #[test]
    fn popped_payload_stays_readable() {
        let mut items = storage::<2>();
        let mut queue = StaticQueue::new(&mut items).unwrap();

        let id = put(&mut queue, 42).unwrap();
        {
            let popped = queue.pop().unwrap();
            assert_eq!(popped.id(), id);
            assert!(!popped.node.is_active());
        }
        assert_eq!(queue.get(id).map(|item| item.number), Some(42));
    }

    #[test]
    fn whole_record_assignment_keeps_links() {
        let mut items = storage::<4>();
        let mut queue = StaticQueue::new(&mut items).unwrap();

        *queue.put().unwrap() = Item {
            number: 7,
            ..Item::default()
        };
        put(&mut queue, 8).unwrap();
        queue.audit().unwrap();

        let id = queue.tail();
        if let Some(mut slot) = queue.get_mut(id) {
            *slot = Item::default();
        }
        queue.audit().unwrap();
        assert!(queue.is_active(id));

        assert_eq!(pop(&mut queue), Ok(0));
        assert_eq!(pop(&mut queue), Ok(8));
        assert!(queue.is_empty());
    }

    #[test]
    fn rejected_put_only_advances_op_index() {
        let mut items = storage::<2>();
        let mut queue = StaticQueue::new(&mut items).unwrap();
        put(&mut queue, 1).unwrap();
        put(&mut queue, 2).unwrap();

        let cursors = (queue.head(), queue.tail(), queue.len());
        let op_index = queue.op_index;
        assert_eq!(put(&mut queue, 3), Err(QueueError::Full));
        assert_eq!((queue.head(), queue.tail(), queue.len()), cursors);
        assert_eq!(queue.op_index, op_index + 1);
        assert_eq!(pop(&mut queue), Ok(1));
    }

    #[test]
    fn get_mut_rejects_foreign_slots() {
        let mut items = storage::<2>();
        let mut queue = StaticQueue::new(&mut items).unwrap();
        assert!(queue.get_mut(NodeId(2)).is_none());
        if let Some(mut slot) = queue.get_mut(NodeId(1)) {
            slot.number = 5;
        }
        assert_eq!(queue.get(NodeId(1)).map(|item| item.number), Some(5));
    }

    #[test]
    fn stale_tail_is_skipped_by_peek_and_pop() {
        let mut items = storage::<4>();
        let mut queue = StaticQueue::new(&mut items).unwrap();

        put(&mut queue, 1).unwrap();
        put(&mut queue, 2).unwrap();
        put(&mut queue, 3).unwrap();
        // Leave a stale node under the read cursor.
        queue.node_mut(0).active = false;
        queue.len -= 1;

        assert_eq!(queue.peek().map(|s| s.number), Ok(2));
        assert_eq!(queue.tail(), NodeId(1), "the skip is permanent");
        assert_eq!(pop(&mut queue), Ok(2));
        assert_eq!(pop(&mut queue), Ok(3));
        assert!(queue.is_empty());
    }

    #[test]
    fn all_stale_span_resets_to_anchor() {
        let mut items = storage::<4>();
        let mut queue = StaticQueue::new(&mut items).unwrap();

        put(&mut queue, 1).unwrap();
        put(&mut queue, 2).unwrap();
        pop(&mut queue).unwrap();
        queue.node_mut(1).active = false;
        queue.len = 0;

        assert_eq!(pop(&mut queue), Err(QueueError::Empty));
        assert_eq!(queue.head(), NodeId(ANCHOR));
        assert_eq!(queue.tail(), NodeId(ANCHOR));
        assert!(queue.is_empty());
    }

    #[test]
    fn navigation_rejects_foreign_slots() {
        let mut items = storage::<2>();
        let queue = StaticQueue::new(&mut items).unwrap();

        assert_eq!(queue.successor(NodeId(1)), Some(NodeId(0)));
        assert_eq!(queue.predecessor(NodeId(0)), Some(NodeId(1)));
        assert_eq!(queue.successor(NodeId(2)), None);
        assert!(!queue.is_active(NodeId(7)));
        assert!(queue.get(NodeId(2)).is_none());
        assert_eq!(queue.oldest(), None);
        assert_eq!(queue.newest(), None);
    }

    #[test]
    fn oldest_and_newest_track_both_ends() {
        let mut items = storage::<4>();
        let mut queue = StaticQueue::new(&mut items).unwrap();

        let a = put(&mut queue, 1).unwrap();
        let b = put(&mut queue, 2).unwrap();
        assert_eq!(queue.oldest(), Some(a));
        assert_eq!(queue.newest(), Some(b));

        let c = put_first(&mut queue, 0).unwrap();
        assert_eq!(queue.oldest(), Some(c));
        assert_eq!(queue.newest(), Some(b));
    }
}
