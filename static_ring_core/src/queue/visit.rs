// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Callback traversal with in-place erasure.

use crate::trace::VisitSummary;

use super::node::Linked;
use super::slot::Slot;
use super::store::StaticQueue;

/// What [`for_each`](StaticQueue::for_each) does after visiting a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visit {
    /// Move on to the next live node.
    Continue,
    /// End the traversal successfully.
    Stop,
    /// Erase the visited node, then move on.
    Erase,
}

impl<T: Linked> StaticQueue<'_, T> {
    /// Visits every live node from oldest to newest.
    ///
    /// The callback receives each node mutably and decides how to proceed
    /// through the returned [`Visit`]. Erasing the visited node is safe: the
    /// successor is read before the callback runs. Inactive nodes inside the
    /// live span are skipped.
    ///
    /// # Errors
    ///
    /// The first `Err` the callback returns ends the traversal and is handed
    /// back unchanged. Nodes visited before it keep whatever the callback did
    /// to them.
    pub fn for_each<E, F>(&mut self, mut f: F) -> Result<(), E>
    where
        F: FnMut(Slot<'_, T>) -> Result<Visit, E>,
    {
        let op_index = self.begin_op();
        let mut summary = VisitSummary {
            op_index,
            visited: 0,
            erased: 0,
            stopped: false,
        };
        let result = self.visit_live(&mut f, &mut summary);
        self.tracer.visit_summary(&summary);
        result
    }

    fn visit_live<E, F>(&mut self, f: &mut F, summary: &mut VisitSummary) -> Result<(), E>
    where
        F: FnMut(Slot<'_, T>) -> Result<Visit, E>,
    {
        let mut cursor = self.tail;
        let mut remaining = self.len;
        let mut steps = 0;

        while remaining > 0 && steps < self.capacity {
            let next = self.next_of(cursor);
            steps += 1;

            if self.is_live(cursor) {
                remaining -= 1;
                summary.visited += 1;
                match f(self.slot(cursor)) {
                    Ok(Visit::Continue) => {}
                    Ok(Visit::Stop) => {
                        summary.stopped = true;
                        return Ok(());
                    }
                    Ok(Visit::Erase) => {
                        self.erase_live(cursor, summary.op_index);
                        summary.erased += 1;
                    }
                    Err(error) => {
                        summary.stopped = true;
                        return Err(error);
                    }
                }
            }
            cursor = next;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::convert::Infallible;

    use super::*;
    use crate::error::QueueError;
    use crate::linked;
    use crate::queue::Node;

    #[derive(Debug, Default)]
    struct Item {
        number: u32,
        node: Node,
    }

    linked!(Item, node);

    fn storage<const N: usize>() -> [Item; N] {
        core::array::from_fn(|_| Item::default())
    }

    fn fill(queue: &mut StaticQueue<'_, Item>, numbers: &[u32]) {
        for &n in numbers {
            queue.put().unwrap().number = n;
        }
    }

    fn collect(queue: &mut StaticQueue<'_, Item>) -> Vec<u32> {
        let mut out = Vec::new();
        queue
            .for_each(|slot| {
                out.push(slot.number);
                Ok::<_, Infallible>(Visit::Continue)
            })
            .unwrap();
        out
    }

    #[test]
    fn visits_oldest_to_newest() {
        let mut items = storage::<5>();
        let mut queue = StaticQueue::new(&mut items).unwrap();
        fill(&mut queue, &[2, 3]);
        queue.put_first().unwrap().number = 1;

        assert_eq!(collect(&mut queue), [1, 2, 3]);
        assert_eq!(queue.len(), 3, "visiting does not consume");
    }

    #[test]
    fn empty_queue_never_calls_back() {
        let mut items = storage::<3>();
        let mut queue = StaticQueue::new(&mut items).unwrap();
        let mut calls = 0;
        queue
            .for_each(|_| {
                calls += 1;
                Ok::<_, Infallible>(Visit::Continue)
            })
            .unwrap();
        assert_eq!(calls, 0);
    }

    #[test]
    fn callback_can_mutate_payload() {
        let mut items = storage::<3>();
        let mut queue = StaticQueue::new(&mut items).unwrap();
        fill(&mut queue, &[1, 2, 3]);

        queue
            .for_each(|mut slot| {
                slot.number *= 10;
                Ok::<_, Infallible>(Visit::Continue)
            })
            .unwrap();
        assert_eq!(collect(&mut queue), [10, 20, 30]);
    }

    #[test]
    fn stop_ends_early() {
        let mut items = storage::<4>();
        let mut queue = StaticQueue::new(&mut items).unwrap();
        fill(&mut queue, &[1, 2, 3, 4]);

        let mut seen = Vec::new();
        queue
            .for_each(|slot| {
                seen.push(slot.number);
                Ok::<_, Infallible>(if slot.number == 2 {
                    Visit::Stop
                } else {
                    Visit::Continue
                })
            })
            .unwrap();
        assert_eq!(seen, [1, 2]);
    }

    #[test]
    fn error_is_returned_verbatim() {
        let mut items = storage::<4>();
        let mut queue = StaticQueue::new(&mut items).unwrap();
        fill(&mut queue, &[1, 2, 3]);

        let mut seen = 0;
        let result = queue.for_each(|slot| {
            seen += 1;
            if slot.number == 2 {
                Err("bad record")
            } else {
                Ok(Visit::Continue)
            }
        });
        assert_eq!(result, Err("bad record"));
        assert_eq!(seen, 2);
    }

    #[test]
    fn erase_during_traversal_keeps_order() {
        let mut items = storage::<6>();
        let mut queue = StaticQueue::new(&mut items).unwrap();
        fill(&mut queue, &[1, 2, 3, 4, 5, 6]);

        let mut seen = Vec::new();
        queue
            .for_each(|slot| {
                seen.push(slot.number);
                Ok::<_, Infallible>(if slot.number % 2 == 0 {
                    Visit::Erase
                } else {
                    Visit::Continue
                })
            })
            .unwrap();

        assert_eq!(seen, [1, 2, 3, 4, 5, 6], "each node visited once");
        assert_eq!(queue.len(), 3);
        assert_eq!(collect(&mut queue), [1, 3, 5]);
    }

    #[test]
    fn erase_all_during_traversal_empties_queue() {
        let mut items = storage::<4>();
        let mut queue = StaticQueue::new(&mut items).unwrap();
        fill(&mut queue, &[1, 2, 3, 4]);

        queue
            .for_each(|_| Ok::<_, Infallible>(Visit::Erase))
            .unwrap();
        assert!(queue.is_empty());
        assert_eq!(queue.pop().unwrap_err(), QueueError::Empty);
    }

    #[test]
    fn callback_error_type_can_be_queue_error() {
        let mut items = storage::<2>();
        let mut queue = StaticQueue::new(&mut items).unwrap();
        fill(&mut queue, &[1]);

        let result = queue.for_each(|_| Err(QueueError::NotInQueue));
        assert_eq!(result, Err(QueueError::NotInQueue));
        assert_eq!(queue.len(), 1);
    }
}
