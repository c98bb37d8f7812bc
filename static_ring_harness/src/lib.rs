// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference-model checking for static_ring queues.
//!
//! A [`Checker`] drives a [`StaticQueue`] and a [`ModelQueue`] (a plain
//! `VecDeque`) with the same [`Op`]s. After every step it compares the
//! outcomes, the live contents in order (payload tag and slot), the counts,
//! and the result of [`StaticQueue::audit`]. The first disagreement is
//! reported as a [`Divergence`].
//!
//! [`exhaustive`] runs every sequence of a given length over an op alphabet,
//! which for small capacities covers all cursor configurations.

#![no_std]

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use static_ring_core::{AuditError, Node, NodeId, QueueError, StaticQueue, Visit, linked};

/// Record type used by the harness: a tag to identify the payload.
#[derive(Clone, Copy, Debug, Default)]
pub struct Record {
    /// Payload written by `put` and compared on `pop`.
    pub tag: u32,
    /// Intrusive link.
    pub node: Node,
}

linked!(Record, node);

/// A single queue operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    /// `put` a record with the given tag.
    Put(u32),
    /// `put_first` a record with the given tag.
    PutFirst(u32),
    /// `pop` the oldest record.
    Pop,
    /// `peek` at the oldest record.
    Peek,
    /// `erase` the n-th live record (skipped if there is none).
    EraseNth(usize),
    /// `erase` by raw slot index, live or not.
    EraseSlot(u32),
    /// `for_each`, erasing every record with the given tag.
    EraseTag(u32),
    /// `for_each`, collecting tags until `n` were seen, then stopping.
    StopAfter(usize),
    /// `clear`.
    Clear,
}

/// The observable result of one [`Op`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The operation succeeded without returning a record.
    Done,
    /// The operation did not apply (no n-th record to erase).
    Skipped,
    /// A record was returned by `pop` or `peek`.
    Record {
        /// Tag of the record.
        tag: u32,
        /// Slot the record lives in.
        slot: NodeId,
    },
    /// Tags collected by a stopping traversal.
    Tags(Vec<u32>),
    /// The operation was rejected.
    Err(QueueError),
}

// ---------------------------------------------------------------------------
// Reference model
// ---------------------------------------------------------------------------

/// Double-ended reference queue with the same capacity rule.
#[derive(Clone, Debug)]
pub struct ModelQueue {
    entries: VecDeque<(u32, NodeId)>,
    capacity: usize,
}

impl ModelQueue {
    /// Creates an empty model for `capacity` slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the live entries, oldest first, as `(tag, slot)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (u32, NodeId)> + '_ {
        self.entries.iter().copied()
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no entry is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether every slot is taken.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// Returns the slot of the n-th live entry.
    #[must_use]
    pub fn slot_at(&self, n: usize) -> Option<NodeId> {
        self.entries.get(n).map(|&(_, slot)| slot)
    }

    /// Applies `op` and returns the outcome the queue must match.
    ///
    /// `slot` is the slot the queue chose for an insertion; the model cannot
    /// predict slot placement, only record it.
    pub fn apply(&mut self, op: Op, slot: Option<NodeId>) -> Outcome {
        match op {
            Op::Put(tag) | Op::PutFirst(tag) => {
                if self.is_full() {
                    return Outcome::Err(QueueError::Full);
                }
                if let Some(slot) = slot {
                    if matches!(op, Op::Put(_)) {
                        self.entries.push_back((tag, slot));
                    } else {
                        self.entries.push_front((tag, slot));
                    }
                }
                Outcome::Done
            }
            Op::Pop => match self.entries.pop_front() {
                Some((tag, slot)) => Outcome::Record { tag, slot },
                None => Outcome::Err(QueueError::Empty),
            },
            Op::Peek => match self.entries.front() {
                Some(&(tag, slot)) => Outcome::Record { tag, slot },
                None => Outcome::Err(QueueError::Empty),
            },
            Op::EraseNth(n) => {
                if self.entries.remove(n).is_some() {
                    Outcome::Done
                } else {
                    Outcome::Skipped
                }
            }
            Op::EraseSlot(index) => {
                let found = self
                    .entries
                    .iter()
                    .position(|&(_, slot)| slot.index() == index);
                match found {
                    Some(pos) => {
                        self.entries.remove(pos);
                        Outcome::Done
                    }
                    None if index as usize >= self.capacity => {
                        Outcome::Err(QueueError::NotInQueue)
                    }
                    None => Outcome::Err(QueueError::Empty),
                }
            }
            Op::EraseTag(tag) => {
                self.entries.retain(|&(t, _)| t != tag);
                Outcome::Done
            }
            Op::StopAfter(n) => {
                Outcome::Tags(self.entries.iter().take(n).map(|&(tag, _)| tag).collect())
            }
            Op::Clear => {
                self.entries.clear();
                Outcome::Done
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Divergence reporting
// ---------------------------------------------------------------------------

/// What disagreed between the queue and the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DivergenceKind {
    /// The operation results differ.
    Outcome {
        /// Model result.
        expected: Outcome,
        /// Queue result.
        actual: Outcome,
    },
    /// The live contents differ, as `(tag, slot)` pairs oldest first.
    Contents {
        /// Model contents.
        expected: Vec<(u32, NodeId)>,
        /// Queue contents.
        actual: Vec<(u32, NodeId)>,
    },
    /// `len`, `is_full` or `is_empty` disagree with the model.
    Occupancy {
        /// Model length.
        expected: usize,
        /// Queue length.
        actual: usize,
    },
    /// The queue failed its structural audit.
    Audit(AuditError),
}

impl fmt::Display for DivergenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outcome { expected, actual } => {
                write!(f, "expected {expected:?}, queue returned {actual:?}")
            }
            Self::Contents { expected, actual } => {
                write!(f, "expected contents {expected:?}, queue holds {actual:?}")
            }
            Self::Occupancy { expected, actual } => {
                write!(f, "expected {expected} live records, queue reports {actual}")
            }
            Self::Audit(error) => write!(f, "audit failed: {error}"),
        }
    }
}

/// The first point at which the queue and the model disagreed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Divergence {
    /// Zero-based index of the step.
    pub step: usize,
    /// The operation applied at that step.
    pub op: Op,
    /// What disagreed.
    pub kind: DivergenceKind,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({:?}): {}", self.step, self.op, self.kind)
    }
}

impl core::error::Error for Divergence {}

/// Error from [`run_sequence`] and [`exhaustive`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckError {
    /// The queue could not be built over the storage.
    Setup(QueueError),
    /// A sequence made the queue diverge from the model.
    Diverged {
        /// The full failing sequence.
        ops: Vec<Op>,
        /// Where and how it diverged.
        divergence: Divergence,
    },
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup(error) => write!(f, "cannot build queue: {error}"),
            Self::Diverged { ops, divergence } => write!(f, "{divergence} in {ops:?}"),
        }
    }
}

impl core::error::Error for CheckError {}

impl From<QueueError> for CheckError {
    fn from(error: QueueError) -> Self {
        Self::Setup(error)
    }
}

// ---------------------------------------------------------------------------
// Checker
// ---------------------------------------------------------------------------

/// Runs a queue and a model side by side.
#[derive(Debug)]
pub struct Checker<'a> {
    queue: StaticQueue<'a, Record>,
    model: ModelQueue,
    step: usize,
}

impl<'a> Checker<'a> {
    /// Builds a queue over `storage` and an empty model of the same capacity.
    ///
    /// # Errors
    ///
    /// Returns the queue's construction error.
    pub fn new(storage: &'a mut [Record]) -> Result<Self, QueueError> {
        let capacity = storage.len();
        Ok(Self {
            queue: StaticQueue::new(storage)?,
            model: ModelQueue::new(capacity),
            step: 0,
        })
    }

    /// Returns the queue under test.
    #[must_use]
    pub fn queue(&self) -> &StaticQueue<'a, Record> {
        &self.queue
    }

    /// Returns the reference model.
    #[must_use]
    pub fn model(&self) -> &ModelQueue {
        &self.model
    }

    /// Applies `op` to both sides and checks that they still agree.
    ///
    /// # Errors
    ///
    /// Returns the first disagreement found.
    pub fn apply(&mut self, op: Op) -> Result<(), Divergence> {
        let step = self.step;
        self.step += 1;
        let diverge = |kind| Divergence { step, op, kind };

        let nth_slot = match op {
            Op::EraseNth(n) => self.model.slot_at(n),
            _ => None,
        };
        let (actual, inserted) = self.run_queue(op, nth_slot);
        let expected = self.model.apply(op, inserted);
        if actual != expected {
            return Err(diverge(DivergenceKind::Outcome { expected, actual }));
        }

        self.queue
            .audit()
            .map_err(|error| diverge(DivergenceKind::Audit(error)))?;

        let actual: Vec<(u32, NodeId)> =
            self.queue.iter().map(|(id, record)| (record.tag, id)).collect();
        let expected: Vec<(u32, NodeId)> = self.model.entries().collect();
        if actual != expected {
            return Err(diverge(DivergenceKind::Contents { expected, actual }));
        }

        if self.queue.len() != self.model.len()
            || self.queue.is_full() != self.model.is_full()
            || self.queue.is_empty() != self.model.is_empty()
        {
            return Err(diverge(DivergenceKind::Occupancy {
                expected: self.model.len(),
                actual: self.queue.len(),
            }));
        }
        Ok(())
    }

    /// Applies every op in order.
    ///
    /// # Errors
    ///
    /// Returns the first disagreement found.
    pub fn run(&mut self, ops: &[Op]) -> Result<(), Divergence> {
        ops.iter().try_for_each(|&op| self.apply(op))
    }

    fn run_queue(&mut self, op: Op, nth_slot: Option<NodeId>) -> (Outcome, Option<NodeId>) {
        let queue = &mut self.queue;
        match op {
            Op::Put(tag) | Op::PutFirst(tag) => {
                let slot = if matches!(op, Op::Put(_)) {
                    queue.put()
                } else {
                    queue.put_first()
                };
                match slot {
                    Ok(mut slot) => {
                        slot.tag = tag;
                        (Outcome::Done, Some(slot.id()))
                    }
                    Err(error) => (Outcome::Err(error), None),
                }
            }
            Op::Pop => (record_outcome(queue.pop().map(|s| (s.tag, s.id()))), None),
            Op::Peek => (record_outcome(queue.peek().map(|s| (s.tag, s.id()))), None),
            Op::EraseNth(_) => match nth_slot {
                Some(id) => (done_outcome(queue.erase(id)), None),
                None => (Outcome::Skipped, None),
            },
            Op::EraseSlot(index) => (done_outcome(queue.erase(NodeId::from_index(index))), None),
            Op::EraseTag(tag) => {
                let visited = queue.for_each(|slot| {
                    Ok::<_, QueueError>(if slot.tag == tag {
                        Visit::Erase
                    } else {
                        Visit::Continue
                    })
                });
                (done_outcome(visited), None)
            }
            Op::StopAfter(n) => {
                let mut tags = Vec::new();
                let visited = queue.for_each(|slot| {
                    if tags.len() == n {
                        return Ok::<_, QueueError>(Visit::Stop);
                    }
                    tags.push(slot.tag);
                    Ok(Visit::Continue)
                });
                match visited {
                    Ok(()) => (Outcome::Tags(tags), None),
                    Err(error) => (Outcome::Err(error), None),
                }
            }
            Op::Clear => {
                queue.clear();
                (Outcome::Done, None)
            }
        }
    }
}

fn record_outcome(result: Result<(u32, NodeId), QueueError>) -> Outcome {
    match result {
        Ok((tag, slot)) => Outcome::Record { tag, slot },
        Err(error) => Outcome::Err(error),
    }
}

fn done_outcome(result: Result<(), QueueError>) -> Outcome {
    match result {
        Ok(()) => Outcome::Done,
        Err(error) => Outcome::Err(error),
    }
}

// ---------------------------------------------------------------------------
// Sequence drivers
// ---------------------------------------------------------------------------

/// An alphabet touching every operation and every erase position class.
pub const STANDARD_OPS: [Op; 11] = [
    Op::Put(1),
    Op::Put(2),
    Op::PutFirst(3),
    Op::Pop,
    Op::Peek,
    Op::EraseNth(0),
    Op::EraseNth(1),
    Op::EraseSlot(0),
    Op::EraseTag(2),
    Op::StopAfter(1),
    Op::Clear,
];

/// Runs `ops` against a fresh queue over `storage`.
///
/// # Errors
///
/// Returns [`CheckError::Setup`] if `storage` cannot form a ring and
/// [`CheckError::Diverged`] on the first disagreement.
pub fn run_sequence(storage: &mut [Record], ops: &[Op]) -> Result<(), CheckError> {
    let mut checker = Checker::new(storage)?;
    checker.run(ops).map_err(|divergence| CheckError::Diverged {
        ops: ops.to_vec(),
        divergence,
    })
}

/// Runs every sequence of exactly `depth` ops drawn from `alphabet` against
/// a queue of `capacity` slots.
///
/// Returns the number of sequences checked: `alphabet.len().pow(depth)`.
///
/// # Errors
///
/// See [`run_sequence`].
pub fn exhaustive(capacity: usize, depth: usize, alphabet: &[Op]) -> Result<usize, CheckError> {
    let mut storage = vec![Record::default(); capacity];
    if alphabet.is_empty() {
        Checker::new(&mut storage)?;
        return Ok(0);
    }

    let mut digits = vec![0_usize; depth];
    let mut ops = Vec::with_capacity(depth);
    let mut checked = 0;
    loop {
        ops.clear();
        ops.extend(digits.iter().map(|&d| alphabet[d]));
        run_sequence(&mut storage, &ops)?;
        checked += 1;

        let mut i = 0;
        loop {
            if i == depth {
                return Ok(checked);
            }
            digits[i] += 1;
            if digits[i] < alphabet.len() {
                break;
            }
            digits[i] = 0;
            i += 1;
        }
    }
}
