// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`], and [`replay`] feeds a recording into
//! another sink.

use static_ring_core::QueueError;
use static_ring_core::trace::{
    ClearEvent, EraseEvent, EraseKind, OpKind, PopEvent, PutEnd, PutEvent, RejectEvent,
    TailRepairEvent, TraceSink, VisitSummary,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PUT: u8 = 1;
const TAG_POP: u8 = 2;
const TAG_ERASE: u8 = 3;
const TAG_CLEAR: u8 = 4;
const TAG_REJECT: u8 = 5;
const TAG_TAIL_REPAIR: u8 = 6;
const TAG_VISIT_SUMMARY: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_end(&mut self, end: PutEnd) {
        self.write_u8(match end {
            PutEnd::Head => 0,
            PutEnd::Tail => 1,
        });
    }

    fn write_op(&mut self, op: OpKind) {
        self.write_u8(match op {
            OpKind::Put => 0,
            OpKind::PutFirst => 1,
            OpKind::Pop => 2,
            OpKind::Peek => 3,
            OpKind::Erase => 4,
        });
    }

    fn write_erase_kind(&mut self, kind: EraseKind) {
        self.write_u8(match kind {
            EraseKind::Sole => 0,
            EraseKind::Oldest => 1,
            EraseKind::Newest => 2,
            EraseKind::Interior => 3,
        });
    }

    /// Writes the error discriminant followed by its payload (zero if none).
    fn write_error(&mut self, error: QueueError) {
        let (code, payload) = match error {
            QueueError::Full => (0, 0),
            QueueError::Empty => (1, 0),
            QueueError::NotInQueue => (2, 0),
            QueueError::InvalidCapacity { capacity } => (3, capacity as u64),
        };
        self.write_u8(code);
        self.write_u64(payload);
    }
}

impl TraceSink for RecorderSink {
    fn on_put(&mut self, e: &PutEvent) {
        self.write_u8(TAG_PUT);
        self.write_u64(e.op_index);
        self.write_u32(e.slot);
        self.write_end(e.end);
        self.write_u32(e.len);
    }

    fn on_pop(&mut self, e: &PopEvent) {
        self.write_u8(TAG_POP);
        self.write_u64(e.op_index);
        self.write_u32(e.slot);
        self.write_u32(e.len);
    }

    fn on_erase(&mut self, e: &EraseEvent) {
        self.write_u8(TAG_ERASE);
        self.write_u64(e.op_index);
        self.write_u32(e.slot);
        self.write_erase_kind(e.kind);
        self.write_u32(e.len);
    }

    fn on_clear(&mut self, e: &ClearEvent) {
        self.write_u8(TAG_CLEAR);
        self.write_u64(e.op_index);
        self.write_u32(e.released);
    }

    fn on_reject(&mut self, e: &RejectEvent) {
        self.write_u8(TAG_REJECT);
        self.write_u64(e.op_index);
        self.write_op(e.op);
        self.write_error(e.error);
    }

    fn on_tail_repair(&mut self, e: &TailRepairEvent) {
        self.write_u8(TAG_TAIL_REPAIR);
        self.write_u64(e.op_index);
        self.write_u32(e.skipped);
        self.write_bool(e.reset);
    }

    fn on_visit_summary(&mut self, s: &VisitSummary) {
        self.write_u8(TAG_VISIT_SUMMARY);
        self.write_u64(s.op_index);
        self.write_u32(s.visited);
        self.write_u32(s.erased);
        self.write_bool(s.stopped);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`PutEvent`].
    Put(PutEvent),
    /// A [`PopEvent`].
    Pop(PopEvent),
    /// An [`EraseEvent`].
    Erase(EraseEvent),
    /// A [`ClearEvent`].
    Clear(ClearEvent),
    /// A [`RejectEvent`].
    Reject(RejectEvent),
    /// A [`TailRepairEvent`].
    TailRepair(TailRepairEvent),
    /// A [`VisitSummary`].
    VisitSummary(VisitSummary),
}

impl RecordedEvent {
    /// Returns the operation counter of the event.
    #[must_use]
    pub fn op_index(&self) -> u64 {
        match self {
            Self::Put(e) => e.op_index,
            Self::Pop(e) => e.op_index,
            Self::Erase(e) => e.op_index,
            Self::Clear(e) => e.op_index,
            Self::Reject(e) => e.op_index,
            Self::TailRepair(e) => e.op_index,
            Self::VisitSummary(s) => s.op_index,
        }
    }

    /// Dispatches the event to the matching [`TraceSink`] method.
    pub fn emit(&self, sink: &mut dyn TraceSink) {
        match self {
            Self::Put(e) => sink.on_put(e),
            Self::Pop(e) => sink.on_pop(e),
            Self::Erase(e) => sink.on_erase(e),
            Self::Clear(e) => sink.on_clear(e),
            Self::Reject(e) => sink.on_reject(e),
            Self::TailRepair(e) => sink.on_tail_repair(e),
            Self::VisitSummary(s) => sink.on_visit_summary(s),
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Feeds every event of a recording into `sink`, in recorded order.
///
/// Returns the number of events delivered.
pub fn replay(bytes: &[u8], sink: &mut dyn TraceSink) -> usize {
    let mut delivered = 0;
    for event in decode(bytes) {
        event.emit(sink);
        delivered += 1;
    }
    delivered
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_end(&mut self) -> Option<PutEnd> {
        Some(match self.read_u8()? {
            0 => PutEnd::Head,
            _ => PutEnd::Tail,
        })
    }

    fn read_op(&mut self) -> Option<OpKind> {
        Some(match self.read_u8()? {
            0 => OpKind::Put,
            1 => OpKind::PutFirst,
            2 => OpKind::Pop,
            3 => OpKind::Peek,
            _ => OpKind::Erase,
        })
    }

    fn read_erase_kind(&mut self) -> Option<EraseKind> {
        Some(match self.read_u8()? {
            0 => EraseKind::Sole,
            1 => EraseKind::Oldest,
            2 => EraseKind::Newest,
            _ => EraseKind::Interior,
        })
    }

    fn read_error(&mut self) -> Option<QueueError> {
        let code = self.read_u8()?;
        let payload = self.read_u64()?;
        Some(match code {
            0 => QueueError::Full,
            1 => QueueError::Empty,
            2 => QueueError::NotInQueue,
            _ => QueueError::InvalidCapacity {
                capacity: usize::try_from(payload).unwrap_or(usize::MAX),
            },
        })
    }

    fn decode_put(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Put(PutEvent {
            op_index: self.read_u64()?,
            slot: self.read_u32()?,
            end: self.read_end()?,
            len: self.read_u32()?,
        }))
    }

    fn decode_pop(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Pop(PopEvent {
            op_index: self.read_u64()?,
            slot: self.read_u32()?,
            len: self.read_u32()?,
        }))
    }

    fn decode_erase(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Erase(EraseEvent {
            op_index: self.read_u64()?,
            slot: self.read_u32()?,
            kind: self.read_erase_kind()?,
            len: self.read_u32()?,
        }))
    }

    fn decode_clear(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Clear(ClearEvent {
            op_index: self.read_u64()?,
            released: self.read_u32()?,
        }))
    }

    fn decode_reject(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Reject(RejectEvent {
            op_index: self.read_u64()?,
            op: self.read_op()?,
            error: self.read_error()?,
        }))
    }

    fn decode_tail_repair(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TailRepair(TailRepairEvent {
            op_index: self.read_u64()?,
            skipped: self.read_u32()?,
            reset: self.read_bool()?,
        }))
    }

    fn decode_visit_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::VisitSummary(VisitSummary {
            op_index: self.read_u64()?,
            visited: self.read_u32()?,
            erased: self.read_u32()?,
            stopped: self.read_bool()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_PUT => self.decode_put(),
            TAG_POP => self.decode_pop(),
            TAG_ERASE => self.decode_erase(),
            TAG_CLEAR => self.decode_clear(),
            TAG_REJECT => self.decode_reject(),
            TAG_TAIL_REPAIR => self.decode_tail_repair(),
            TAG_VISIT_SUMMARY => self.decode_visit_summary(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use static_ring_core::trace::Tracer;
    use static_ring_core::{Node, NodeId, QueueConfig, StaticQueue, Visit, linked};

    use super::*;

    #[derive(Default)]
    struct Item {
        node: Node,
    }

    linked!(Item, node);

    /// Runs a short session against a traced queue and returns the bytes.
    fn record_session() -> Vec<u8> {
        let mut rec = RecorderSink::new();
        {
            let mut items: [Item; 3] = Default::default();
            let mut queue = StaticQueue::with_tracer(
                &mut items,
                QueueConfig::default(),
                Tracer::new(&mut rec),
            )
            .unwrap();
            queue.put().unwrap();
            queue.put().unwrap();
            queue.put_first().unwrap();
            assert!(queue.put().is_err());
            queue.erase(NodeId::from_index(1)).unwrap();
            queue.pop().unwrap();
            queue
                .for_each(|_| Ok::<_, ()>(Visit::Continue))
                .unwrap();
            queue.clear();
            assert!(queue.pop().is_err());
        }
        rec.into_bytes()
    }

    #[test]
    fn records_a_queue_session() {
        let events: Vec<_> = decode(&record_session()).collect();
        let tags: Vec<_> = events
            .iter()
            .map(|e| match e {
                RecordedEvent::Put(_) => "put",
                RecordedEvent::Pop(_) => "pop",
                RecordedEvent::Erase(_) => "erase",
                RecordedEvent::Clear(_) => "clear",
                RecordedEvent::Reject(_) => "reject",
                RecordedEvent::TailRepair(_) => "repair",
                RecordedEvent::VisitSummary(_) => "visit",
            })
            .collect();
        assert_eq!(
            tags,
            ["put", "put", "put", "reject", "erase", "pop", "visit", "clear", "reject"]
        );

        let op_indices: Vec<u64> = events.iter().map(RecordedEvent::op_index).collect();
        assert_eq!(op_indices, [0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn decodes_field_values() {
        let events: Vec<_> = decode(&record_session()).collect();
        assert_eq!(
            events[2],
            RecordedEvent::Put(PutEvent {
                op_index: 2,
                slot: 2,
                end: PutEnd::Tail,
                len: 3,
            })
        );
        assert_eq!(
            events[3],
            RecordedEvent::Reject(RejectEvent {
                op_index: 3,
                op: OpKind::Put,
                error: QueueError::Full,
            })
        );
        assert_eq!(
            events[4],
            RecordedEvent::Erase(EraseEvent {
                op_index: 4,
                slot: 1,
                kind: EraseKind::Newest,
                len: 2,
            })
        );
        assert_eq!(
            events[7],
            RecordedEvent::Clear(ClearEvent {
                op_index: 7,
                released: 1,
            })
        );
    }

    #[test]
    fn replay_reproduces_recording() {
        let bytes = record_session();
        let mut copy = RecorderSink::new();
        let delivered = replay(&bytes, &mut copy);
        assert_eq!(delivered, 9);
        assert_eq!(copy.as_bytes(), bytes.as_slice());
    }

    #[test]
    fn reject_payload_survives() {
        let mut rec = RecorderSink::new();
        let orig = RejectEvent {
            op_index: 11,
            op: OpKind::Erase,
            error: QueueError::InvalidCapacity { capacity: 0 },
        };
        rec.on_reject(&orig);
        assert_eq!(
            decode(rec.as_bytes()).next(),
            Some(RecordedEvent::Reject(orig))
        );
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_tail_repair(&TailRepairEvent {
            op_index: 1,
            skipped: 2,
            reset: false,
        });
        rec.on_clear(&ClearEvent {
            op_index: 2,
            released: 0,
        });
        let bytes = rec.into_bytes();
        let cut = &bytes[..bytes.len() - 1];
        let events: Vec<_> = decode(cut).collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], RecordedEvent::TailRepair(_)));
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }
}
