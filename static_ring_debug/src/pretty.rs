// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Every line
//! starts with a bracketed event name and the operation counter.

use std::io::Write;

use static_ring_core::trace::{
    ClearEvent, EraseEvent, EraseKind, OpKind, PopEvent, PutEnd, PutEvent, RejectEvent,
    TailRepairEvent, TraceSink, VisitSummary,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn end_name(end: PutEnd) -> &'static str {
    match end {
        PutEnd::Head => "head",
        PutEnd::Tail => "tail",
    }
}

fn op_name(op: OpKind) -> &'static str {
    match op {
        OpKind::Put => "put",
        OpKind::PutFirst => "put_first",
        OpKind::Pop => "pop",
        OpKind::Peek => "peek",
        OpKind::Erase => "erase",
    }
}

fn erase_name(kind: EraseKind) -> &'static str {
    match kind {
        EraseKind::Sole => "sole",
        EraseKind::Oldest => "oldest",
        EraseKind::Newest => "newest",
        EraseKind::Interior => "interior",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_put(&mut self, e: &PutEvent) {
        let _ = writeln!(
            self.writer,
            "[put] op={} slot={} end={} len={}",
            e.op_index,
            e.slot,
            end_name(e.end),
            e.len,
        );
    }

    fn on_pop(&mut self, e: &PopEvent) {
        let _ = writeln!(
            self.writer,
            "[pop] op={} slot={} len={}",
            e.op_index, e.slot, e.len,
        );
    }

    fn on_erase(&mut self, e: &EraseEvent) {
        let _ = writeln!(
            self.writer,
            "[erase] op={} slot={} kind={} len={}",
            e.op_index,
            e.slot,
            erase_name(e.kind),
            e.len,
        );
    }

    fn on_clear(&mut self, e: &ClearEvent) {
        let _ = writeln!(
            self.writer,
            "[clear] op={} released={}",
            e.op_index, e.released,
        );
    }

    fn on_reject(&mut self, e: &RejectEvent) {
        let _ = writeln!(
            self.writer,
            "[reject] op={} {} code={}: {}",
            e.op_index,
            op_name(e.op),
            e.error.code(),
            e.error,
        );
    }

    fn on_tail_repair(&mut self, e: &TailRepairEvent) {
        let outcome = if e.reset { "RESET" } else { "ok" };
        let _ = writeln!(
            self.writer,
            "[repair] op={} skipped={} {outcome}",
            e.op_index, e.skipped,
        );
    }

    fn on_visit_summary(&mut self, s: &VisitSummary) {
        let ended = if s.stopped { "early" } else { "done" };
        let _ = writeln!(
            self.writer,
            "[visit] op={} visited={} erased={} {ended}",
            s.op_index, s.visited, s.erased,
        );
    }
}
