// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes Chrome Trace Event Format JSON to the given writer.
//!
//! Queues have no clock, so the operation counter is used as the timestamp:
//! one operation per microsecond on the timeline. Events that change the
//! number of live nodes also emit a `len` counter sample, which the viewer
//! draws as an occupancy track.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// # Errors
///
/// Returns any error from writing to `writer`.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        let ts = recorded.op_index();
        match recorded {
            RecordedEvent::Put(e) => {
                events.push(instant("Put", "Queue", ts, json!({
                    "slot": e.slot,
                    "end": format!("{:?}", e.end),
                })));
                events.push(counter(ts, e.len));
            }
            RecordedEvent::Pop(e) => {
                events.push(instant("Pop", "Queue", ts, json!({ "slot": e.slot })));
                events.push(counter(ts, e.len));
            }
            RecordedEvent::Erase(e) => {
                events.push(instant("Erase", "Queue", ts, json!({
                    "slot": e.slot,
                    "kind": format!("{:?}", e.kind),
                })));
                events.push(counter(ts, e.len));
            }
            RecordedEvent::Clear(e) => {
                events.push(instant("Clear", "Queue", ts, json!({
                    "released": e.released,
                })));
                events.push(counter(ts, 0));
            }
            RecordedEvent::Reject(e) => {
                events.push(instant("Reject", "Error", ts, json!({
                    "op": format!("{:?}", e.op),
                    "code": e.error.code(),
                    "error": e.error.to_string(),
                })));
            }
            RecordedEvent::TailRepair(e) => {
                events.push(instant("TailRepair", "Repair", ts, json!({
                    "skipped": e.skipped,
                    "reset": e.reset,
                })));
            }
            RecordedEvent::VisitSummary(s) => {
                events.push(instant("ForEach", "Visit", ts, json!({
                    "visited": s.visited,
                    "erased": s.erased,
                    "stopped": s.stopped,
                })));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn instant(name: &str, cat: &str, ts: u64, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": ts,
        "pid": 0,
        "tid": 0,
        "s": "t",
        "args": args,
    })
}

fn counter(ts: u64, len: u32) -> Value {
    json!({
        "ph": "C",
        "name": "len",
        "ts": ts,
        "pid": 0,
        "tid": 0,
        "args": { "len": len },
    })
}
