// Copyright 2026 the static_ring Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated message dispatcher that exercises the tracing and diagnostics
//! pipeline.
//!
//! Runs 40 synthetic ticks against an eight-slot queue: a producer enqueues
//! messages (urgent ones at the front), a slower consumer dequeues them, and
//! a periodic sweep cancels some in place. Every queue operation is recorded
//! by a [`RecorderSink`](static_ring_debug::recorder::RecorderSink); the
//! recording is then replayed through a
//! [`PrettyPrintSink`](static_ring_debug::pretty::PrettyPrintSink) and
//! exported as a Chrome trace JSON file.

use std::convert::Infallible;
use std::fs::File;
use std::io::BufWriter;

use static_ring_core::trace::Tracer;
use static_ring_core::{Node, QueueConfig, QueueError, StaticQueue, Visit, linked};

use static_ring_debug::pretty::PrettyPrintSink;
use static_ring_debug::recorder::{RecorderSink, replay};

const TICK_COUNT: u32 = 40;
const SLOTS: usize = 8;

#[derive(Clone, Copy, Debug, Default)]
struct Message {
    id: u32,
    urgent: bool,
    node: Node,
}

linked!(Message, node);

fn main() {
    let mut recorder = RecorderSink::new();
    let mut storage = [Message::default(); SLOTS];

    let mut delivered = 0_u32;
    let mut dropped = 0_u32;
    let mut cancelled = 0_u32;
    {
        let mut queue = StaticQueue::with_tracer(
            &mut storage,
            QueueConfig::realtime(),
            Tracer::new(&mut recorder),
        )
        .expect("storage is non-empty");

        for tick in 0..TICK_COUNT {
            // 1. Produce
            if tick % 3 != 2 {
                let urgent = tick % 7 == 0;
                let slot = if urgent {
                    queue.put_first()
                } else {
                    queue.put()
                };
                match slot {
                    Ok(mut message) => {
                        message.id = tick;
                        message.urgent = urgent;
                    }
                    Err(QueueError::Full) => dropped += 1,
                    Err(other) => panic!("unexpected enqueue failure: {other}"),
                }
            }

            // 2. Consume every other tick
            if tick % 2 == 1 {
                if let Ok(message) = queue.pop() {
                    delivered += 1;
                    let marker = if message.urgent { " (urgent)" } else { "" };
                    println!("tick {tick:2}: delivered message {}{marker}", message.id);
                }
            }

            // 3. Cancellation sweep
            if tick % 10 == 9 {
                queue
                    .for_each(|message| {
                        Ok::<_, Infallible>(if message.id % 4 == 0 && !message.urgent {
                            cancelled += 1;
                            Visit::Erase
                        } else {
                            Visit::Continue
                        })
                    })
                    .expect("sweep is infallible");
            }
        }

        let report = queue.audit().expect("queue structure is intact");
        println!(
            "final: {} queued of {} slots, {} stale",
            report.active,
            queue.capacity(),
            report.stale
        );
    }
    println!("delivered={delivered} dropped={dropped} cancelled={cancelled}");

    // -- replay ------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let events = replay(recorder.as_bytes(), &mut pretty);

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    static_ring_debug::chrome::export(recorder.as_bytes(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({events} events, {TICK_COUNT} ticks)");
}
