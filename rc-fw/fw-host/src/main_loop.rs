//! Main loop for the host firmware build
//!
//! Mirrors the controller's cooperative loop: emit telemetry through the
//! broadcaster, then let the "I/O task" drain the radio queue.

use crate::args::HostArgs;
use crate::console::LabeledWriter;
use anyhow::{Result, anyhow, bail};
use fw_core::transport::OutboundQueue;
use fw_core::{Broadcaster, LogEcho, QueueWriter, ResponseBuffer, SENTINEL, SharedChannelState};
use std::num::NonZeroUsize;
use std::thread;
use std::time::{Duration, Instant};

/// Radio fragments waiting for the radio stack
static RADIO_OUT: OutboundQueue = OutboundQueue::new();

/// Run `args.ticks` iterations against `state`
pub fn run_main_loop(args: &HostArgs, window: NonZeroUsize, state: &'static SharedChannelState) -> Result<()> {
    let mut broadcaster = Broadcaster::new(
        QueueWriter::new(&RADIO_OUT),
        LabeledWriter::stdout("bt"),
        LabeledWriter::stdout("serial2"),
        LogEcho,
    )
    .with_window(window);
    let mut response = ResponseBuffer::new();

    let interval = Duration::from_millis(args.interval_ms);
    let radio_stack = match radio_toggle_period(interval, args.radio_drop_every)? {
        Some(period) => Some(spawn_radio_stack(state, period, args.ticks / args.radio_drop_every)),
        None => None,
    };

    let start = Instant::now();
    for tick in 0..args.ticks {
        if args.web {
            state.set_web_request_in_flight(true);
        }

        let uptime_ms = start.elapsed().as_millis();
        broadcaster.broadcast_from(
            &format_args!("heartbeat: tick={tick} uptime_ms={uptime_ms}"),
            state,
            &mut response,
        );

        if args.web {
            // Command acknowledgement token, never part of the web body
            broadcaster.broadcast_from(SENTINEL, state, &mut response);
            state.set_web_request_in_flight(false);
            print!("[web] {}", response.take());
        }

        for fragment in QueueWriter::drain(&RADIO_OUT) {
            println!("[radio] {:?}", String::from_utf8_lossy(&fragment));
        }

        thread::sleep(interval);
    }

    let dropped = broadcaster.radio().dropped();
    if dropped > 0 {
        log::warn!("{dropped} radio writes dropped");
    }

    match radio_stack {
        Some(handle) => handle
            .join()
            .map_err(|_| anyhow!("radio stack thread panicked")),
        None => Ok(()),
    }
}

/// Time between radio peer toggles, `None` when the peer never toggles
fn radio_toggle_period(interval: Duration, every: u32) -> Result<Option<Duration>> {
    if every == 0 {
        return Ok(None);
    }
    match interval.checked_mul(every) {
        Some(period) => Ok(Some(period)),
        None => bail!("--interval-ms times --radio-drop-every overflows"),
    }
}

/// Simulated radio stack: attaches and detaches the peer from its own thread
fn spawn_radio_stack(
    state: &'static SharedChannelState,
    period: Duration,
    toggles: u32,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for _ in 0..toggles {
            thread::sleep(period);
            let mut attached = false;
            state.update(|s| {
                s.radio_peer_attached = !s.radio_peer_attached;
                attached = s.radio_peer_attached;
            });
            log::info!("radio peer {}", if attached { "attached" } else { "detached" });
        }
    })
}
