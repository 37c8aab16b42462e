//! Queue-backed writer for decoupling the main loop from transport I/O
//!
//! The main loop pushes each write onto an embassy-sync channel and an I/O
//! task drains it onto the actual transport. A full queue drops the write
//! instead of blocking the broadcast.

extern crate alloc;

use super::ChannelWriter;
use alloc::vec::Vec;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TryReceiveError, TrySendError};

/// Queue depth between the main loop and an I/O task
pub const QUEUE_DEPTH: usize = 32;

/// Queue type shared by a [`QueueWriter`] and the I/O task draining it
pub type OutboundQueue = Channel<CriticalSectionRawMutex, Vec<u8>, QUEUE_DEPTH>;

/// Writer that enqueues each write for an I/O task
///
/// # Example
///
/// ```no_run
/// use fw_core::transport::{ChannelWriter, OutboundQueue, QueueWriter};
///
/// static RADIO_OUT: OutboundQueue = OutboundQueue::new();
///
/// // Main loop
/// let mut writer = QueueWriter::new(&RADIO_OUT);
/// writer.write(b"OK\r\n");
///
/// // I/O task
/// for fragment in QueueWriter::drain(&RADIO_OUT) {
///     // hand `fragment` to the radio stack
///     let _ = fragment;
/// }
/// ```
pub struct QueueWriter {
    queue: &'static OutboundQueue,
    dropped: u32,
}

impl QueueWriter {
    pub fn new(queue: &'static OutboundQueue) -> Self {
        Self { queue, dropped: 0 }
    }

    /// Writes dropped because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Get reference to the queue (for the I/O task)
    pub fn queue(&self) -> &'static OutboundQueue {
        self.queue
    }

    /// Receive all queued writes (non-blocking)
    ///
    /// Returns an empty vector if nothing is queued.
    pub fn drain(queue: &OutboundQueue) -> Vec<Vec<u8>> {
        let mut writes = Vec::new();
        let receiver = queue.receiver();

        loop {
            match receiver.try_receive() {
                Ok(bytes) => writes.push(bytes),
                Err(TryReceiveError::Empty) => break,
            }
        }

        writes
    }
}

impl ChannelWriter for QueueWriter {
    fn write(&mut self, bytes: &[u8]) {
        match self.queue.sender().try_send(bytes.to_vec()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped = self.dropped.saturating_add(1);
                log::warn!(
                    "QueueWriter: queue full, dropped {} bytes ({} total)",
                    bytes.len(),
                    self.dropped
                );
            }
        }
    }
}
