//! Transport writers
//!
//! Every output channel is driven through [`ChannelWriter`]. Writes are
//! fire-and-forget: a writer that cannot deliver drops the bytes and the
//! broadcaster never learns about it.

extern crate alloc;

pub mod fake;
pub mod queue;

pub use fake::RecordingWriter;
pub use queue::{OutboundQueue, QueueWriter};

use alloc::vec::Vec;

/// Non-blocking, best-effort byte sink for one channel
pub trait ChannelWriter {
    fn write(&mut self, bytes: &[u8]);
}

impl<W: ChannelWriter + ?Sized> ChannelWriter for &mut W {
    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes);
    }
}

impl ChannelWriter for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Writer for a transport the board does not have
#[derive(Debug, Clone, Copy, Default)]
pub struct NullWriter;

impl ChannelWriter for NullWriter {
    fn write(&mut self, _bytes: &[u8]) {}
}
