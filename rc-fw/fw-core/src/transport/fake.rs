//! Recording writer for testing and development
//!
//! Keeps every write it receives so tests (and a host build without hardware)
//! can inspect exactly what a channel would have sent.

extern crate alloc;

use super::ChannelWriter;
use alloc::vec::Vec;

/// Writer that records each write as a separate entry
///
/// Implements ChannelWriter but:
/// - `write()` stores a copy of the bytes
/// - nothing is ever transmitted
#[derive(Debug, Clone, Default)]
pub struct RecordingWriter {
    writes: Vec<Vec<u8>>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self { writes: Vec::new() }
    }

    /// Writes in the order they were made
    pub fn writes(&self) -> &[Vec<u8>] {
        &self.writes
    }

    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// All writes concatenated
    pub fn joined(&self) -> Vec<u8> {
        self.writes.concat()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl ChannelWriter for RecordingWriter {
    fn write(&mut self, bytes: &[u8]) {
        log::trace!("RecordingWriter: {} bytes", bytes.len());

        self.writes.push(bytes.to_vec());
    }
}
