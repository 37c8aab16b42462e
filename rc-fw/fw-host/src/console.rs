//! Console-backed writers standing in for the serial transports

use fw_core::ChannelWriter;
use std::io::{self, Write};

/// Writer that prints each line to a stream behind a channel label
pub struct LabeledWriter<W: Write> {
    label: &'static str,
    out: W,
}

impl LabeledWriter<io::Stdout> {
    pub fn stdout(label: &'static str) -> Self {
        Self::new(label, io::stdout())
    }
}

impl<W: Write> LabeledWriter<W> {
    pub fn new(label: &'static str, out: W) -> Self {
        Self { label, out }
    }
}

impl<W: Write> ChannelWriter for LabeledWriter<W> {
    fn write(&mut self, bytes: &[u8]) {
        // Best-effort like the real UARTs: a failed console write is dropped
        let _ = write!(self.out, "[{}] ", self.label)
            .and_then(|()| self.out.write_all(bytes))
            .and_then(|()| self.out.flush());
    }
}
