//! Firmware integration test helpers

use fw_core::{Broadcaster, ChannelState, ModuleFlags, RecordingWriter, ResponseBuffer, module};

/// Broadcaster with every channel recorded
pub type RecordingBroadcaster =
    Broadcaster<RecordingWriter, RecordingWriter, RecordingWriter, RecordingWriter>;

/// Broadcaster plus the web response buffer it appends to
pub struct Harness {
    pub broadcaster: RecordingBroadcaster,
    pub response: ResponseBuffer,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            broadcaster: Broadcaster::new(
                RecordingWriter::new(),
                RecordingWriter::new(),
                RecordingWriter::new(),
                RecordingWriter::new(),
            ),
            response: ResponseBuffer::new(),
        }
    }

    pub fn broadcast(&mut self, value: &str, state: &ChannelState) {
        self.broadcaster.broadcast(value, state, &mut self.response);
    }

    pub fn radio(&self) -> &RecordingWriter {
        self.broadcaster.radio()
    }

    pub fn classic_serial(&self) -> &RecordingWriter {
        self.broadcaster.classic_serial()
    }

    pub fn secondary_serial(&self) -> &RecordingWriter {
        self.broadcaster.secondary_serial()
    }

    pub fn echo(&self) -> &RecordingWriter {
        self.broadcaster.echo()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// Every link attached, a web request open and the secondary UART active
pub fn all_connected() -> ChannelState {
    ChannelState {
        radio_peer_attached: true,
        classic_serial_attached: true,
        web_request_in_flight: true,
        modules: ModuleFlags::empty().with(module::SECONDARY_SERIAL),
    }
}

/// Only the radio peer attached
pub fn radio_only() -> ChannelState {
    ChannelState {
        radio_peer_attached: true,
        ..ChannelState::DISCONNECTED
    }
}

/// Only a web request open
pub fn web_only() -> ChannelState {
    ChannelState {
        web_request_in_flight: true,
        ..ChannelState::DISCONNECTED
    }
}
