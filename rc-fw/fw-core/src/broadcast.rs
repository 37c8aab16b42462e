//! Output fan-out
//!
//! [`Broadcaster`] owns one writer per output channel and delivers a single
//! formatted line to every channel that is active for the current
//! [`ChannelState`] snapshot. Delivery is best-effort: nothing is retried,
//! nothing is reported, and one channel never affects another.

use crate::channel::{Channel, ChannelConfig, ChannelRegistry};
use crate::fragment::{RADIO_WINDOW, fragment};
use crate::payload::{Terminator, format};
use crate::response::{ResponseBuffer, accumulate};
use crate::state::{ChannelState, SharedChannelState};
use crate::transport::ChannelWriter;
use core::fmt::Display;
use core::num::NonZeroUsize;

/// Fan-out of status lines to all active output channels
///
/// # Arguments
///
/// * `R` - short-range radio writer, receives one write per fragment
/// * `C` - classic wireless serial writer
/// * `S` - secondary UART writer
/// * `E` - local echo writer, written on every call
pub struct Broadcaster<R, C, S, E> {
    registry: ChannelRegistry,
    window: NonZeroUsize,
    radio: R,
    classic_serial: C,
    secondary_serial: S,
    echo: E,
}

impl<R, C, S, E> Broadcaster<R, C, S, E>
where
    R: ChannelWriter,
    C: ChannelWriter,
    S: ChannelWriter,
    E: ChannelWriter,
{
    /// Create a broadcaster for the channels compiled into this build
    pub fn new(radio: R, classic_serial: C, secondary_serial: S, echo: E) -> Self {
        Self {
            registry: ChannelRegistry::new(ChannelConfig::BUILD),
            window: RADIO_WINDOW,
            radio,
            classic_serial,
            secondary_serial,
            echo,
        }
    }

    /// Restrict the optional channels further
    ///
    /// Channels missing from the build stay disabled whatever `config` says.
    pub fn with_config(mut self, config: ChannelConfig) -> Self {
        self.registry = ChannelRegistry::new(ChannelConfig::BUILD.intersect(config));
        self
    }

    /// Override the radio write window
    pub fn with_window(mut self, window: NonZeroUsize) -> Self {
        self.window = window;
        self
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    pub fn window(&self) -> NonZeroUsize {
        self.window
    }

    /// Send `value` followed by `\r\n` to every active channel
    pub fn broadcast<T: Display + ?Sized>(
        &mut self,
        value: &T,
        state: &ChannelState,
        response: &mut ResponseBuffer,
    ) {
        self.broadcast_with(value, Terminator::CrLf, state, response);
    }

    /// Take one snapshot of `shared` and broadcast against it
    pub fn broadcast_from<T: Display + ?Sized>(
        &mut self,
        value: &T,
        shared: &SharedChannelState,
        response: &mut ResponseBuffer,
    ) {
        let state = shared.snapshot();
        self.broadcast(value, &state, response);
    }

    /// Send `value` with an explicit terminator to every active channel
    ///
    /// The line is formatted once. Each channel is gated on its own flags,
    /// and the local echo always runs last.
    pub fn broadcast_with<T: Display + ?Sized>(
        &mut self,
        value: &T,
        terminator: Terminator,
        state: &ChannelState,
        response: &mut ResponseBuffer,
    ) {
        let payload = format(value, terminator);

        if self.is_active(Channel::ShortRangeRadio, state) {
            let fragments = fragment(payload.as_bytes(), self.window);
            log::trace!(
                "broadcast: {} bytes to {} in {} fragments",
                payload.len(),
                Channel::ShortRangeRadio,
                fragments.len()
            );
            for piece in fragments {
                self.radio.write(piece);
            }
        }

        if self.is_active(Channel::ClassicSerial, state) {
            self.classic_serial.write(payload.as_bytes());
        }

        if self.is_active(Channel::WebResponse, state) {
            accumulate(response, &payload);
        }

        if self.is_active(Channel::SecondarySerial, state) {
            self.secondary_serial.write(payload.as_bytes());
        }

        self.echo.write(payload.as_bytes());
    }

    /// Build-time inclusion is checked against constants first so a channel
    /// missing from the build leaves no code behind.
    fn is_active(&self, channel: Channel, state: &ChannelState) -> bool {
        let active = ChannelConfig::BUILD.includes(channel) && self.registry.is_active(channel, state);
        if !active {
            log::trace!("broadcast: skipping {channel}");
        }
        active
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    pub fn classic_serial(&self) -> &C {
        &self.classic_serial
    }

    pub fn classic_serial_mut(&mut self) -> &mut C {
        &mut self.classic_serial
    }

    pub fn secondary_serial(&self) -> &S {
        &self.secondary_serial
    }

    pub fn secondary_serial_mut(&mut self) -> &mut S {
        &mut self.secondary_serial
    }

    pub fn echo(&self) -> &E {
        &self.echo
    }

    pub fn echo_mut(&mut self) -> &mut E {
        &mut self.echo
    }

    /// Release the writers
    pub fn into_writers(self) -> (R, C, S, E) {
        (self.radio, self.classic_serial, self.secondary_serial, self.echo)
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "short-range-radio")]
    extern crate alloc;

    use super::*;
    #[cfg(feature = "short-range-radio")]
    use alloc::vec::Vec;
    use crate::state::{ModuleFlags, module};
    use crate::transport::RecordingWriter;

    type TestBroadcaster =
        Broadcaster<RecordingWriter, RecordingWriter, RecordingWriter, RecordingWriter>;

    fn broadcaster() -> TestBroadcaster {
        Broadcaster::new(
            RecordingWriter::new(),
            RecordingWriter::new(),
            RecordingWriter::new(),
            RecordingWriter::new(),
        )
    }

    fn serial2_only() -> ChannelState {
        ChannelState {
            modules: ModuleFlags::empty().with(module::SECONDARY_SERIAL),
            ..ChannelState::DISCONNECTED
        }
    }

    #[test]
    fn test_echo_runs_with_everything_disconnected() {
        let mut b = broadcaster().with_config(ChannelConfig::NONE);
        let mut response = ResponseBuffer::new();

        b.broadcast("idle", &ChannelState::DISCONNECTED, &mut response);
        b.broadcast_with(&7, Terminator::None, &ChannelState::DISCONNECTED, &mut response);

        assert_eq!(b.echo().writes(), [b"idle\r\n".to_vec(), b"7".to_vec()]);
        assert_eq!(b.radio().write_count(), 0);
        assert_eq!(b.classic_serial().write_count(), 0);
        assert_eq!(b.secondary_serial().write_count(), 0);
        assert!(response.is_empty());
    }

    #[test]
    fn test_secondary_serial_follows_module_flag_only() {
        let mut b = broadcaster();
        let mut response = ResponseBuffer::new();

        b.broadcast("bat 7.9", &serial2_only(), &mut response);
        assert_eq!(b.secondary_serial().writes(), [b"bat 7.9\r\n".to_vec()]);

        b.broadcast("bat 7.8", &ChannelState::DISCONNECTED, &mut response);
        assert_eq!(b.secondary_serial().write_count(), 1);
        assert_eq!(b.echo().write_count(), 2);
    }

    #[test]
    fn test_with_config_cannot_widen_build() {
        let b = broadcaster().with_config(ChannelConfig::ALL);
        assert_eq!(b.registry().config(), ChannelConfig::BUILD);
    }

    #[cfg(feature = "short-range-radio")]
    #[test]
    fn test_radio_receives_fragments_in_order() {
        let mut b = broadcaster();
        let mut response = ResponseBuffer::new();
        let state = ChannelState {
            radio_peer_attached: true,
            ..ChannelState::DISCONNECTED
        };

        b.broadcast("A".repeat(25).as_str(), &state, &mut response);

        let lengths: Vec<usize> = b.radio().writes().iter().map(|w| w.len()).collect();
        assert_eq!(lengths, [10, 10, 7]);
        assert_eq!(b.radio().joined(), b.echo().joined());
        assert_eq!(b.classic_serial().write_count(), 0);
    }

    #[cfg(feature = "web-response")]
    #[test]
    fn test_web_response_skips_sentinel() {
        let mut b = broadcaster();
        let mut response = ResponseBuffer::new();
        let state = ChannelState {
            web_request_in_flight: true,
            ..ChannelState::DISCONNECTED
        };

        b.broadcast("=", &state, &mut response);
        assert!(response.is_empty());
        b.broadcast("status", &state, &mut response);
        assert_eq!(response.as_str(), "status\r\n");
        assert_eq!(b.echo().write_count(), 2);
    }
}
