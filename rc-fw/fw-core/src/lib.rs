//! Firmware core library.
//!
//! This crate provides the output fan-out shared between controller firmware
//! builds: one status line is formatted once and delivered to every active
//! output channel (short-range radio, classic wireless serial, the pending web
//! response, the secondary UART and the local echo console).

#![no_std]

pub mod broadcast;
pub mod channel;
pub mod echo;
pub mod fragment;
pub mod payload;
pub mod response;
pub mod state;
pub mod transport;

pub use broadcast::Broadcaster;
pub use channel::{Channel, ChannelConfig, ChannelRegistry};
pub use echo::LogEcho;
pub use fragment::{Fragments, RADIO_WINDOW, fragment};
pub use payload::{Terminator, TerminatedPayload, format};
pub use response::{ResponseBuffer, SENTINEL, accumulate};
pub use state::{ChannelState, ModuleFlags, SharedChannelState, module};
pub use transport::{ChannelWriter, NullWriter, QueueWriter, RecordingWriter};
