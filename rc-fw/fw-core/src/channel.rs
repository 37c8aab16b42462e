//! Output channels and the capability registry
//!
//! Whether a channel receives a line depends on two independent things: the
//! channel being compiled into this build, and the channel being connected or
//! activated right now.

use crate::state::{ChannelState, module};
use core::fmt;

/// Output channel variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Short-range radio link with bounded write size
    ShortRangeRadio,
    /// Classic wireless serial stream
    ClassicSerial,
    /// Body of the web response currently being served
    WebResponse,
    /// Secondary hardware UART
    SecondarySerial,
    /// Local debug console
    LocalEcho,
}

impl Channel {
    /// All channels, in broadcast order
    pub const ALL: [Channel; 5] = [
        Channel::ShortRangeRadio,
        Channel::ClassicSerial,
        Channel::WebResponse,
        Channel::SecondarySerial,
        Channel::LocalEcho,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Channel::ShortRangeRadio => "radio",
            Channel::ClassicSerial => "classic-serial",
            Channel::WebResponse => "web",
            Channel::SecondarySerial => "serial2",
            Channel::LocalEcho => "echo",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional channels included in a build
///
/// The secondary serial port and the local echo are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    pub short_range_radio: bool,
    pub classic_serial: bool,
    pub web_response: bool,
}

impl ChannelConfig {
    /// Channels selected by cargo features
    pub const BUILD: Self = Self {
        short_range_radio: cfg!(feature = "short-range-radio"),
        classic_serial: cfg!(feature = "classic-serial"),
        web_response: cfg!(feature = "web-response"),
    };

    pub const ALL: Self = Self {
        short_range_radio: true,
        classic_serial: true,
        web_response: true,
    };

    pub const NONE: Self = Self {
        short_range_radio: false,
        classic_serial: false,
        web_response: false,
    };

    /// Channels enabled in both configs
    pub const fn intersect(self, other: Self) -> Self {
        Self {
            short_range_radio: self.short_range_radio && other.short_range_radio,
            classic_serial: self.classic_serial && other.classic_serial,
            web_response: self.web_response && other.web_response,
        }
    }

    /// Whether `channel` is part of this configuration
    pub const fn includes(self, channel: Channel) -> bool {
        match channel {
            Channel::ShortRangeRadio => self.short_range_radio,
            Channel::ClassicSerial => self.classic_serial,
            Channel::WebResponse => self.web_response,
            Channel::SecondarySerial | Channel::LocalEcho => true,
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::BUILD
    }
}

/// Decides per call which channels receive the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRegistry {
    config: ChannelConfig,
}

impl ChannelRegistry {
    pub const fn new(config: ChannelConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> ChannelConfig {
        self.config
    }

    /// Included in the configuration and currently connected or activated
    ///
    /// Each channel is evaluated on its own flags only.
    pub const fn is_active(&self, channel: Channel, state: &ChannelState) -> bool {
        if !self.config.includes(channel) {
            return false;
        }
        match channel {
            Channel::ShortRangeRadio => state.radio_peer_attached,
            Channel::ClassicSerial => state.classic_serial_attached,
            Channel::WebResponse => state.web_request_in_flight,
            Channel::SecondarySerial => state.modules.is_active(module::SECONDARY_SERIAL),
            Channel::LocalEcho => true,
        }
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new(ChannelConfig::BUILD)
    }
}
