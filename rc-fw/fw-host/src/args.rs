use anyhow::{Result, bail};
use clap::Parser;
use fw_core::{ChannelState, ModuleFlags, module};
use std::num::NonZeroUsize;

/// Run the controller main loop on the host with simulated transports
#[derive(Debug, Parser)]
#[command(name = "fw-host", version)]
pub struct HostArgs {
    /// Number of main loop iterations
    #[arg(long, default_value_t = 10)]
    pub ticks: u32,

    /// Delay between iterations in milliseconds
    #[arg(long, default_value_t = 100)]
    pub interval_ms: u64,

    /// Start with a radio peer attached
    #[arg(long)]
    pub radio: bool,

    /// Start with a classic wireless serial client attached
    #[arg(long)]
    pub classic_serial: bool,

    /// Serve one simulated web command per iteration
    #[arg(long)]
    pub web: bool,

    /// Activate the secondary UART module
    #[arg(long)]
    pub secondary_serial: bool,

    /// Radio write window in bytes
    #[arg(long, default_value_t = 10)]
    pub window: usize,

    /// Toggle the radio peer every N iterations (0 = never)
    #[arg(long, default_value_t = 0)]
    pub radio_drop_every: u32,
}

impl HostArgs {
    pub fn window(&self) -> Result<NonZeroUsize> {
        match NonZeroUsize::new(self.window) {
            Some(window) => Ok(window),
            None => bail!("--window must be at least 1"),
        }
    }

    /// Connectivity flags before the first iteration
    pub fn initial_state(&self) -> ChannelState {
        let mut modules = ModuleFlags::empty();
        modules.set(module::SECONDARY_SERIAL, self.secondary_serial);

        ChannelState {
            radio_peer_attached: self.radio,
            classic_serial_attached: self.classic_serial,
            web_request_in_flight: false,
            modules,
        }
    }
}
