//! Host firmware application.
//!
//! Runs the controller main loop on a development machine. Radio, classic
//! serial, the web server and the secondary UART are simulated; broadcast
//! lines show up on stdout and the local echo goes through the logger.

mod args;
mod console;
mod main_loop;

use anyhow::Result;
use args::HostArgs;
use clap::Parser;
use fw_core::{ChannelConfig, ChannelState, SharedChannelState};
use main_loop::run_main_loop;

/// Connectivity flags, written by the simulated collaborators
static CHANNEL_STATE: SharedChannelState = SharedChannelState::new(ChannelState::DISCONNECTED);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = HostArgs::parse();
    let window = args.window()?;

    let initial = args.initial_state();
    CHANNEL_STATE.update(|state| *state = initial);

    log::info!("fw-host starting...");
    log::debug!("build channels: {:?}", ChannelConfig::BUILD);
    log::debug!("initial state: {initial:?}");

    run_main_loop(&args, window, &CHANNEL_STATE)?;

    log::info!("fw-host finished after {} ticks", args.ticks);
    Ok(())
}
