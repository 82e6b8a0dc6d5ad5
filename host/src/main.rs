//! Host runner for marquee-lights
//!
//! Serves the control API on a TCP port and renders into a logging output,
//! driven by the same cooperative loop the firmware uses.

mod cli;
mod driver;
mod net;

use anyhow::Context as _;
use clap::Parser;
use log::{debug, info};
use marquee_lights::{Engine, Instant, MainLoop};

use crate::cli::Args;
use crate::driver::LogOutput;
use crate::net::TcpListenerSource;

/// Maximum number of LEDs the engine supports
const MAX_LEDS: usize = 300;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = match args.verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
    debug!("Command-line args: {:?}", args);

    let engine_config = args
        .engine_config()
        .context("invalid engine configuration")?;
    let mut engine =
        Engine::<MAX_LEDS>::new(&engine_config).context("invalid engine configuration")?;
    if args.demo {
        engine.set_demo(true, None);
    }

    let listener = TcpListenerSource::bind(args.listen, engine_config.tick_interval.into())?;
    info!(
        "marquee-lights: {} pixels, idle {}, listening on http://{}",
        engine_config.pixel_count,
        engine_config.idle.as_str(),
        listener.local_addr().unwrap_or(args.listen)
    );

    let mut main_loop = MainLoop::new(
        listener,
        LogOutput::new(args.log_frames),
        engine,
        args.server_config(),
    );
    loop {
        let sleep = main_loop.turn(Instant::now());
        std::thread::sleep(std::time::Duration::from_micros(sleep.as_micros()));
    }
}
