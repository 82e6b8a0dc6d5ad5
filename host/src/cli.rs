use std::net::SocketAddr;

use clap::Parser;
use marquee_lights::{ConfigError, Duration, EngineConfig, ServerConfig, ShowKind};

/// Marquee LED controller with a JSON control API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address the HTTP API listens on
    #[arg(long, env = "LIGHTS_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Number of LEDs on the strip
    #[arg(long, env = "LIGHTS_PIXELS", default_value_t = 20)]
    pub pixels: usize,

    /// Engine tick length in milliseconds
    #[arg(long, env = "LIGHTS_TICK_MS", default_value_t = 10)]
    pub tick_ms: u64,

    /// Global brightness (0.0..1.0)
    #[arg(long, env = "LIGHTS_BRIGHTNESS", default_value_t = 0.6)]
    pub brightness: f32,

    /// Global speed multiplier (0.2..3.0)
    #[arg(long, env = "LIGHTS_SPEED", default_value_t = 1.0)]
    pub speed: f32,

    /// Show played when nothing else is active
    #[arg(long, env = "LIGHTS_IDLE", default_value = "twinkle")]
    pub idle: String,

    /// Start with demo mode cycling the idle shows
    #[arg(long)]
    pub demo: bool,

    /// Time allowed to receive one request before answering 408
    #[arg(long, env = "LIGHTS_REQUEST_BUDGET_MS", default_value_t = 500)]
    pub request_budget_ms: u64,

    /// Log every Nth rendered frame at debug level (0 disables)
    #[arg(long, default_value_t = 100)]
    pub log_frames: u64,

    /// Increase logging verbosity (default: info, -v: debug, -vv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Args {
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let idle = ShowKind::parse_from_str(&self.idle).ok_or(ConfigError::IdleShow)?;
        Ok(EngineConfig {
            pixel_count: self.pixels,
            tick_interval: Duration::from_millis(self.tick_ms),
            idle,
            brightness: self.brightness,
            speed: self.speed,
            ..EngineConfig::default()
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            request_budget: Duration::from_millis(self.request_budget_ms),
        }
    }
}
