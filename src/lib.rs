#![no_std]

pub mod api;
pub mod color;
pub mod config;
pub mod driver;
pub mod effect;
pub mod engine;
pub mod error;
pub mod event;
pub mod http;
pub mod math8;
pub mod progress;
pub mod scheduler;
pub mod server;
pub mod show;

pub use config::{EngineConfig, ServerConfig};
pub use driver::{NullOutput, SmartLedsOutput};
pub use effect::{EffectSlot, ShowKind};
pub use engine::{Engine, EngineStatus, EventOutcome, Layer, Settings, ShowOutcome};
pub use error::{ConfigError, Error};
pub use progress::PlaybackState;
pub use scheduler::{TickResult, TickScheduler};
pub use server::{Listener, LoopPhase, MainLoop};
pub use show::{Show, ShowSpec};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The engine is generic over this trait.
pub trait OutputDriver {
    type Error: core::fmt::Debug;

    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error>;
}
