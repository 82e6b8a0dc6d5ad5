//! Startup configuration

use embassy_time::Duration;

use crate::effect::ShowKind;

/// Pixel count used when none is configured
pub const DEFAULT_PIXEL_COUNT: usize = 20;
/// Engine tick length
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);
pub const DEFAULT_BRIGHTNESS: f32 = 0.60;
pub const DEFAULT_SPEED: f32 = 1.0;
/// Progress bar falls back to the idle show after this long without updates
pub const DEFAULT_PROGRESS_TIMEOUT: Duration = Duration::from_secs(30);
/// Head blink period while playback is paused
pub const DEFAULT_PAUSED_BLINK: Duration = Duration::from_millis(500);
pub const DEFAULT_DEMO_INTERVAL: Duration = Duration::from_secs(15);
/// Longest time a single request may take before it is rejected
pub const DEFAULT_REQUEST_BUDGET: Duration = Duration::from_millis(500);

/// Configuration for the animation engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of LEDs on the strip
    pub pixel_count: usize,
    pub tick_interval: Duration,
    /// Show played when nothing else is active
    pub idle: ShowKind,
    /// Global brightness, 0.0-1.0
    pub brightness: f32,
    /// Global speed multiplier, 0.2-3.0
    pub speed: f32,
    pub progress_timeout: Duration,
    pub paused_blink: Duration,
    pub demo_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pixel_count: DEFAULT_PIXEL_COUNT,
            tick_interval: DEFAULT_TICK_INTERVAL,
            idle: ShowKind::Twinkle,
            brightness: DEFAULT_BRIGHTNESS,
            speed: DEFAULT_SPEED,
            progress_timeout: DEFAULT_PROGRESS_TIMEOUT,
            paused_blink: DEFAULT_PAUSED_BLINK,
            demo_interval: DEFAULT_DEMO_INTERVAL,
        }
    }
}

impl EngineConfig {
    /// Convert a duration to whole engine ticks, rounding up
    pub fn ticks_for(&self, duration: Duration) -> u64 {
        let tick_ms = self.tick_interval.as_millis().max(1);
        duration.as_millis().div_ceil(tick_ms)
    }
}

/// Configuration for the cooperative main loop
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub request_budget: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            request_budget: DEFAULT_REQUEST_BUDGET,
        }
    }
}
