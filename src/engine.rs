//! Animation engine - owns the active show and the pixel buffer

use embassy_time::Duration;
use serde::Serialize;

use crate::OutputDriver;
use crate::color::{BLACK, Rgb};
use crate::config::EngineConfig;
use crate::effect::{IDLE_SHOW_NAMES, ShowKind, TIMED_SHOW_NAMES};
use crate::error::{ConfigError, Error};
use crate::event::{EVENT_NAMES, find_event};
use crate::math8::unit_to_u8;
use crate::progress::{PlaybackState, ProgressTracker};
use crate::show::{MAX_SPEED, MIN_SPEED, Show, ShowChange, ShowSlot, ShowSpec, show_seconds};

pub const MIN_DEMO_SECONDS: u32 = 5;
pub const MAX_DEMO_SECONDS: u32 = 120;

/// Idle shows the demo mode cycles through
const DEMO_ORDER: &[ShowKind] = &[ShowKind::Twinkle, ShowKind::Breath];

/// Source rendered on the current tick, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Timed show started by a request or an event
    Overlay,
    /// Push-driven progress bar
    Progress,
    /// Persistent base show
    Idle,
}

impl Layer {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overlay => "overlay",
            Self::Progress => "progress",
            Self::Idle => "idle",
        }
    }
}

/// User adjustable output settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub enabled: bool,
    /// 0.0-1.0
    pub brightness: f32,
    /// 0.2-3.0
    pub speed: f32,
}

impl Settings {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn speed_permille(self) -> u32 {
        libm::roundf(self.speed * 1000.0) as u32
    }
}

/// Result of a successful show change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowOutcome {
    pub show: ShowKind,
    /// Set for timed shows
    pub seconds: Option<u32>,
}

/// Result of a triggered event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOutcome {
    pub event: &'static str,
    pub show: ShowKind,
    pub seconds: u32,
}

/// Snapshot of the engine for the status endpoint
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub enabled: bool,
    pub count: usize,
    pub brightness: f32,
    pub speed: f32,
    pub idle: &'static str,
    pub active: &'static str,
    pub layer: &'static str,
    pub show_active: bool,
    pub show: &'static str,
    pub show_ms_remaining: u64,
    pub demo: bool,
    pub demo_interval_s: u32,
    pub progress_active: bool,
    pub progress_pct: f32,
    pub progress_state: &'static str,
    pub idle_modes: &'static [&'static str],
    pub show_modes: &'static [&'static str],
    pub events: &'static [&'static str],
    pub tick: u64,
}

#[derive(Debug, Clone)]
struct Overlay {
    slot: ShowSlot,
    remaining_ticks: u64,
}

#[derive(Debug, Clone, Copy)]
struct DemoState {
    enabled: bool,
    interval_seconds: u32,
    elapsed_ticks: u64,
    index: usize,
}

/// Animation engine - the main orchestrator
///
/// Renders exactly one show per tick into a fixed pixel buffer. All
/// mutations go through `&mut self`, so a request handled between two ticks
/// never observes a half-updated show.
pub struct Engine<const MAX_LEDS: usize> {
    // Configuration
    config: EngineConfig,

    // Internal state
    settings: Settings,
    idle: ShowSlot,
    overlay: Option<Overlay>,
    progress: ProgressTracker,
    progress_slot: ShowSlot,
    demo: DemoState,
    tick: u64,
    layer: Layer,

    frame_buffer: [Rgb; MAX_LEDS],
    output_buffer: [Rgb; MAX_LEDS],
}

impl<const MAX_LEDS: usize> Engine<MAX_LEDS> {
    /// Create a new engine from the startup configuration
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        if config.pixel_count == 0 || config.pixel_count > MAX_LEDS {
            return Err(ConfigError::PixelCount {
                requested: config.pixel_count,
                capacity: MAX_LEDS,
            });
        }
        if config.tick_interval.as_millis() == 0 {
            return Err(ConfigError::TickInterval);
        }

        let settings = Settings {
            enabled: true,
            brightness: clamp_or(config.brightness, 0.0, 1.0, 1.0),
            speed: clamp_or(config.speed, MIN_SPEED, MAX_SPEED, 1.0),
        };
        let demo_seconds = u32::try_from(config.demo_interval.as_secs())
            .unwrap_or(MAX_DEMO_SECONDS)
            .clamp(MIN_DEMO_SECONDS, MAX_DEMO_SECONDS);

        Ok(Self {
            progress: ProgressTracker::new(
                config.ticks_for(config.progress_timeout),
                config.ticks_for(config.paused_blink),
            ),
            settings,
            idle: ShowSlot::new(Show::new(config.idle)),
            overlay: None,
            progress_slot: ShowSlot::new(Show::new(ShowKind::Progress)),
            demo: DemoState {
                enabled: false,
                interval_seconds: demo_seconds,
                elapsed_ticks: 0,
                index: 0,
            },
            tick: 0,
            layer: Layer::Idle,
            frame_buffer: [Rgb::default(); MAX_LEDS],
            output_buffer: [Rgb::default(); MAX_LEDS],
            config: config.clone(),
        })
    }

    /// Validate and apply a show request
    ///
    /// Without `seconds` the show replaces the idle show and cancels any
    /// timed show. With `seconds` it runs as a timed show on top. On error
    /// nothing changes.
    pub fn set_show(&mut self, spec: &ShowSpec<'_>) -> Result<ShowOutcome, Error> {
        let change = spec.validate()?;
        Ok(self.apply_show(change))
    }

    fn apply_show(&mut self, change: ShowChange) -> ShowOutcome {
        let kind = change.show.kind();
        if let Some(fraction) = change.progress {
            self.progress.set_manual(fraction);
        }

        match change.seconds {
            Some(seconds) => self.start_overlay(change.show, seconds),
            None => {
                log::info!("engine: idle show set to {}", kind.as_str());
                self.idle = ShowSlot::new(change.show);
                self.overlay = None;
            }
        }

        ShowOutcome {
            show: kind,
            seconds: change.seconds,
        }
    }

    /// Replace the idle show with a default-parameter show by name
    pub fn set_idle(&mut self, name: &str) -> Result<ShowKind, Error> {
        let kind = ShowKind::parse_from_str(name).ok_or(Error::InvalidShow)?;
        self.idle = ShowSlot::new(Show::new(kind));
        log::info!("engine: idle show set to {}", kind.as_str());
        Ok(kind)
    }

    /// Run the show bound to a semantic event
    pub fn trigger_event(
        &mut self,
        name: &str,
        seconds_override: Option<i32>,
    ) -> Result<EventOutcome, Error> {
        let binding = find_event(name).ok_or(Error::UnknownEvent)?;
        let seconds = seconds_override
            .map(show_seconds)
            .transpose()?
            .unwrap_or(binding.seconds);

        self.start_overlay(Show::new(binding.show), seconds);
        Ok(EventOutcome {
            event: binding.name,
            show: binding.show,
            seconds,
        })
    }

    fn start_overlay(&mut self, show: Show, seconds: u32) {
        log::info!(
            "engine: timed show {} for {}s",
            show.kind().as_str(),
            seconds
        );
        let remaining_ticks = self
            .config
            .ticks_for(Duration::from_secs(u64::from(seconds)));
        self.overlay = Some(Overlay {
            slot: ShowSlot::new(show),
            remaining_ticks,
        });
    }

    /// Cancel the timed show, if any
    pub fn stop_show(&mut self) {
        self.overlay = None;
    }

    /// Record a progress push; returns the stored (clamped) fraction
    pub fn update_progress(
        &mut self,
        fraction: Option<f32>,
        state: PlaybackState,
    ) -> Result<f32, Error> {
        self.progress.update(fraction, state, self.tick)
    }

    /// Change global brightness and speed
    ///
    /// Finite values are clamped to their ranges, both inputs are checked
    /// before either is applied.
    pub fn configure(
        &mut self,
        brightness: Option<f32>,
        speed: Option<f32>,
    ) -> Result<Settings, Error> {
        if brightness.is_some_and(|b| !b.is_finite()) {
            return Err(Error::InvalidParameter("brightness must be a finite number"));
        }
        if speed.is_some_and(|s| !s.is_finite()) {
            return Err(Error::InvalidParameter("speed must be a finite number"));
        }
        if let Some(brightness) = brightness {
            self.settings.brightness = brightness.clamp(0.0, 1.0);
        }
        if let Some(speed) = speed {
            self.settings.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        }
        Ok(self.settings)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
    }

    /// Toggle demo mode; returns the interval in seconds
    ///
    /// The interval is clamped to 5..=120 s.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    pub fn set_demo(&mut self, enabled: bool, interval_seconds: Option<i32>) -> u32 {
        if let Some(seconds) = interval_seconds {
            self.demo.interval_seconds = seconds
                .clamp(MIN_DEMO_SECONDS as i32, MAX_DEMO_SECONDS as i32)
                as u32;
        }
        if enabled && !self.demo.enabled {
            let idle = self.idle.kind();
            self.demo.index = DEMO_ORDER.iter().position(|k| *k == idle).unwrap_or(0);
            self.demo.elapsed_ticks = 0;
        }
        self.demo.enabled = enabled;
        self.demo.interval_seconds
    }

    /// Advance time by `elapsed_ticks` and render the next frame
    ///
    /// The frame depends only on the ticks elapsed so far and the show
    /// parameters.
    pub fn advance(&mut self, elapsed_ticks: u32) -> &[Rgb] {
        self.tick = self.tick.saturating_add(u64::from(elapsed_ticks));
        self.expire_overlay(elapsed_ticks);
        self.advance_demo(elapsed_ticks);

        self.layer = if self.overlay.is_some() {
            Layer::Overlay
        } else if self.progress.is_active(self.tick) {
            Layer::Progress
        } else {
            Layer::Idle
        };

        let frame = &mut self.frame_buffer[..self.config.pixel_count];
        if !self.settings.enabled {
            frame.fill(BLACK);
            return frame;
        }

        let slot = match (self.layer, self.overlay.as_mut()) {
            (Layer::Overlay, Some(overlay)) => &mut overlay.slot,
            (Layer::Progress, _) => &mut self.progress_slot,
            _ => &mut self.idle,
        };
        slot.advance(
            elapsed_ticks,
            self.config.tick_interval,
            self.settings.speed_permille(),
        );
        slot.render(self.progress.view(self.tick), frame);

        frame
    }

    fn expire_overlay(&mut self, elapsed_ticks: u32) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        overlay.remaining_ticks = overlay
            .remaining_ticks
            .saturating_sub(u64::from(elapsed_ticks));
        if overlay.remaining_ticks == 0 {
            log::debug!("engine: timed show {} finished", overlay.slot.kind().as_str());
            self.overlay = None;
        }
    }

    fn advance_demo(&mut self, elapsed_ticks: u32) {
        if !self.demo.enabled || self.overlay.is_some() {
            return;
        }
        self.demo.elapsed_ticks += u64::from(elapsed_ticks);
        let interval = self
            .config
            .ticks_for(Duration::from_secs(u64::from(self.demo.interval_seconds)));
        if self.demo.elapsed_ticks >= interval {
            self.demo.elapsed_ticks = 0;
            self.demo.index = (self.demo.index + 1) % DEMO_ORDER.len();
            self.idle = ShowSlot::new(Show::new(DEMO_ORDER[self.demo.index]));
        }
    }

    /// Write the current frame to the strip with global brightness applied
    pub fn flush<O: OutputDriver>(&mut self, output: &mut O) -> Result<(), Error> {
        let count = self.config.pixel_count;
        let level = unit_to_u8(self.settings.brightness);
        let scaled = smart_leds::brightness(self.frame_buffer[..count].iter().copied(), level);
        for (out, color) in self.output_buffer.iter_mut().zip(scaled) {
            *out = color;
        }

        output.write(&self.output_buffer[..count]).map_err(|e| {
            log::warn!("engine: led write failed: {:?}", e);
            Error::HardwareWriteFailure
        })
    }

    /// Last rendered frame
    pub fn frame(&self) -> &[Rgb] {
        &self.frame_buffer[..self.config.pixel_count]
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Layer rendered by the last `advance`
    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn idle_show(&self) -> &Show {
        self.idle.show()
    }

    pub fn timed_show(&self) -> Option<&Show> {
        self.overlay.as_ref().map(|overlay| overlay.slot.show())
    }

    /// Kind of the show rendered by the last `advance`
    pub fn active_kind(&self) -> ShowKind {
        match (self.layer, &self.overlay) {
            (Layer::Overlay, Some(overlay)) => overlay.slot.kind(),
            (Layer::Progress, _) => ShowKind::Progress,
            _ => self.idle.kind(),
        }
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn status(&self) -> EngineStatus {
        let tick_ms = self.config.tick_interval.as_millis();
        EngineStatus {
            enabled: self.settings.enabled,
            count: self.config.pixel_count,
            brightness: self.settings.brightness,
            speed: self.settings.speed,
            idle: self.idle.kind().as_str(),
            active: self.active_kind().as_str(),
            layer: self.layer.as_str(),
            show_active: self.overlay.is_some(),
            show: self
                .overlay
                .as_ref()
                .map_or("", |overlay| overlay.slot.kind().as_str()),
            show_ms_remaining: self
                .overlay
                .as_ref()
                .map_or(0, |overlay| overlay.remaining_ticks * tick_ms),
            demo: self.demo.enabled,
            demo_interval_s: self.demo.interval_seconds,
            progress_active: self.progress.is_active(self.tick),
            progress_pct: self.progress.fraction(),
            progress_state: self.progress.state().as_str(),
            idle_modes: IDLE_SHOW_NAMES,
            show_modes: TIMED_SHOW_NAMES,
            events: EVENT_NAMES,
            tick: self.tick,
        }
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
