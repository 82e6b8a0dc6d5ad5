//! Show definitions and the running show slot.

use embassy_time::Duration;

use crate::color::{Palette, Rgb};
use crate::effect::{EffectSlot, FrameContext, ShowKind};
use crate::error::Error;
use crate::progress::{ProgressTracker, ProgressView};

/// Slowest accepted speed multiplier
pub const MIN_SPEED: f32 = 0.2;
/// Fastest accepted speed multiplier
pub const MAX_SPEED: f32 = 3.0;
/// Longest timed show
pub const MAX_SHOW_SECONDS: u32 = 60;

const SPEED_ONE: u32 = 1000;

/// Validate a speed multiplier and convert it to permille
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn speed_permille(speed: f32) -> Result<u32, Error> {
    if !speed.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(Error::InvalidParameter("speed must be within 0.2..=3.0"));
    }
    Ok(libm::roundf(speed * 1000.0) as u32)
}

/// Validate a show duration in seconds
#[allow(clippy::cast_sign_loss)]
pub fn show_seconds(seconds: i32) -> Result<u32, Error> {
    if seconds < 1 || seconds as u32 > MAX_SHOW_SECONDS {
        return Err(Error::InvalidParameter("seconds must be within 1..=60"));
    }
    Ok(seconds as u32)
}

/// A validated show: kind plus parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    kind: ShowKind,
    palette: Palette,
    speed_permille: u32,
}

impl Show {
    /// Show with default colors and speed
    pub const fn new(kind: ShowKind) -> Self {
        Self {
            kind,
            palette: Palette::new(),
            speed_permille: SPEED_ONE,
        }
    }

    pub const fn kind(&self) -> ShowKind {
        self.kind
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn speed(&self) -> f32 {
        self.speed_permille as f32 / 1000.0
    }
}

/// Raw show request as received from a caller
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowSpec<'a> {
    pub kind: &'a str,
    pub colors: &'a [Rgb],
    pub speed: Option<f32>,
    /// Run as a timed show for this many seconds
    pub seconds: Option<i32>,
    /// Progress fraction for the `progress` kind
    pub progress: Option<f32>,
}

/// Fully validated show change
#[derive(Debug, Clone, PartialEq)]
pub struct ShowChange {
    pub show: Show,
    pub seconds: Option<u32>,
    pub progress: Option<f32>,
}

impl ShowSpec<'_> {
    /// Validate every field without touching any engine state
    pub fn validate(&self) -> Result<ShowChange, Error> {
        let kind = ShowKind::parse_from_str(self.kind).ok_or(Error::InvalidShow)?;
        let palette = Palette::from_slice(self.colors)
            .ok_or(Error::InvalidParameter("too many colors"))?;
        let speed_permille = self.speed.map_or(Ok(SPEED_ONE), speed_permille)?;
        let seconds = self.seconds.map(show_seconds).transpose()?;
        let progress = match self.progress {
            Some(_) if kind != ShowKind::Progress => {
                return Err(Error::InvalidParameter("progress applies to the progress show only"));
            }
            Some(fraction) => Some(ProgressTracker::clamp_fraction(fraction)?),
            None => None,
        };

        Ok(ShowChange {
            show: Show {
                kind,
                palette,
                speed_permille,
            },
            seconds,
            progress,
        })
    }
}

/// A show being played, with its own step counter
#[derive(Debug, Clone)]
pub struct ShowSlot {
    show: Show,
    effect: EffectSlot,
    /// Elapsed time in microseconds, scaled by speed
    scaled_elapsed_us: u64,
}

impl ShowSlot {
    pub fn new(show: Show) -> Self {
        let effect = show.kind.to_slot(&show.palette);
        Self {
            show,
            effect,
            scaled_elapsed_us: 0,
        }
    }

    pub fn show(&self) -> &Show {
        &self.show
    }

    pub fn kind(&self) -> ShowKind {
        self.effect.kind()
    }

    /// Move the animation forward by `ticks` ticks of `tick_interval`
    ///
    /// `global_speed_permille` multiplies the show's own speed.
    pub fn advance(&mut self, ticks: u32, tick_interval: Duration, global_speed_permille: u32) {
        let speed = u64::from(self.show.speed_permille) * u64::from(global_speed_permille)
            / u64::from(SPEED_ONE);
        let elapsed_us = u64::from(ticks) * tick_interval.as_micros();
        self.scaled_elapsed_us = self
            .scaled_elapsed_us
            .saturating_add(elapsed_us * speed / u64::from(SPEED_ONE));
    }

    /// Current animation step
    #[allow(clippy::cast_possible_truncation)]
    pub fn step(&self) -> u32 {
        let period_us = self.effect.step_period().as_micros().max(1);
        (self.scaled_elapsed_us / period_us).min(u64::from(u32::MAX)) as u32
    }

    pub fn render(&self, progress: ProgressView, leds: &mut [Rgb]) {
        let frame = FrameContext {
            step: self.step(),
            progress,
        };
        self.effect.render(&frame, leds);
    }
}
