//! Effect system with compile-time known effect variants
//!
//! All effects are stored in an enum to avoid heap allocations.
//! Each effect implements the `Effect` trait and renders a frame purely from
//! its step index, so the same sequence of ticks always yields the same
//! frames.

mod breath;
mod double_chase;
mod marquee;
mod progress_bar;
mod solid;
mod twinkle;
mod wipe;

use embassy_time::Duration;

pub use breath::BreathEffect;
pub use double_chase::DoubleChaseEffect;
pub use marquee::MarqueeEffect;
pub use progress_bar::ProgressBarEffect;
pub use solid::SolidEffect;
pub use twinkle::TwinkleEffect;
pub use wipe::{WipeEffect, WipeStage};

use crate::color::{Palette, Rgb};
use crate::progress::ProgressView;

const SHOW_NAME_SOLID: &str = "solid";
const SHOW_NAME_BREATH: &str = "breath";
const SHOW_NAME_TWINKLE: &str = "twinkle";
const SHOW_NAME_MARQUEE: &str = "marquee";
const SHOW_NAME_DOUBLE: &str = "double";
const SHOW_NAME_WIPE: &str = "wipe";
const SHOW_NAME_PROGRESS: &str = "progress";

const SHOW_ALIAS_FADE: &str = "fade";
const SHOW_ALIAS_CHASE: &str = "chase";

/// Ambient shows offered for the idle layer
pub const IDLE_SHOW_NAMES: &[&str] = &[SHOW_NAME_TWINKLE, SHOW_NAME_BREATH, SHOW_NAME_SOLID];

/// Shows offered as timed overlays
pub const TIMED_SHOW_NAMES: &[&str] = &[SHOW_NAME_WIPE, SHOW_NAME_DOUBLE, SHOW_NAME_MARQUEE];

/// Per-frame inputs shared by all effects
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Number of animation steps since the show started, already scaled by
    /// speed and the effect's step period
    pub step: u32,
    /// Progress bar state, only read by the progress effect
    pub progress: ProgressView,
}

pub trait Effect {
    /// Duration of one animation step at speed 1.0
    const STEP_PERIOD: Duration;

    /// Render a single frame
    fn render(&self, frame: &FrameContext, leds: &mut [Rgb]);
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    Solid(SolidEffect),
    Breath(BreathEffect),
    Twinkle(TwinkleEffect),
    Marquee(MarqueeEffect),
    DoubleChase(DoubleChaseEffect),
    Wipe(WipeEffect),
    ProgressBar(ProgressBarEffect),
}

/// Known show kinds that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowKind {
    Solid,
    Breath,
    Twinkle,
    Marquee,
    Double,
    Wipe,
    Progress,
}

impl ShowKind {
    pub fn to_slot(self, palette: &Palette) -> EffectSlot {
        match self {
            Self::Solid => EffectSlot::Solid(SolidEffect::new(palette)),
            Self::Breath => EffectSlot::Breath(BreathEffect::new(palette)),
            Self::Twinkle => EffectSlot::Twinkle(TwinkleEffect::new(palette)),
            Self::Marquee => EffectSlot::Marquee(MarqueeEffect::new(palette)),
            Self::Double => EffectSlot::DoubleChase(DoubleChaseEffect::new(palette)),
            Self::Wipe => EffectSlot::Wipe(WipeEffect::new(palette)),
            Self::Progress => EffectSlot::ProgressBar(ProgressBarEffect::new(palette)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => SHOW_NAME_SOLID,
            Self::Breath => SHOW_NAME_BREATH,
            Self::Twinkle => SHOW_NAME_TWINKLE,
            Self::Marquee => SHOW_NAME_MARQUEE,
            Self::Double => SHOW_NAME_DOUBLE,
            Self::Wipe => SHOW_NAME_WIPE,
            Self::Progress => SHOW_NAME_PROGRESS,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            SHOW_NAME_SOLID => Some(Self::Solid),
            SHOW_NAME_BREATH | SHOW_ALIAS_FADE => Some(Self::Breath),
            SHOW_NAME_TWINKLE => Some(Self::Twinkle),
            SHOW_NAME_MARQUEE | SHOW_ALIAS_CHASE => Some(Self::Marquee),
            SHOW_NAME_DOUBLE => Some(Self::Double),
            SHOW_NAME_WIPE => Some(Self::Wipe),
            SHOW_NAME_PROGRESS => Some(Self::Progress),
            _ => None,
        }
    }
}

impl EffectSlot {
    /// Duration of one step at speed 1.0
    pub fn step_period(&self) -> Duration {
        match self {
            Self::Solid(_) => SolidEffect::STEP_PERIOD,
            Self::Breath(_) => BreathEffect::STEP_PERIOD,
            Self::Twinkle(_) => TwinkleEffect::STEP_PERIOD,
            Self::Marquee(_) => MarqueeEffect::STEP_PERIOD,
            Self::DoubleChase(_) => DoubleChaseEffect::STEP_PERIOD,
            Self::Wipe(_) => WipeEffect::STEP_PERIOD,
            Self::ProgressBar(_) => ProgressBarEffect::STEP_PERIOD,
        }
    }

    /// Render the current effect
    pub fn render(&self, frame: &FrameContext, leds: &mut [Rgb]) {
        match self {
            Self::Solid(effect) => effect.render(frame, leds),
            Self::Breath(effect) => effect.render(frame, leds),
            Self::Twinkle(effect) => effect.render(frame, leds),
            Self::Marquee(effect) => effect.render(frame, leds),
            Self::DoubleChase(effect) => effect.render(frame, leds),
            Self::Wipe(effect) => effect.render(frame, leds),
            Self::ProgressBar(effect) => effect.render(frame, leds),
        }
    }

    /// Get the show kind for external observation
    pub fn kind(&self) -> ShowKind {
        match self {
            Self::Solid(_) => ShowKind::Solid,
            Self::Breath(_) => ShowKind::Breath,
            Self::Twinkle(_) => ShowKind::Twinkle,
            Self::Marquee(_) => ShowKind::Marquee,
            Self::DoubleChase(_) => ShowKind::Double,
            Self::Wipe(_) => ShowKind::Wipe,
            Self::ProgressBar(_) => ShowKind::Progress,
        }
    }
}
