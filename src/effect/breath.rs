//! Breathing glow
//!
//! The whole strip fades in and out along a sine wave.

use core::f64::consts::TAU;

use embassy_time::Duration;

use super::{Effect, FrameContext};
use crate::{
    color::{Palette, Rgb, WARM, scale_color},
    math8::unit_to_u8,
};

const MIN_LEVEL: f32 = 0.06;
const MAX_LEVEL: f32 = 0.70;
const PHASE_STEP: f64 = 0.06;

#[derive(Debug, Clone)]
pub struct BreathEffect {
    color: Rgb,
}

impl BreathEffect {
    pub fn new(palette: &Palette) -> Self {
        Self {
            color: palette.get_or(0, WARM),
        }
    }

    /// Brightness level for a given step
    #[allow(clippy::cast_possible_truncation)]
    pub fn level_at(step: u32) -> u8 {
        let phase = libm::fmod(f64::from(step) * PHASE_STEP, TAU);
        let wave = ((libm::sin(phase) + 1.0) * 0.5) as f32;
        unit_to_u8(MIN_LEVEL + (MAX_LEVEL - MIN_LEVEL) * wave)
    }
}

impl Effect for BreathEffect {
    const STEP_PERIOD: Duration = Duration::from_millis(20);

    fn render(&self, frame: &FrameContext, leds: &mut [Rgb]) {
        leds.fill(scale_color(self.color, Self::level_at(frame.step)));
    }
}
