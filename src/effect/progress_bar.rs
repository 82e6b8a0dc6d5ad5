//! Progress bar for "now playing" mode
//!
//! Filled bulbs glow with a gentle pulse, the rest stay dim. The bulb at the
//! current position is highlighted and blinks while playback is paused.

use core::f64::consts::TAU;

use embassy_time::Duration;

use super::{Effect, FrameContext};
use crate::{
    color::{Palette, Rgb, WARM, scale_color},
    math8::unit_to_u8,
    progress::PlaybackState,
};

const FILLED_LEVEL: f32 = 0.70;
const EMPTY_LEVEL: f32 = 0.04;
const HEAD_BOOST: f32 = 0.25;
const PULSE_AMPLITUDE: f32 = 0.05;
const PULSE_PHASE_STEP: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct ProgressBarEffect {
    filled: Rgb,
    head: Rgb,
}

impl ProgressBarEffect {
    pub fn new(palette: &Palette) -> Self {
        let filled = palette.get_or(0, WARM);
        Self {
            filled,
            head: palette.get_or(1, filled),
        }
    }

    /// Number of filled bulbs for a fraction on a strip of `len` bulbs
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn filled_count(fraction: f32, len: usize) -> usize {
        let filled = (fraction.clamp(0.0, 1.0) * len as f32 + 0.0001) as usize;
        filled.min(len)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn pulse(step: u32) -> f32 {
        let phase = libm::fmod(f64::from(step) * PULSE_PHASE_STEP, TAU);
        PULSE_AMPLITUDE * ((libm::sin(phase) + 1.0) * 0.5) as f32
    }
}

impl Effect for ProgressBarEffect {
    const STEP_PERIOD: Duration = Duration::from_millis(50);

    fn render(&self, frame: &FrameContext, leds: &mut [Rgb]) {
        let len = leds.len();
        if len == 0 {
            return;
        }

        let filled = Self::filled_count(frame.progress.fraction, len);
        let filled_color = scale_color(
            self.filled,
            unit_to_u8(FILLED_LEVEL + Self::pulse(frame.step)),
        );
        let empty_color = scale_color(self.filled, unit_to_u8(EMPTY_LEVEL));
        for (i, led) in leds.iter_mut().enumerate() {
            *led = if i < filled { filled_color } else { empty_color };
        }

        if frame.progress.head_visible && frame.progress.state != PlaybackState::Stopped {
            let head = filled.min(len - 1);
            leds[head] = scale_color(self.head, unit_to_u8(FILLED_LEVEL + HEAD_BOOST));
        }
    }
}
