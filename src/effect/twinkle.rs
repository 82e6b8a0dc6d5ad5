//! Bulb twinkle
//!
//! Each bulb glows at a slowly drifting base level. Now and then a random
//! bulb flares up and decays back. Randomness comes from hashing the step
//! index, so a frame depends only on the step it renders.

use embassy_time::Duration;
use heapless::Vec;

use super::{Effect, FrameContext};
use crate::{
    color::{Palette, Rgb, SOFT_WARM, scale_color},
    math8::{blend8, chance_permille, hash2, hash_range, scale8},
};

const BASE_MIN: u8 = 64;
const BASE_MAX: u8 = 140;
/// Steps between two base level keyframes
const DRIFT_STEPS: u32 = 16;

const TWINKLE_CHANCE_PERMILLE: u32 = 250;
const BOOST_MIN: u8 = 89;
const BOOST_MAX: u8 = 204;
/// Per-step decay of a flare (~0.82)
const DECAY: u8 = 209;
/// Flares older than this have decayed below visibility
const TWINKLE_WINDOW: u32 = 16;

const SALT_CHANCE: u64 = 0x7477_696e;
const SALT_PIXEL: u64 = 0x6b6c_6521;
const SALT_BOOST: u64 = 0x626f_6f73;
const SALT_BASE: u64 = 0x6261_7365;

#[derive(Debug, Clone)]
pub struct TwinkleEffect {
    palette: Palette,
}

impl TwinkleEffect {
    pub fn new(palette: &Palette) -> Self {
        Self {
            palette: palette.clone(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn base_level(step: u32, pixel: usize) -> u8 {
        let cell = u64::from(step / DRIFT_STEPS);
        let frac = ((step % DRIFT_STEPS) * 256 / DRIFT_STEPS) as u8;
        let pixel = pixel as u64 ^ SALT_BASE;
        let from = hash_range(hash2(cell, pixel), BASE_MIN, BASE_MAX);
        let to = hash_range(hash2(cell + 1, pixel), BASE_MIN, BASE_MAX);
        blend8(from, to, frac)
    }

    /// Collect flares still visible at `step` as (pixel, level) pairs
    fn flares(step: u32, len: usize) -> Vec<(usize, u8), { TWINKLE_WINDOW as usize }> {
        let mut flares = Vec::new();
        for age in 0..TWINKLE_WINDOW {
            let Some(origin) = step.checked_sub(age) else {
                break;
            };
            let origin = u64::from(origin);
            if !chance_permille(hash2(origin, SALT_CHANCE), TWINKLE_CHANCE_PERMILLE) {
                continue;
            }
            let pixel = hash2(origin, SALT_PIXEL) as usize % len;
            let mut level = hash_range(hash2(origin, SALT_BOOST), BOOST_MIN, BOOST_MAX);
            for _ in 0..=age {
                level = scale8(level, DECAY);
            }
            let _ = flares.push((pixel, level));
        }
        flares
    }
}

impl Effect for TwinkleEffect {
    const STEP_PERIOD: Duration = Duration::from_millis(60);

    fn render(&self, frame: &FrameContext, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }

        let flares = Self::flares(frame.step, leds.len());
        for (i, led) in leds.iter_mut().enumerate() {
            let flare = flares
                .iter()
                .filter(|(pixel, _)| *pixel == i)
                .map(|(_, level)| *level)
                .max()
                .unwrap_or(0);
            let level = Self::base_level(frame.step, i).saturating_add(flare);
            *led = scale_color(self.palette.cycle_or(i, SOFT_WARM), level);
        }
    }
}
