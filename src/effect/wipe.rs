//! Wipe, hold and pop
//!
//! Loops through three stages: the strip fills one bulb per step, holds
//! fully lit while random bulbs pop in the accent color, then empties from
//! the start.

use embassy_time::Duration;

use super::{Effect, FrameContext};
use crate::{
    color::{BLACK, GOLD, Palette, Rgb, WARM, scale_color},
    math8::{chance_permille, hash2},
};

const MAIN_LEVEL: u8 = 217;
/// Hold stage length, 0.9 s at speed 1.0
const HOLD_STEPS: usize = 45;
const POP_PERMILLE: u32 = 220;

const SALT_POP: u64 = 0x706f_7021;
const SALT_POP_PIXEL: u64 = 0x7069_7865;

/// Wipe stage for a given step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipeStage {
    /// Strip is filling; the value is the number of lit bulbs
    On(usize),
    /// Strip is fully lit
    Hold,
    /// Strip is emptying; the value is the number of dark bulbs
    Off(usize),
}

#[derive(Debug, Clone)]
pub struct WipeEffect {
    main: Rgb,
    pop: Rgb,
}

impl WipeEffect {
    pub fn new(palette: &Palette) -> Self {
        Self {
            main: palette.get_or(0, WARM),
            pop: palette.get_or(1, GOLD),
        }
    }

    pub fn stage_at(step: u32, len: usize) -> WipeStage {
        let cycle = 2 * len + HOLD_STEPS;
        let position = step as usize % cycle;
        if position < len {
            WipeStage::On(position + 1)
        } else if position < len + HOLD_STEPS {
            WipeStage::Hold
        } else {
            WipeStage::Off(position - len - HOLD_STEPS + 1)
        }
    }
}

impl Effect for WipeEffect {
    const STEP_PERIOD: Duration = Duration::from_millis(20);

    fn render(&self, frame: &FrameContext, leds: &mut [Rgb]) {
        let len = leds.len();
        if len == 0 {
            return;
        }

        let main = scale_color(self.main, MAIN_LEVEL);
        match Self::stage_at(frame.step, len) {
            WipeStage::On(lit) => {
                for (i, led) in leds.iter_mut().enumerate() {
                    *led = if i < lit { main } else { BLACK };
                }
            }
            WipeStage::Hold => {
                leds.fill(main);
                let step = u64::from(frame.step);
                if chance_permille(hash2(step, SALT_POP), POP_PERMILLE) {
                    let pixel = hash2(step, SALT_POP_PIXEL) as usize % len;
                    leds[pixel] = self.pop;
                }
            }
            WipeStage::Off(dark) => {
                for (i, led) in leds.iter_mut().enumerate() {
                    *led = if i < dark { BLACK } else { main };
                }
            }
        }
    }
}
