//! Theatre marquee chase
//!
//! Every third bulb is lit and the pattern shifts by one bulb per step.
//! Lit bulbs cycle through the palette.

use embassy_time::Duration;

use super::{Effect, FrameContext};
use crate::color::{Palette, Rgb, WARM, scale_color};

const BULB_EVERY: usize = 3;
const ON_LEVEL: u8 = 230;
const OFF_LEVEL: u8 = 8;

#[derive(Debug, Clone)]
pub struct MarqueeEffect {
    palette: Palette,
}

impl MarqueeEffect {
    pub fn new(palette: &Palette) -> Self {
        Self {
            palette: palette.clone(),
        }
    }
}

impl Effect for MarqueeEffect {
    const STEP_PERIOD: Duration = Duration::from_millis(110);

    fn render(&self, frame: &FrameContext, leds: &mut [Rgb]) {
        let offset = frame.step as usize % BULB_EVERY;
        for (i, led) in leds.iter_mut().enumerate() {
            let position = i + offset;
            let color = self.palette.cycle_or(position / BULB_EVERY, WARM);
            let level = if position % BULB_EVERY == 0 {
                ON_LEVEL
            } else {
                OFF_LEVEL
            };
            *led = scale_color(color, level);
        }
    }
}
