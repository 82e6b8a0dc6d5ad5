//! Solid color fill effect
//!
//! Fills all LEDs with the first palette color.

use embassy_time::Duration;

use super::{Effect, FrameContext};
use crate::color::{Palette, Rgb, WARM};

/// Solid color effect - fills all LEDs with one color
#[derive(Debug, Clone)]
pub struct SolidEffect {
    color: Rgb,
}

impl SolidEffect {
    pub fn new(palette: &Palette) -> Self {
        Self {
            color: palette.get_or(0, WARM),
        }
    }
}

impl Effect for SolidEffect {
    const STEP_PERIOD: Duration = Duration::from_millis(1000);

    fn render(&self, _frame: &FrameContext, leds: &mut [Rgb]) {
        leds.fill(self.color);
    }
}
