//! Two comets running in opposite directions over a dim background

use embassy_time::Duration;

use super::{Effect, FrameContext};
use crate::color::{Palette, Rgb, WARM, scale_color};

const TAIL: usize = 4;
const HEAD_LEVEL: u8 = 242;
const BACKGROUND_LEVEL: u8 = 8;

#[derive(Debug, Clone)]
pub struct DoubleChaseEffect {
    forward: Rgb,
    backward: Rgb,
}

impl DoubleChaseEffect {
    pub fn new(palette: &Palette) -> Self {
        let forward = palette.get_or(0, WARM);
        Self {
            forward,
            backward: palette.get_or(1, forward),
        }
    }

    /// Level of the tail segment `t` pixels behind the head
    #[allow(clippy::cast_possible_truncation)]
    const fn tail_level(t: usize) -> u8 {
        (HEAD_LEVEL as usize * (TAIL + 1 - t) / (TAIL + 1)) as u8
    }
}

impl Effect for DoubleChaseEffect {
    const STEP_PERIOD: Duration = Duration::from_millis(50);

    fn render(&self, frame: &FrameContext, leds: &mut [Rgb]) {
        let len = leds.len();
        if len == 0 {
            return;
        }

        leds.fill(scale_color(self.forward, BACKGROUND_LEVEL));

        let travelled = frame.step as usize % len;
        let forward_head = travelled;
        let backward_head = len - 1 - travelled;

        // Draw the tails from the far end so the heads always win on short strips
        for t in (0..=TAIL).rev() {
            let level = Self::tail_level(t);
            let behind = (forward_head + len - t % len) % len;
            leds[behind] = scale_color(self.forward, level);
            let ahead = (backward_head + t) % len;
            leds[ahead] = scale_color(self.backward, level);
        }
    }
}
