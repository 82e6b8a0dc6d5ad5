use std::convert::Infallible;
use std::fmt::Write as _;

use marquee_lights::{OutputDriver, Rgb};

/// Stands in for a strip on machines without one
///
/// Logs every `every`-th frame as hex colors at debug level.
pub struct LogOutput {
    every: u64,
    frames: u64,
    line: String,
}

impl LogOutput {
    pub fn new(every: u64) -> Self {
        Self {
            every,
            frames: 0,
            line: String::new(),
        }
    }
}

impl OutputDriver for LogOutput {
    type Error = Infallible;

    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error> {
        self.frames += 1;
        if self.every == 0 || self.frames % self.every != 0 || !log::log_enabled!(log::Level::Debug)
        {
            return Ok(());
        }

        self.line.clear();
        for c in colors {
            let _ = write!(self.line, "{:02x}{:02x}{:02x} ", c.r, c.g, c.b);
        }
        log::debug!("frame {}: {}", self.frames, self.line.trim_end());
        Ok(())
    }
}
