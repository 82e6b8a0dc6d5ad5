//! Output adapters

use core::fmt::Debug;

use smart_leds::SmartLedsWrite;

use crate::OutputDriver;
use crate::color::Rgb;

/// Drives any `smart-leds` compatible strip (WS2812 over SPI, RMT, PIO...)
pub struct SmartLedsOutput<W> {
    writer: W,
}

impl<W> SmartLedsOutput<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> OutputDriver for SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = Rgb>,
    W::Error: Debug,
{
    type Error = W::Error;

    fn write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error> {
        self.writer.write(colors.iter().copied())
    }
}

/// Output that discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOutput;

impl OutputDriver for NullOutput {
    type Error = core::convert::Infallible;

    fn write(&mut self, _colors: &[Rgb]) -> Result<(), Self::Error> {
        Ok(())
    }
}
