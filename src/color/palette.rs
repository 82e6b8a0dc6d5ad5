use heapless::Vec;

use crate::color::{Rgb, rgb_from_u32};

/// Maximum number of colors a show may carry
pub const MAX_PALETTE: usize = 4;

/// Incandescent bulb warm white
pub const WARM: Rgb = rgb_from_u32(0xFF_8C_14);
/// Dimmer, redder warm white used by the twinkle effect
pub const SOFT_WARM: Rgb = rgb_from_u32(0xFF_64_0A);
/// Sparkle color for the wipe show pops
pub const GOLD: Rgb = rgb_from_u32(0xFF_B4_1E);

/// Ordered color sequence of a show
///
/// An empty palette means "use the effect defaults".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb, MAX_PALETTE>,
}

impl Palette {
    pub const fn new() -> Self {
        Self { colors: Vec::new() }
    }

    /// Build a palette from a slice
    ///
    /// Returns `None` if the slice holds more than [`MAX_PALETTE`] colors.
    pub fn from_slice(colors: &[Rgb]) -> Option<Self> {
        Vec::from_slice(colors).ok().map(|colors| Self { colors })
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.colors
    }

    /// Get the color at `index`, or `fallback` if the palette is shorter
    pub fn get_or(&self, index: usize, fallback: Rgb) -> Rgb {
        self.colors.get(index).copied().unwrap_or(fallback)
    }

    /// Get a color by cycling through the palette
    pub fn cycle_or(&self, index: usize, fallback: Rgb) -> Rgb {
        if self.colors.is_empty() {
            return fallback;
        }
        self.colors[index % self.colors.len()]
    }
}
