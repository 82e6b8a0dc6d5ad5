mod palette;
mod utils;

use smart_leds::RGB8;

pub use palette::{GOLD, MAX_PALETTE, Palette, SOFT_WARM, WARM};
pub use utils::{BLACK, parse_hex_color, rgb_from_u32, scale_color};

pub type Rgb = RGB8;
