//! 8-bit fixed-point helpers shared by the effects.

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Convert a unit fraction (0.0-1.0) to an 8-bit level.
///
/// Out-of-range and NaN inputs saturate.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn unit_to_u8(value: f32) -> u8 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    if value >= 1.0 {
        return 255;
    }
    libm::roundf(value * 255.0) as u8
}

/// Deterministic 32-bit hash used in place of a random source.
///
/// SplitMix64 mixing folded down to `u32`.
#[inline]
pub const fn hash32(x: u64) -> u32 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    #[allow(clippy::cast_possible_truncation)]
    {
        (z ^ (z >> 31)) as u32
    }
}

/// Hash two coordinates (e.g. step and pixel index) together.
#[inline]
pub const fn hash2(a: u64, b: u64) -> u32 {
    hash32(a.wrapping_mul(0x0000_0100_0000_01b3) ^ b.rotate_left(29))
}

/// Map a hash value uniformly into `min..=max`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn hash_range(hash: u32, min: u8, max: u8) -> u8 {
    if max <= min {
        return min;
    }
    let span = (max - min) as u32 + 1;
    min + (hash % span) as u8
}

/// Returns true with the given probability expressed in permille.
#[inline]
pub const fn chance_permille(hash: u32, permille: u32) -> bool {
    hash % 1000 < permille
}
