use crate::color::Rgb;

/// Significant bits of a color word; everything above bit 23 is ignored.
pub const COLOR_MASK: u32 = 0x00FF_FFFF;

/// Create an RGB color from a u32 value (0xRRGGBB format)
///
/// Bits above 23 are ignored.
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
#[allow(clippy::cast_lossless)]
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}
