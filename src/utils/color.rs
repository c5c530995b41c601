//! Color parsing utilities
//!
//! Shared by the config loader and the call-script parser.

use crate::constants::RGB_MAX;

/// Parse 6-digit hex color (e.g., "ff0000" -> (255, 0, 0))
/// Also supports 3-digit short format (e.g., "f00" -> (255, 0, 0))
/// Returns None on invalid input.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            // Short format: expand F -> FF
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Pack RGB components into 0xRRGGBB
#[inline]
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Unpack 0xRRGGBB into components. Bits above 24 are ignored.
#[inline]
pub const fn unpack_rgb(packed: u32) -> (u8, u8, u8) {
    let packed = packed & RGB_MAX;
    ((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
}

/// Parse "#RRGGBB" / "RRGGBB" / "#RGB" to a packed value
pub fn parse_packed_rgb(hex: &str) -> Option<u32> {
    parse_hex_color(hex).map(|(r, g, b)| pack_rgb(r, g, b))
}
