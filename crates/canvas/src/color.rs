//! Hex colour parsing and blending.
//!
//! Everything here is cosmetic, so nothing fails: bad input falls back to a
//! usable colour instead.

use std::fmt;
use std::ops::Range;

/// Returned when neither input of [`interpolate`] is usable.
pub const FALLBACK_COLOR: &str = "#ef4444";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |range: Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Per-channel linear blend, `factor` 0 gives `self` and 1 gives `other`
    pub fn lerp(self, other: Rgb, factor: f32) -> Rgb {
        let factor = factor.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            let (a, b) = (f32::from(a), f32::from(b));
            (a + factor * (b - a)).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Blend two hex colours.
///
/// If either colour can't be parsed or `factor` is NaN, the first colour is
/// returned as given, or [`FALLBACK_COLOR`] when it is empty.
pub fn interpolate(from: &str, to: &str, factor: f32) -> String {
    match (Rgb::from_hex(from), Rgb::from_hex(to)) {
        (Some(from), Some(to)) if !factor.is_nan() => from.lerp(to, factor).to_string(),
        _ if from.is_empty() => FALLBACK_COLOR.to_owned(),
        _ => from.to_owned(),
    }
}
