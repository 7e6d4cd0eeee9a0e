//! sRGB colors parsed from CSS-style hex strings.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional)
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let hex = s.trim().trim_start_matches('#');
        let bad = || Error::InvalidColor(s.to_string());

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }

        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
                Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                // #abc expands to #aabbcc
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| bad())
                };
                Ok(Self::rgb(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => Err(bad()),
        }
    }

    /// Channels as 0..=1 floats, still sRGB encoded
    pub fn to_srgb_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Linear-light channels, for writing into an sRGB render target
    pub fn to_linear_f32(self) -> [f32; 3] {
        self.to_srgb_f32().map(srgb_to_linear)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_hex() {
        assert_eq!(Color::from_hex("#e5e7eb").unwrap(), Color::rgb(0xe5, 0xe7, 0xeb));
        assert_eq!(Color::from_hex("FCFCFA").unwrap(), Color::rgb(0xfc, 0xfc, 0xfa));
        assert_eq!(Color::from_hex("#fa0").unwrap(), Color::rgb(0xff, 0xaa, 0x00));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("").is_err());
        assert!("#ééé".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let c = Color::rgb(1, 171, 255);
        assert_eq!(c.to_string(), "#01abff");
    }

    #[test]
    fn test_linear_endpoints() {
        let [r, g, b] = Color::rgb(0, 255, 255).to_linear_f32();
        assert_eq!(r, 0.0);
        assert!((g - 1.0).abs() < 1e-6);
        assert!((b - 1.0).abs() < 1e-6);
    }
}
