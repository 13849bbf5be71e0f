//! 24-bit RGB color model: parsing, formatting, and mixing.
//!
//! The canonical text form everywhere in tokentint is a 7-character
//! lowercase `#rrggbb` string. Parsing accepts an optional leading `#`
//! and uppercase digits; everything else is rejected loudly.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TokenTintError};

/// Default interpolation ratio for [`Color::mix`].
pub const MIX_DEFAULT_RATIO: f64 = 0.5;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Parse a color from exactly six hex digits, with or without a
    /// leading `#`. Anything else is a [`TokenTintError::Color`].
    pub fn parse(s: &str) -> Result<Color> {
        static HEX_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^#?[0-9a-fA-F]{6}$").expect("valid regex"));

        if !HEX_RE.is_match(s) {
            return Err(TokenTintError::color(format!(
                "not a #rrggbb color: '{s}'"
            )));
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        let r = u8::from_str_radix(&hex[0..2], 16).expect("matched hex digits");
        let g = u8::from_str_radix(&hex[2..4], 16).expect("matched hex digits");
        let b = u8::from_str_radix(&hex[4..6], 16).expect("matched hex digits");

        Ok(Color { r, g, b })
    }

    /// Render as canonical lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel-wise linear interpolation: `ratio*self + (1-ratio)*other`,
    /// each channel rounded to the nearest integer and clamped to [0, 255].
    ///
    /// `mix(a, b, 1.0) == a` and `mix(a, b, 0.0) == b`.
    pub fn mix(self, other: Color, ratio: f64) -> Color {
        let ratio = ratio.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| -> u8 {
            let v = ratio * f64::from(a) + (1.0 - ratio) * f64::from(b);
            v.round().clamp(0.0, 255.0) as u8
        };

        Color {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = TokenTintError;

    fn from_str(s: &str) -> Result<Color> {
        Color::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_and_without_hash() {
        assert_eq!(
            Color::parse("#ff8000").unwrap(),
            Color {
                r: 255,
                g: 128,
                b: 0
            }
        );
        assert_eq!(Color::parse("ff8000").unwrap(), Color::parse("#ff8000").unwrap());
        assert_eq!(Color::parse("#FF8000").unwrap(), Color::parse("#ff8000").unwrap());
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in ["", "#fff", "#ff800", "#ff80000", "#ff80zz", "rgb(1,2,3)", "##ff8000"] {
            assert!(Color::parse(bad).is_err(), "accepted malformed '{bad}'");
        }
    }

    #[test]
    fn hex_roundtrip_is_lowercase() {
        let c = Color::parse("#AbCdEf").unwrap();
        assert_eq!(c.to_hex(), "#abcdef");
        assert_eq!(Color::parse(&c.to_hex()).unwrap(), c);
    }

    #[test]
    fn display_matches_hex_pattern() {
        let re = Regex::new(r"^#[0-9a-f]{6}$").unwrap();
        let c = Color { r: 3, g: 200, b: 77 };
        assert!(re.is_match(&c.to_string()));
    }

    #[test]
    fn mix_at_ratio_extremes() {
        let a = Color::parse("#123456").unwrap();
        let b = Color::parse("#fedcba").unwrap();
        assert_eq!(a.mix(b, 1.0), a);
        assert_eq!(a.mix(b, 0.0), b);
    }

    #[test]
    fn mix_with_itself_is_identity() {
        let c = Color::parse("#7f3b99").unwrap();
        for ratio in [0.0, 0.1, 0.33, 0.5, 0.9, 1.0] {
            assert_eq!(c.mix(c, ratio), c);
        }
    }

    #[test]
    fn mix_rounds_midpoint() {
        let mid = Color::BLACK.mix(Color::WHITE, MIX_DEFAULT_RATIO);
        assert_eq!(mid.to_hex(), "#808080");
    }

    #[test]
    fn mix_toward_white_lightens() {
        let lightened = Color::parse("#ff0000").unwrap().mix(Color::WHITE, 0.1);
        assert_eq!(lightened.to_hex(), "#ffe6e6");
    }
}
