//! Canonical color encoding for theme tokens.
//!
//! Every color token is stored as a space-separated hue/saturation/lightness
//! triplet, `"H S% L%"`, with no `hsl(...)` wrapper. The consuming utility-CSS
//! layer composes it with an opacity modifier, e.g.
//! `hsl(var(--color-primary) / 0.5)`, which only works for the bare triplet.
//!
//! # Example
//!
//! ```rust
//! use hadley::color::{HslColor, is_canonical_hsl};
//!
//! let primary: HslColor = "220 10% 50%".parse().unwrap();
//! assert_eq!(primary.hue(), 220.0);
//! assert_eq!(primary.to_string(), "220 10% 50%");
//!
//! assert!(!is_canonical_hsl("blue"));
//! assert!(!is_canonical_hsl("hsl(220 10% 50%)"));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Upper bound for hue, in degrees.
pub const MAX_HUE: f32 = 360.0;
/// Upper bound for saturation and lightness, in percent.
pub const MAX_PERCENT: f32 = 100.0;

/// A color in the canonical `"H S% L%"` encoding.
///
/// Components are kept in CSS units: hue in degrees `[0, 360]`, saturation
/// and lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    hue: f32,
    saturation: f32,
    lightness: f32,
}

impl HslColor {
    /// Create a color from its components.
    ///
    /// # Errors
    /// Returns `ColorParseError` if any component is out of range or not finite.
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Result<Self, ColorParseError> {
        if !hue.is_finite() || !(0.0..=MAX_HUE).contains(&hue) {
            return Err(ColorParseError::Hue(hue.to_string()));
        }
        if !saturation.is_finite() || !(0.0..=MAX_PERCENT).contains(&saturation) {
            return Err(ColorParseError::Saturation(format!("{saturation}%")));
        }
        if !lightness.is_finite() || !(0.0..=MAX_PERCENT).contains(&lightness) {
            return Err(ColorParseError::Lightness(format!("{lightness}%")));
        }
        Ok(Self {
            hue,
            saturation,
            lightness,
        })
    }

    /// Create a color, wrapping hue into `[0, 360)` and clamping the
    /// percentages. Non-finite components become `0`.
    pub fn clamped(hue: f32, saturation: f32, lightness: f32) -> Self {
        let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self {
            hue: finite(hue).rem_euclid(MAX_HUE),
            saturation: finite(saturation).clamp(0.0, MAX_PERCENT),
            lightness: finite(lightness).clamp(0.0, MAX_PERCENT),
        }
    }

    /// Hue in degrees.
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Saturation in percent.
    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    /// Lightness in percent.
    pub fn lightness(&self) -> f32 {
        self.lightness
    }

    /// Returns a copy with a different lightness, clamped to `[0, 100]`.
    pub fn with_lightness(self, lightness: f32) -> Self {
        Self {
            lightness: lightness.clamp(0.0, MAX_PERCENT),
            ..self
        }
    }

    /// Convert to 8-bit sRGB.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let s = self.saturation / MAX_PERCENT;
        let l = self.lightness / MAX_PERCENT;
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let sector = (self.hue % MAX_HUE) / 60.0;
        let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());

        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let m = l - chroma / 2.0;
        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (channel(r), channel(g), channel(b))
    }

    /// Hex notation (`#rrggbb`), used for documentation swatches.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn relative_luminance(&self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        let (r, g, b) = self.to_rgb();
        0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
    }

    /// WCAG contrast ratio between two colors, in `[1, 21]`.
    pub fn contrast_ratio(&self, other: &HslColor) -> f64 {
        let a = self.relative_luminance();
        let b = other.relative_luminance();
        (a.max(b) + 0.05) / (a.min(b) + 0.05)
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}% {}%",
            format_component(self.hue),
            format_component(self.saturation),
            format_component(self.lightness)
        )
    }
}

impl FromStr for HslColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(' ').filter(|p| !p.is_empty()).collect();
        let [hue, saturation, lightness] = parts.as_slice() else {
            return Err(ColorParseError::ComponentCount(parts.len()));
        };

        let h = parse_number(hue).ok_or_else(|| ColorParseError::Hue((*hue).to_string()))?;
        let sat = saturation
            .strip_suffix('%')
            .and_then(parse_number)
            .ok_or_else(|| ColorParseError::Saturation((*saturation).to_string()))?;
        let light = lightness
            .strip_suffix('%')
            .and_then(parse_number)
            .ok_or_else(|| ColorParseError::Lightness((*lightness).to_string()))?;

        Self::new(h, sat, light)
    }
}

impl Serialize for HslColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HslColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(HslVisitor)
    }
}

struct HslVisitor;

impl Visitor<'_> for HslVisitor {
    type Value = HslColor;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an \"H S% L%\" color triplet")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}

/// Returns true if `value` is in the canonical `"H S% L%"` encoding.
pub fn is_canonical_hsl(value: &str) -> bool {
    value.parse::<HslColor>().is_ok()
}

/// Unsigned decimal: digits with at most one inner `.`.
/// Rejects signs, exponents and `inf`/`NaN` that `f32::from_str` would accept.
fn parse_number(s: &str) -> Option<f32> {
    let well_formed = !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && s.bytes().filter(|&b| b == b'.').count() <= 1
        && !s.starts_with('.')
        && !s.ends_with('.');
    if !well_formed {
        return None;
    }
    s.parse().ok()
}

fn format_component(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract().abs() < f32::EPSILON {
        format!("{}", rounded as i32)
    } else {
        let text = format!("{rounded:.2}");
        text.trim_end_matches('0').to_string()
    }
}

/// Error parsing a canonical color triplet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected 3 space-separated components, found {0}")]
    ComponentCount(usize),
    #[error("invalid hue '{0}' (expected a number in 0..=360)")]
    Hue(String),
    #[error("invalid saturation '{0}' (expected a percentage in 0..=100)")]
    Saturation(String),
    #[error("invalid lightness '{0}' (expected a percentage in 0..=100)")]
    Lightness(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_triplet() {
        let c: HslColor = "220 10% 50%".parse().unwrap();
        assert_eq!(c.hue(), 220.0);
        assert_eq!(c.saturation(), 10.0);
        assert_eq!(c.lightness(), 50.0);
    }

    #[test]
    fn test_parse_decimals_and_extra_spaces() {
        let c: HslColor = "  12.5  40.25%   7% ".parse().unwrap();
        assert_eq!(c.to_string(), "12.5 40.25% 7%");
    }

    #[test]
    fn test_rejects_named_and_wrapped_colors() {
        assert_eq!(
            "blue".parse::<HslColor>(),
            Err(ColorParseError::ComponentCount(1))
        );
        assert!(!is_canonical_hsl("hsl(220 10% 50%)"));
        assert!(!is_canonical_hsl("#1e1e2e"));
        assert!(!is_canonical_hsl(""));
    }

    #[test]
    fn test_rejects_missing_percent() {
        assert!(matches!(
            "220 10 50%".parse::<HslColor>(),
            Err(ColorParseError::Saturation(_))
        ));
        assert!(matches!(
            "220 10% 50".parse::<HslColor>(),
            Err(ColorParseError::Lightness(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_and_odd_numbers() {
        assert!(!is_canonical_hsl("361 10% 50%"));
        assert!(!is_canonical_hsl("220 101% 50%"));
        assert!(!is_canonical_hsl("-5 10% 50%"));
        assert!(!is_canonical_hsl("1e2 10% 50%"));
        assert!(!is_canonical_hsl("inf 10% 50%"));
        assert!(!is_canonical_hsl("220 .5% 50%"));
        assert!(!is_canonical_hsl("220deg 10% 50%"));
        assert!(!is_canonical_hsl("220,10%,50%"));
    }

    #[test]
    fn test_to_hex_primaries() {
        assert_eq!(HslColor::new(0.0, 100.0, 50.0).unwrap().to_hex(), "#ff0000");
        assert_eq!(HslColor::new(120.0, 100.0, 50.0).unwrap().to_hex(), "#00ff00");
        assert_eq!(HslColor::new(240.0, 100.0, 50.0).unwrap().to_hex(), "#0000ff");
        assert_eq!(HslColor::new(0.0, 0.0, 100.0).unwrap().to_hex(), "#ffffff");
        assert_eq!(HslColor::new(360.0, 0.0, 0.0).unwrap().to_hex(), "#000000");
    }

    #[test]
    fn test_contrast_black_white() {
        let black = HslColor::new(0.0, 0.0, 0.0).unwrap();
        let white = HslColor::new(0.0, 0.0, 100.0).unwrap();
        let ratio = black.contrast_ratio(&white);
        assert!((ratio - 21.0).abs() < 0.01);
        assert!((white.contrast_ratio(&black) - ratio).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamped_normalizes() {
        let c = HslColor::clamped(-30.0, 120.0, f32::NAN);
        assert!((c.hue() - 330.0).abs() < 0.001);
        assert_eq!(c.saturation(), 100.0);
        assert_eq!(c.lightness(), 0.0);
    }

    #[test]
    fn test_with_lightness_clamps() {
        let c = HslColor::new(10.0, 20.0, 30.0).unwrap();
        assert_eq!(c.with_lightness(140.0).lightness(), 100.0);
        assert_eq!(c.with_lightness(-3.0).lightness(), 0.0);
    }

    #[test]
    fn test_serde_as_string() {
        let c: HslColor = serde_json::from_str("\"30 40% 50%\"").unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"30 40% 50%\"");
        assert!(serde_json::from_str::<HslColor>("\"red\"").is_err());
    }
}
