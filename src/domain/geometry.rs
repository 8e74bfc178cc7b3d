//! Geometry primitives shared by shapes and morph shapes
//!
//! Coordinates are stored in twips (1/20 of a pixel), the native unit of the
//! records. Conversion to output space divides by [`UNIT_DIVISOR`].

use serde::{Deserialize, Serialize};

/// Twips per output pixel
pub const UNIT_DIVISOR: f64 = 20.0;

/// Ratio at which a morph shape is fully in its end state
pub const MAX_RATIO: u16 = 65535;

/// Axis-aligned rectangle in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Rect {
    /// Creates a rectangle from its four bounds
    pub const fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn width(&self) -> i64 {
        i64::from(self.x_max) - i64::from(self.x_min)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.y_max) - i64::from(self.y_min)
    }

    /// Smallest rectangle containing both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

/// A point in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation between `self` and `end` at `ratio` (0..=MAX_RATIO)
    pub fn lerp(&self, end: &Point, ratio: u16) -> Point {
        Point {
            x: lerp_i32(self.x, end.x, ratio),
            y: lerp_i32(self.y, end.y, ratio),
        }
    }
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb` notation, alpha excluded
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a 0..=1 opacity
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    pub fn lerp(&self, end: &Rgba, ratio: u16) -> Rgba {
        Rgba {
            r: lerp_u8(self.r, end.r, ratio),
            g: lerp_u8(self.g, end.g, ratio),
            b: lerp_u8(self.b, end.b, ratio),
            a: lerp_u8(self.a, end.a, ratio),
        }
    }
}

/// Colour transform with alpha: `out = clamp(in * mult + add)` per channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorTransform {
    pub red_mult: f64,
    pub green_mult: f64,
    pub blue_mult: f64,
    pub alpha_mult: f64,
    pub red_add: i16,
    pub green_add: i16,
    pub blue_add: i16,
    pub alpha_add: i16,
}

impl ColorTransform {
    /// The neutral transform; leaves every colour unchanged
    pub const IDENTITY: ColorTransform = ColorTransform {
        red_mult: 1.0,
        green_mult: 1.0,
        blue_mult: 1.0,
        alpha_mult: 1.0,
        red_add: 0,
        green_add: 0,
        blue_add: 0,
        alpha_add: 0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn apply(&self, color: Rgba) -> Rgba {
        if self.is_identity() {
            return color;
        }
        Rgba {
            r: apply_channel(color.r, self.red_mult, self.red_add),
            g: apply_channel(color.g, self.green_mult, self.green_add),
            b: apply_channel(color.b, self.blue_mult, self.blue_add),
            a: apply_channel(color.a, self.alpha_mult, self.alpha_add),
        }
    }
}

impl Default for ColorTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn apply_channel(value: u8, mult: f64, add: i16) -> u8 {
    (f64::from(value) * mult + f64::from(add))
        .round()
        .clamp(0.0, 255.0) as u8
}

fn lerp_i32(start: i32, end: i32, ratio: u16) -> i32 {
    let start = i64::from(start);
    let end = i64::from(end);
    let value = start + (end - start) * i64::from(ratio) / i64::from(MAX_RATIO);
    value as i32
}

pub(crate) fn lerp_u8(start: u8, end: u8, ratio: u16) -> u8 {
    lerp_i32(i32::from(start), i32::from(end), ratio) as u8
}

/// Formats an output coordinate: at most three decimals, trailing zeros
/// trimmed, no exponent. Output must be reproducible byte-for-byte.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut text = format!("{rounded:.3}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}
