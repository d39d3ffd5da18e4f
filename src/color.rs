// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt;

/// RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from 0-255 channels and a 0-1 alpha.
    /// Returns `None` when any channel is out of range.
    pub fn from_rgba8(r: f64, g: f64, b: f64, a: f64) -> Option<Self> {
        let byte = |c: f64| (0.0..=255.0).contains(&c);
        if byte(r) && byte(g) && byte(b) && (0.0..=1.0).contains(&a) {
            Some(Self::new(r / 255.0, g / 255.0, b / 255.0, a))
        } else {
            None
        }
    }

    /// Parse a CSS color string.
    ///
    /// Supports hex notation (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`),
    /// `rgb(..)`/`rgba(..)` functions and named colors.
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim().to_ascii_lowercase();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if let Some(args) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            return Self::parse_rgb_args(args, true);
        }
        if let Some(args) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            return Self::parse_rgb_args(args, false);
        }
        named(&s)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
        let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        let (r, g, b, a) = match hex.len() {
            3 | 4 => {
                let a = if hex.len() == 4 { digit(3)? * 17 } else { 255 };
                (digit(0)? * 17, digit(1)? * 17, digit(2)? * 17, a)
            }
            6 | 8 => {
                let a = if hex.len() == 8 { pair(6)? } else { 255 };
                (pair(0)?, pair(2)?, pair(4)?, a)
            }
            _ => return None,
        };
        Self::from_rgba8(
            f64::from(r),
            f64::from(g),
            f64::from(b),
            f64::from(a) / 255.0,
        )
    }

    fn parse_rgb_args(args: &str, with_alpha: bool) -> Option<Self> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let channel = |p: &str| -> Option<f64> {
            match p.strip_suffix('%') {
                Some(pct) => pct.parse::<f64>().ok().map(|v| v * 255.0 / 100.0),
                None => p.parse::<f64>().ok(),
            }
        };
        let (r, g, b, a) = match (parts.as_slice(), with_alpha) {
            (&[r, g, b], false) => (channel(r)?, channel(g)?, channel(b)?, 1.0),
            (&[r, g, b, a], true) => (
                channel(r)?,
                channel(g)?,
                channel(b)?,
                a.parse::<f64>().ok()?,
            ),
            _ => return None,
        };
        Self::from_rgba8(r, g, b, a)
    }
}

fn named(name: &str) -> Option<Color> {
    let (r, g, b) = match name {
        "transparent" => return Some(Color::TRANSPARENT),
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "lime" => (0, 255, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "navy" => (0, 0, 128),
        "purple" => (128, 0, 128),
        "teal" => (0, 128, 128),
        "orange" => (255, 165, 0),
        "pink" => (255, 192, 203),
        "brown" => (165, 42, 42),
        _ => return None,
    };
    Color::from_rgba8(f64::from(r), f64::from(g), f64::from(b), 1.0)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({},{},{},{})",
            (self.r * 255.0).round(),
            (self.g * 255.0).round(),
            (self.b * 255.0).round(),
            self.a
        )
    }
}
