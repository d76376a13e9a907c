use crate::constants::{HUE_BASE, HUE_LIGHTNESS, HUE_SATURATION, HUE_SPAN};
use glam::Vec3;
use std::fmt;

/// Dot color as handed to renderers.
///
/// Amplitude colors stay in HSL so the CSS output matches the classic
/// `hsl(h, 100%, 50%)` strings exactly; gradient colors are linear RGB in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Hsl {
        hue: f32,
        saturation: f32,
        lightness: f32,
    },
    Rgb(Vec3),
}

impl Color {
    pub fn from_hex(hex: u32) -> Self {
        Color::Rgb(hex_to_rgb(hex))
    }

    /// Hue in `[0, 360)`; RGB colors report `None`.
    pub fn hue_degrees(&self) -> Option<f32> {
        match *self {
            Color::Hsl { hue, .. } => Some(hue.rem_euclid(360.0)),
            Color::Rgb(_) => None,
        }
    }

    /// Linear RGB in [0, 1].
    pub fn to_rgb(&self) -> Vec3 {
        match *self {
            Color::Rgb(c) => c,
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => hsl_to_rgb(hue, saturation / 100.0, lightness / 100.0),
        }
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({}, {}%, {}%)", hue, saturation, lightness),
            Color::Rgb(c) => {
                let [r, g, b] = (c.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round().to_array();
                write!(f, "rgb({}, {}, {})", r as u8, g as u8, b as u8)
            }
        }
    }
}

/// `hsl(200 + amplitude * 160, 100%, 50%)`: blue at silence, pink when loud.
#[inline]
pub fn amplitude_hue(amplitude: f32) -> Color {
    Color::Hsl {
        hue: HUE_BASE + amplitude * HUE_SPAN,
        saturation: HUE_SATURATION,
        lightness: HUE_LIGHTNESS,
    }
}

/// Triangular ring gradient: A→B over the first half of the segments, then B→A.
pub fn ring_gradient(segment: usize, total_segments: usize, a: Vec3, b: Vec3) -> Vec3 {
    let half = total_segments as f32 / 2.0;
    if half <= 0.0 {
        return a;
    }
    let i = segment as f32;
    if i <= half {
        a.lerp(b, i / half)
    } else {
        b.lerp(a, (i - half) / half)
    }
}

pub fn hex_to_rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

fn hsl_to_rgb(hue: f32, s: f32, l: f32) -> Vec3 {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    Vec3::new(r + m, g + m, b + m)
}
