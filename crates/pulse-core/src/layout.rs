//! Radial layout: amplitudes in, dot positions and colors out.
//!
//! Segment `i` owns the angular slot `i * 360 / S`. Dot `j` on that segment
//! sits at `base_radius + j * dot_spacing + amplitude * max_amplitude * w(j)`
//! where `w` is the pulse taper.

use crate::color::{amplitude_hue, ring_gradient, Color};
use crate::constants::{
    BASE_RADIUS, DOT_COUNT, DOT_SPACING, MAX_AMPLITUDE, SHADOW_EXCLUDE_BELOW, SHADOW_OPACITY_BASE,
    SHADOW_OPACITY_SCALE, SHADOW_WIDTH_BASE, SHADOW_WIDTH_SCALE, TOTAL_SEGMENTS,
};
use crate::error::ConfigError;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// How much of the pulse each dot on a line receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseTaper {
    /// `j / dot_count`: the innermost dot stays put, outer dots travel furthest.
    Linear,
    /// Every dot travels the full pulse.
    Uniform,
}

impl PulseTaper {
    #[inline]
    pub fn weight(&self, dot: usize, dot_count: usize) -> f32 {
        match self {
            PulseTaper::Linear if dot_count > 0 => dot as f32 / dot_count as f32,
            PulseTaper::Linear => 0.0,
            PulseTaper::Uniform => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub total_segments: usize,
    pub dot_count: usize,
    pub base_radius: f32,
    pub dot_spacing: f32,
    pub max_amplitude: f32,
    pub taper: PulseTaper,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            total_segments: TOTAL_SEGMENTS,
            dot_count: DOT_COUNT,
            base_radius: BASE_RADIUS,
            dot_spacing: DOT_SPACING,
            max_amplitude: MAX_AMPLITUDE,
            taper: PulseTaper::Linear,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_segments == 0 || self.dot_count == 0 {
            return Err(ConfigError::EmptyRing {
                segments: self.total_segments,
                dots: self.dot_count,
            });
        }
        Ok(())
    }

    /// Angle of segment `i` in degrees.
    #[inline]
    pub fn angle_degrees(&self, segment: usize) -> f32 {
        segment as f32 * (360.0 / self.total_segments as f32)
    }

    /// Angle of segment `i` in radians.
    #[inline]
    pub fn angle_radians(&self, segment: usize) -> f32 {
        segment as f32 / self.total_segments as f32 * TAU
    }

    /// Resting distance of dot `j`, before any pulse.
    #[inline]
    pub fn rest_distance(&self, dot: usize) -> f32 {
        self.base_radius + dot as f32 * self.dot_spacing
    }

    #[inline]
    pub fn distance(&self, dot: usize, amplitude: f32) -> f32 {
        self.rest_distance(dot)
            + amplitude * self.max_amplitude * self.taper.weight(dot, self.dot_count)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorMode {
    /// Hue follows the segment amplitude.
    AmplitudeHue,
    /// Fixed triangular gradient between two `0xRRGGBB` colors.
    Gradient { color_a: u32, color_b: u32 },
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::AmplitudeHue
    }
}

/// One dot's position and color for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutPoint {
    pub segment: usize,
    pub dot: usize,
    /// Segment angle in radians, measured from the +x axis.
    pub angle: f32,
    /// Radial distance from the ring centre.
    pub distance: f32,
    pub color: Color,
}

impl LayoutPoint {
    /// Cartesian position with y pointing up.
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin()) * self.distance
    }
}

/// Computes [`LayoutPoint`]s for a whole ring.
///
/// Gradient colors never depend on amplitude, so they are resolved once per
/// color mode change instead of every tick.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    config: LayoutConfig,
    color_mode: ColorMode,
    gradient: Vec<Vec3>,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig, color_mode: ColorMode) -> Self {
        let mut engine = Self {
            config,
            color_mode,
            gradient: Vec::new(),
        };
        engine.set_color_mode(color_mode);
        engine
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode;
        self.gradient = match mode {
            ColorMode::Gradient { color_a, color_b } => {
                let a = Color::from_hex(color_a).to_rgb();
                let b = Color::from_hex(color_b).to_rgb();
                let s = self.config.total_segments;
                (0..s).map(|i| ring_gradient(i, s, a, b)).collect()
            }
            ColorMode::AmplitudeHue => Vec::new(),
        };
    }

    #[inline]
    pub fn segment_color(&self, segment: usize, amplitude: f32) -> Color {
        match self.color_mode {
            ColorMode::AmplitudeHue => amplitude_hue(amplitude),
            ColorMode::Gradient { .. } => Color::Rgb(
                self.gradient
                    .get(segment)
                    .copied()
                    .unwrap_or(Vec3::ZERO),
            ),
        }
    }

    /// Lay out every dot of every segment into `out`, segment-major.
    /// Missing amplitudes count as 0.
    pub fn layout_into(&self, amplitudes: &[f32], out: &mut Vec<LayoutPoint>) {
        let c = &self.config;
        out.clear();
        out.reserve(c.total_segments * c.dot_count);
        for segment in 0..c.total_segments {
            let amplitude = amplitudes.get(segment).copied().unwrap_or(0.0);
            let angle = c.angle_radians(segment);
            let color = self.segment_color(segment, amplitude);
            for dot in 0..c.dot_count {
                out.push(LayoutPoint {
                    segment,
                    dot,
                    angle,
                    distance: c.distance(dot, amplitude),
                    color,
                });
            }
        }
    }

    pub fn layout(&self, amplitudes: &[f32]) -> Vec<LayoutPoint> {
        let mut out = Vec::new();
        self.layout_into(amplitudes, &mut out);
        out
    }
}

/// Affine map from mean amplitude to the shadow's stroke width and opacity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    pub width_base: f32,
    pub width_scale: f32,
    pub opacity_base: f32,
    pub opacity_scale: f32,
    /// Entries at or below this are left out of the mean.
    pub exclude_below: Option<f32>,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            width_base: SHADOW_WIDTH_BASE,
            width_scale: SHADOW_WIDTH_SCALE,
            opacity_base: SHADOW_OPACITY_BASE,
            opacity_scale: SHADOW_OPACITY_SCALE,
            exclude_below: Some(SHADOW_EXCLUDE_BELOW),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShadowAggregate {
    pub mean_amplitude: f32,
    pub stroke_width: f32,
    pub opacity: f32,
}

impl ShadowConfig {
    /// Mean of `amplitudes`, skipping near-silent entries when configured.
    /// An empty selection has mean 0.
    pub fn mean(&self, amplitudes: &[f32]) -> f32 {
        let (sum, n) = amplitudes
            .iter()
            .filter(|&&a| self.exclude_below.map_or(true, |floor| a > floor))
            .fold((0.0f32, 0usize), |(s, n), &a| (s + a, n + 1));
        if n > 0 {
            sum / n as f32
        } else {
            0.0
        }
    }

    pub fn aggregate(&self, amplitudes: &[f32]) -> ShadowAggregate {
        let mean = self.mean(amplitudes);
        ShadowAggregate {
            mean_amplitude: mean,
            stroke_width: self.width_base + mean * self.width_scale,
            opacity: self.opacity_base + mean * self.opacity_scale,
        }
    }
}
