//! Pre-recorded amplitude frames and their cyclic playback.
//!
//! Frame files are JSON arrays of arrays, one inner array of segment
//! amplitudes per animation frame. Rows may be shorter or longer than the
//! ring; reads past the end of a row yield 0. A loaded sequence is frozen:
//! playback only moves an index over shared data.

use crate::error::FrameError;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub struct FrameSequence {
    frames: Arc<[Vec<f32>]>,
}

impl Default for FrameSequence {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FrameSequence {
    pub fn new(frames: Vec<Vec<f32>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a frame file. Every value must be a finite number.
    pub fn from_json(text: &str) -> Result<Self, FrameError> {
        Self::from_json_with(text, &FramePrep::default())
    }

    /// Parse a frame file and run `prep` over it before freezing.
    pub fn from_json_with(text: &str, prep: &FramePrep) -> Result<Self, FrameError> {
        let frames: Vec<Vec<f32>> = serde_json::from_str(text)?;
        for (frame, row) in frames.iter().enumerate() {
            if let Some(segment) = row.iter().position(|v| !v.is_finite()) {
                return Err(FrameError::NonFinite { frame, segment });
            }
        }
        if prep.is_noop() {
            return Ok(Self::new(frames));
        }
        Ok(Self::new(prep.apply(frames)))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[f32]> {
        self.frames.get(index).map(Vec::as_slice)
    }

    pub fn frames(&self) -> &[Vec<f32>] {
        &self.frames
    }

    /// Copy frame `index` into `out` as exactly `total_segments` values,
    /// padding short rows with 0.
    pub fn fill_segments(&self, index: usize, total_segments: usize, out: &mut Vec<f32>) {
        out.clear();
        let row = self.get(index).unwrap_or(&[]);
        out.extend((0..total_segments).map(|i| row.get(i).copied().unwrap_or(0.0)));
    }
}

/// Cursor over a [`FrameSequence`] that wraps back to 0 after the last frame.
#[derive(Clone, Debug, Default)]
pub struct FramePlayer {
    sequence: FrameSequence,
    index: usize,
}

impl FramePlayer {
    pub fn new(sequence: FrameSequence) -> Self {
        Self { sequence, index: 0 }
    }

    pub fn sequence(&self) -> &FrameSequence {
        &self.sequence
    }

    /// Index of the frame the next call to [`FramePlayer::advance`] returns.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_ready(&self) -> bool {
        !self.sequence.is_empty()
    }

    /// Return the current frame and step the cursor; `None` while no frames are loaded.
    pub fn advance(&mut self) -> Option<usize> {
        if self.sequence.is_empty() {
            return None;
        }
        let current = self.index;
        self.index = (self.index + 1) % self.sequence.len();
        Some(current)
    }

    /// Swap in a new sequence and rewind.
    pub fn replace(&mut self, sequence: FrameSequence) {
        self.sequence = sequence;
        self.index = 0;
    }

    pub fn rewind(&mut self) {
        self.index = 0;
    }
}

// ---------------- Load-time preparation ----------------

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeParams {
    pub mean_threshold: f32,
    pub downscale_factor: f32,
    pub upscale_factor: f32,
    pub upscale_low: f32,
    pub upscale_high: f32,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self {
            mean_threshold: 0.5,
            downscale_factor: 0.8,
            upscale_factor: 1.75,
            upscale_low: 0.05,
            upscale_high: 0.45,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationParams {
    pub repeats: usize,
    pub variation_strength: f32,
    pub scaling_range: (f32, f32),
    pub shuffle_prob: f64,
    pub seed: u64,
}

impl Default for VariationParams {
    fn default() -> Self {
        Self {
            repeats: 10,
            variation_strength: 0.01,
            scaling_range: (0.98, 1.02),
            shuffle_prob: 0.1,
            seed: 42,
        }
    }
}

/// Optional processing applied to raw frames before they are frozen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramePrep {
    pub normalize: Option<NormalizeParams>,
    pub variations: Option<VariationParams>,
}

impl FramePrep {
    pub fn is_noop(&self) -> bool {
        self.normalize.is_none() && self.variations.is_none()
    }

    pub fn apply(&self, mut frames: Vec<Vec<f32>>) -> Vec<Vec<f32>> {
        if let Some(params) = &self.normalize {
            normalize_and_upscale(&mut frames, params);
        }
        if let Some(params) = &self.variations {
            frames = extend_with_variations(&frames, params);
        }
        frames
    }
}

#[inline]
fn round_to(v: f32, decimals: u32) -> f32 {
    let scale = 10f32.powi(decimals as i32);
    (v * scale).round() / scale
}

pub fn round_decimals(frames: &mut [Vec<f32>], decimals: u32) {
    for v in frames.iter_mut().flatten() {
        *v = round_to(*v, decimals);
    }
}

/// Tame loud frames and lift quiet detail.
///
/// A frame whose mean exceeds `mean_threshold` is scaled by
/// `downscale_factor`; afterwards values strictly between `upscale_low` and
/// `upscale_high` are scaled by `upscale_factor`. Results are clamped to
/// [0, 1] and rounded to two decimals.
pub fn normalize_and_upscale(frames: &mut [Vec<f32>], params: &NormalizeParams) {
    for row in frames.iter_mut() {
        if row.is_empty() {
            continue;
        }
        let mean = row.iter().sum::<f32>() / row.len() as f32;
        if mean > params.mean_threshold {
            row.iter_mut().for_each(|v| *v *= params.downscale_factor);
        }
        for v in row.iter_mut() {
            if *v > params.upscale_low && *v < params.upscale_high {
                *v *= params.upscale_factor;
            }
            *v = v.clamp(0.0, 1.0);
        }
    }
    round_decimals(frames, 2);
}

/// Repeat `frames` with slight random scaling, noise and occasional shuffles.
pub fn extend_with_variations(frames: &[Vec<f32>], params: &VariationParams) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let (lo, hi) = params.scaling_range;
    let strength = params.variation_strength.abs();
    let mut out = Vec::with_capacity(frames.len() * params.repeats);
    for _ in 0..params.repeats {
        for row in frames {
            let scale = if hi > lo { rng.gen_range(lo..hi) } else { lo };
            let mut varied: Vec<f32> = row
                .iter()
                .map(|&v| {
                    let noise = if strength > 0.0 {
                        rng.gen_range(-strength..strength)
                    } else {
                        0.0
                    };
                    (v * scale + noise).clamp(0.0, 1.0)
                })
                .collect();
            if rng.gen::<f64>() < params.shuffle_prob {
                varied.shuffle(&mut rng);
            }
            out.push(varied);
        }
    }
    round_decimals(&mut out, 2);
    out
}
