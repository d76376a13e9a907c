//! Per-segment temporal smoothing.
//!
//! The smoother owns the only cross-tick state in the pipeline: one value
//! per segment holding what was rendered last tick. Every tick computes all
//! outputs from the previous state first and then commits the whole vector,
//! so no segment ever sees a mix of old and new values.

use crate::constants::{DECAY_FACTOR, SILENCE_FLOOR};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SmoothingPolicy {
    /// `max(raw, previous * factor)`: instant attack, exponential release.
    ExponentialDecay { factor: f32 },
    /// `max(raw, previous * sin(pi/3 * previous))`: release slows near silence.
    CurvedDecay,
    /// `raw` when above `threshold`, otherwise 0. Keeps no memory.
    ThresholdGate { threshold: f32 },
    /// `raw` as-is.
    None,
}

impl Default for SmoothingPolicy {
    fn default() -> Self {
        SmoothingPolicy::ExponentialDecay {
            factor: DECAY_FACTOR,
        }
    }
}

impl SmoothingPolicy {
    /// Output for one segment given this tick's raw value and last tick's output.
    /// Never negative.
    #[inline]
    pub fn apply(&self, raw: f32, previous: f32) -> f32 {
        let raw = sanitize(raw);
        let previous = sanitize(previous);
        let v = match *self {
            SmoothingPolicy::ExponentialDecay { factor } => raw.max(previous * factor),
            SmoothingPolicy::CurvedDecay => raw.max(previous * (PI / 3.0 * previous).sin()),
            SmoothingPolicy::ThresholdGate { threshold } => {
                if raw > threshold {
                    raw
                } else {
                    0.0
                }
            }
            SmoothingPolicy::None => raw,
        };
        if v < SILENCE_FLOOR {
            0.0
        } else {
            v
        }
    }

    /// A decay factor of 1 or more would hold or grow values forever.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            SmoothingPolicy::ExponentialDecay { factor } if !(0.0..1.0).contains(&factor) => {
                Err(ConfigError::BadDecayFactor(factor))
            }
            SmoothingPolicy::ThresholdGate { threshold } if !(threshold >= 0.0 && threshold.is_finite()) => {
                Err(ConfigError::BadThreshold(threshold))
            }
            _ => Ok(()),
        }
    }

    /// Whether the policy reads the previous tick at all.
    pub fn has_memory(&self) -> bool {
        matches!(
            self,
            SmoothingPolicy::ExponentialDecay { .. } | SmoothingPolicy::CurvedDecay
        )
    }
}

// Negative and NaN inputs are treated as silence.
#[inline]
fn sanitize(v: f32) -> f32 {
    if v > 0.0 {
        v
    } else {
        0.0
    }
}

#[derive(Clone, Debug)]
pub struct TemporalSmoother {
    policy: SmoothingPolicy,
    state: Vec<f32>,
}

impl TemporalSmoother {
    pub fn new(policy: SmoothingPolicy, total_segments: usize) -> Self {
        Self {
            policy,
            state: vec![0.0; total_segments],
        }
    }

    pub fn policy(&self) -> SmoothingPolicy {
        self.policy
    }

    /// Last committed output, one value per segment.
    pub fn state(&self) -> &[f32] {
        &self.state
    }

    /// Smooth `raw` into `out` and commit `out` as the new state.
    ///
    /// `raw` entries past the segment count are ignored; missing ones count as 0.
    pub fn smooth_into(&mut self, raw: &[f32], out: &mut Vec<f32>) {
        out.clear();
        out.extend(
            self.state
                .iter()
                .enumerate()
                .map(|(i, &prev)| self.policy.apply(raw.get(i).copied().unwrap_or(0.0), prev)),
        );
        self.state.copy_from_slice(out);
    }

    pub fn smooth(&mut self, raw: &[f32]) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.state.len());
        self.smooth_into(raw, &mut out);
        out
    }

    /// Drop all memory, as if every previous tick had been silent.
    pub fn reset(&mut self) {
        self.state.iter_mut().for_each(|v| *v = 0.0);
    }
}

/// Pure form of one smoothing step: returns `(smoothed, new_state)`.
pub fn smooth_step(raw: &[f32], previous: &[f32], policy: SmoothingPolicy) -> (Vec<f32>, Vec<f32>) {
    let smoothed: Vec<f32> = previous
        .iter()
        .enumerate()
        .map(|(i, &prev)| policy.apply(raw.get(i).copied().unwrap_or(0.0), prev))
        .collect();
    let state = smoothed.clone();
    (smoothed, state)
}
