//! Spectrum → per-segment amplitude mapping.
//!
//! A spectrum buffer holds `N` byte magnitudes where bin `k` stands for the
//! frequency `k / N * nyquist`. The mapper turns it into exactly
//! `total_segments` amplitudes using one of several interchangeable
//! policies. Missing data (an index past the end of the buffer, an empty
//! bucket) always contributes 0 and never fails.

use crate::constants::{
    BYTE_MAX, FREQ_SPAN_DIVISOR, HEADROOM_DIVISOR, MAX_FREQ_HZ, MIN_FREQ_HZ,
};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// How a target frequency picks its bin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First bin whose frequency is at or above the target; none means 0.
    FirstAtOrAbove,
    /// Bin with the smallest frequency distance; ties go to the lower bin.
    Closest,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MappingPolicy {
    /// Targets spaced linearly from `min_hz` to `min_hz + (max_hz - min_hz) / span_divisor`.
    /// `None` bounds mean 0 Hz and the nyquist frequency.
    NearestFrequency {
        min_hz: Option<f32>,
        max_hz: Option<f32>,
        span_divisor: f32,
        tie_break: TieBreak,
    },
    /// Segment `i` reads fractional bin `i * N / S`, interpolating neighbours.
    LinearInterpolation,
    /// Segment `i` reads bin `floor(10^(i / (S - 1) * log10(N)))`.
    Logarithmic,
    /// Bins `[low_bin, high_bin)` split into `S` contiguous buckets, each averaged.
    BinRange { low_bin: usize, high_bin: usize },
}

impl MappingPolicy {
    pub fn live_default() -> Self {
        MappingPolicy::NearestFrequency {
            min_hz: Some(MIN_FREQ_HZ),
            max_hz: Some(MAX_FREQ_HZ),
            span_divisor: FREQ_SPAN_DIVISOR,
            tie_break: TieBreak::FirstAtOrAbove,
        }
    }
}

impl Default for MappingPolicy {
    fn default() -> Self {
        Self::live_default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    pub policy: MappingPolicy,
    /// Byte magnitudes are divided by this. 255 keeps values in [0, 1],
    /// 128 gives a hotter [0, ~2] range.
    pub divisor: f32,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            policy: MappingPolicy::default(),
            divisor: BYTE_MAX,
        }
    }
}

impl MapperConfig {
    pub fn classic() -> Self {
        Self {
            policy: MappingPolicy::LinearInterpolation,
            divisor: HEADROOM_DIVISOR,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.divisor > 0.0) {
            return Err(ConfigError::BadDivisor(self.divisor));
        }
        match self.policy {
            MappingPolicy::NearestFrequency {
                min_hz: Some(min_hz),
                max_hz: Some(max_hz),
                ..
            } if min_hz > max_hz => Err(ConfigError::InvertedRange { min_hz, max_hz }),
            MappingPolicy::NearestFrequency { span_divisor, .. } if !(span_divisor > 0.0) => {
                Err(ConfigError::BadDivisor(span_divisor))
            }
            MappingPolicy::BinRange { low_bin, high_bin } if low_bin > high_bin => {
                Err(ConfigError::InvertedBins {
                    low: low_bin,
                    high: high_bin,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Centre frequency of `bin` in a buffer of `bins` entries.
#[inline]
pub fn bin_frequency(bin: usize, bins: usize, nyquist_hz: f32) -> f32 {
    if bins == 0 {
        return 0.0;
    }
    bin as f32 / bins as f32 * nyquist_hz
}

/// Target frequency of every segment under the nearest-frequency policy.
pub fn segment_target_frequencies(
    total_segments: usize,
    min_hz: f32,
    max_hz: f32,
    span_divisor: f32,
) -> Vec<f32> {
    (0..total_segments)
        .map(|i| min_hz + ramp(i, total_segments) * (max_hz - min_hz) / span_divisor)
        .collect()
}

/// Pick the bin serving `target_hz`, or `None` when no bin qualifies.
pub fn pick_bin(target_hz: f32, bins: usize, nyquist_hz: f32, tie_break: TieBreak) -> Option<usize> {
    match tie_break {
        TieBreak::FirstAtOrAbove => {
            (0..bins).find(|&k| bin_frequency(k, bins, nyquist_hz) >= target_hz)
        }
        TieBreak::Closest => {
            let mut best: Option<(usize, f32)> = None;
            for k in 0..bins {
                let d = (bin_frequency(k, bins, nyquist_hz) - target_hz).abs();
                match best {
                    Some((_, bd)) if d >= bd => {}
                    _ => best = Some((k, d)),
                }
            }
            best.map(|(k, _)| k)
        }
    }
}

/// Bin read by segment `i` under the logarithmic policy, clamped to `[0, bins - 1]`.
pub fn log_bin(i: usize, total_segments: usize, bins: usize) -> usize {
    if bins == 0 {
        return 0;
    }
    let exponent = 1f32.log10() + ramp(i, total_segments) * ((bins as f32).log10() - 1f32.log10());
    let idx = 10f32.powf(exponent).floor();
    (idx.max(0.0) as usize).min(bins - 1)
}

// i / (S - 1), defined as 0 for a single segment.
#[inline]
fn ramp(i: usize, total_segments: usize) -> f32 {
    if total_segments > 1 {
        i as f32 / (total_segments - 1) as f32
    } else {
        0.0
    }
}

#[inline]
fn byte_at(spectrum: &[u8], k: usize) -> f32 {
    spectrum.get(k).copied().unwrap_or(0) as f32
}

/// Converts spectrum buffers into segment amplitudes.
///
/// Bin tables for the frequency and logarithmic policies only depend on the
/// buffer length and sample rate, so they are built on first use and reused
/// until either changes.
#[derive(Clone, Debug)]
pub struct SegmentMapper {
    config: MapperConfig,
    total_segments: usize,
    table: Vec<Option<usize>>,
    table_key: Option<(usize, u32)>,
}

impl SegmentMapper {
    pub fn new(config: MapperConfig, total_segments: usize) -> Self {
        Self {
            config,
            total_segments,
            table: Vec::new(),
            table_key: None,
        }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn total_segments(&self) -> usize {
        self.total_segments
    }

    /// Map `spectrum` into `out`, which ends up exactly `total_segments` long.
    pub fn map_into(&mut self, spectrum: &[u8], sample_rate: f32, out: &mut Vec<f32>) {
        let s = self.total_segments;
        let divisor = self.config.divisor;
        out.clear();
        out.resize(s, 0.0);
        let bins = spectrum.len();
        if bins == 0 || s == 0 {
            return;
        }

        match self.config.policy {
            MappingPolicy::NearestFrequency { .. } | MappingPolicy::Logarithmic => {
                self.ensure_table(bins, sample_rate);
                for (slot, pick) in out.iter_mut().zip(&self.table) {
                    *slot = pick.map_or(0.0, |k| byte_at(spectrum, k)) / divisor;
                }
            }
            MappingPolicy::LinearInterpolation => {
                let step = bins as f32 / s as f32;
                for (i, slot) in out.iter_mut().enumerate() {
                    let pos = i as f32 * step;
                    let lo = pos.floor();
                    let hi = pos.ceil();
                    let a = byte_at(spectrum, lo as usize);
                    let b = byte_at(spectrum, hi as usize);
                    *slot = (a + (b - a) * (pos - lo)) / divisor;
                }
            }
            MappingPolicy::BinRange { low_bin, high_bin } => {
                let low = low_bin.min(bins);
                let high = high_bin.min(bins).max(low);
                let band = &spectrum[low..high];
                let len = band.len();
                for (i, slot) in out.iter_mut().enumerate() {
                    let start = i * len / s;
                    let end = (i + 1) * len / s;
                    if end > start {
                        let sum: f32 = band[start..end].iter().map(|&b| b as f32 / divisor).sum();
                        *slot = sum / (end - start) as f32;
                    }
                }
            }
        }
    }

    /// Allocating convenience over [`SegmentMapper::map_into`].
    pub fn map(&mut self, spectrum: &[u8], sample_rate: f32) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.total_segments);
        self.map_into(spectrum, sample_rate, &mut out);
        out
    }

    fn ensure_table(&mut self, bins: usize, sample_rate: f32) {
        let key = (bins, sample_rate.to_bits());
        if self.table_key == Some(key) {
            return;
        }
        let nyquist = sample_rate / 2.0;
        let s = self.total_segments;
        self.table = match self.config.policy {
            MappingPolicy::NearestFrequency {
                min_hz,
                max_hz,
                span_divisor,
                tie_break,
            } => segment_target_frequencies(
                s,
                min_hz.unwrap_or(0.0),
                max_hz.unwrap_or(nyquist),
                span_divisor,
            )
            .into_iter()
            .map(|target| pick_bin(target, bins, nyquist, tie_break))
            .collect(),
            MappingPolicy::Logarithmic => (0..s).map(|i| Some(log_bin(i, s, bins))).collect(),
            _ => Vec::new(),
        };
        log::debug!(
            "[mapper] rebuilt bin table: bins={} nyquist={:.0}Hz segments={}",
            bins,
            nyquist,
            s
        );
        self.table_key = Some(key);
    }
}
