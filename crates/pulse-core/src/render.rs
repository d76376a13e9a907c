//! Seams to the outside world: where spectra come from and where dots go.

use crate::error::RenderError;
use crate::layout::{LayoutPoint, ShadowAggregate};

/// Live magnitude spectrum, e.g. an analyser node fed by a microphone.
pub trait SpectrumSource {
    /// Sample rate of the analysed signal in Hz.
    fn sample_rate(&self) -> f32;

    /// Number of bins [`SpectrumSource::read`] fills. Fixed for the source's lifetime.
    fn bin_count(&self) -> usize;

    /// Overwrite `buf` with the latest magnitudes (0-255, lowest frequency
    /// first). Returns `false` when no data is available yet.
    fn read(&mut self, buf: &mut [u8]) -> bool;
}

/// Drawing backend for the ring.
///
/// Backends keep an index→drawable table built in
/// [`Renderer::ensure_segments`] so per-tick updates never search the scene.
pub trait Renderer {
    /// Make sure exactly `total_segments` groups of `dot_count` drawables
    /// exist. Calling it again with the same shape does nothing.
    fn ensure_segments(&mut self, total_segments: usize, dot_count: usize) -> Result<(), RenderError>;

    fn update_dot(&mut self, point: &LayoutPoint) -> Result<(), RenderError>;

    fn update_aggregate(&mut self, aggregate: &ShadowAggregate) -> Result<(), RenderError>;

    /// Base rotation of the main ring in degrees.
    fn set_rotation(&mut self, _degrees: f32) {}

    fn begin_frame(&mut self) {}

    fn end_frame(&mut self) {}
}
