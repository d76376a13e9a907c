use thiserror::Error;

/// Failures while turning fetched frame data into a [`crate::FrameSequence`].
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame data is not a JSON array of number arrays: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("frame {frame} segment {segment} is not a finite number")]
    NonFinite { frame: usize, segment: usize },
}

/// Failures reported by a [`crate::Renderer`] backend.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("no drawable for segment {segment} dot {dot}")]
    MissingTarget { segment: usize, dot: usize },
    #[error("render backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("ring needs at least one segment and one dot (got {segments} x {dots})")]
    EmptyRing { segments: usize, dots: usize },
    #[error("frequency range is inverted: {min_hz} Hz > {max_hz} Hz")]
    InvertedRange { min_hz: f32, max_hz: f32 },
    #[error("normalization divisor must be positive, got {0}")]
    BadDivisor(f32),
    #[error("bin range is inverted: {low} > {high}")]
    InvertedBins { low: usize, high: usize },
    #[error("decay factor must be in [0, 1), got {0}")]
    BadDecayFactor(f32),
    #[error("gate threshold must be a non-negative number, got {0}")]
    BadThreshold(f32),
    #[error("state table is empty")]
    NoStates,
    #[error("config override rejected: {0}")]
    Override(String),
}
