// Shared tuning constants for the radial pulse pipeline.

// Ring geometry
pub const TOTAL_SEGMENTS: usize = 180; // radial lines around the ring
pub const DOT_COUNT: usize = 11; // dots per radial line
pub const BASE_RADIUS: f32 = 100.0; // distance of the innermost dot from center
pub const DOT_SPACING: f32 = 5.0; // gap between neighbouring dots on a line
pub const SCENE_DOT_SPACING: f32 = 10.0; // wider spacing used by the scene ring
pub const MAX_AMPLITUDE: f32 = 50.0; // outward travel of a fully driven dot

// Spectrum analysis
pub const BYTE_MAX: f32 = 255.0; // full-scale byte magnitude
pub const HEADROOM_DIVISOR: f32 = 128.0; // "hot" normalization, values reach ~2
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;
pub const MIN_FREQ_HZ: f32 = 20.0;
pub const MAX_FREQ_HZ: f32 = 12_000.0;
pub const FREQ_SPAN_DIVISOR: f32 = 0.75; // stretches the target span past MAX_FREQ_HZ

// Smoothing
pub const DECAY_FACTOR: f32 = 0.8; // per-tick exponential release
pub const GATE_THRESHOLD: f32 = 0.05;
pub const SILENCE_FLOOR: f32 = 1e-4; // smoothed values below this snap to 0

// Amplitude hue (HSL degrees)
pub const HUE_BASE: f32 = 200.0; // silence: blue
pub const HUE_SPAN: f32 = 160.0; // loud: wraps to magenta/pink at 360
pub const HUE_SATURATION: f32 = 100.0;
pub const HUE_LIGHTNESS: f32 = 50.0;

// Shadow aggregate
pub const SHADOW_WIDTH_BASE: f32 = 1.0;
pub const SHADOW_WIDTH_SCALE: f32 = 20.0;
pub const SHADOW_OPACITY_BASE: f32 = 0.25;
pub const SHADOW_OPACITY_SCALE: f32 = 1.8;
pub const SHADOW_EXCLUDE_BELOW: f32 = 0.01; // near-silent segments skipped in the mean

// Reflected ring (scene renderer)
pub const REFLECTION_Y_SCALE: f32 = -0.75;
pub const REFLECTION_Y_OFFSET: f32 = -250.0;

// Tick rates
pub const LIVE_TICKS_PER_SEC: u32 = 12;
