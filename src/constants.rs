// Page wiring and analyser tuning for the web front-end.
//
// Element ids are the contract with the host page; everything numeric that
// shapes the ring itself lives in `pulse_core::constants`.
// Root element carrying `data-mode`, `data-frames-base`, `data-state` and `data-config`
pub const ROOT_ID: &str = "visualizer";

// SVG ring (live/classic modes)
pub const PATTERN_ID: &str = "circle-pattern";
pub const SHADOW_ID: &str = "shadow-svg";
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const DOT_RADIUS: f32 = 1.0;

// Canvas ring (recorded mode)
pub const SCENE_CANVAS_ID: &str = "scene-canvas";
pub const SCENE_DOT_RADIUS: f64 = 1.5;
// Alpha of the reflected ring when no shadow aggregate drives it
pub const SCENE_REFLECTION_ALPHA: f64 = 0.35;
// World units visible from the centre to the nearest canvas edge (fits the reflection)
pub const SCENE_HALF_EXTENT: f64 = 450.0;

// Status line
pub const STATUS_ID: &str = "mic-status";
pub const MIC_DENIED_TEXT: &str = "Microphone access denied.";

// Analyser node
pub const ANALYSER_FFT_SIZE: u32 = 256; // 128 frequency bins
pub const ANALYSER_SMOOTHING: f64 = 0.8;

// Frame files are fetched from `<base>/<state>.json`
pub const DEFAULT_FRAMES_BASE: &str = "frames";
