use crate::constants::{LIVE_TICKS_PER_SEC, SCENE_DOT_SPACING};
use crate::error::ConfigError;
use crate::layout::{ColorMode, LayoutConfig, PulseTaper, ShadowConfig};
use crate::mapper::MapperConfig;
use crate::smoother::SmoothingPolicy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a session's amplitudes come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    #[default]
    Microphone,
    Frames,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickRate {
    /// Fixed-interval ticks.
    PerSecond(u32),
    /// One tick per display frame.
    EveryFrame,
}

impl Default for TickRate {
    fn default() -> Self {
        TickRate::PerSecond(LIVE_TICKS_PER_SEC)
    }
}

impl TickRate {
    /// Minimum spacing between ticks in milliseconds; 0 for display-synced ticks.
    pub fn interval_ms(&self) -> f64 {
        match *self {
            TickRate::PerSecond(n) if n > 0 => 1000.0 / n as f64,
            _ => 0.0,
        }
    }
}

/// Page-selectable presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Live,
    Recorded,
    Classic,
}

impl Mode {
    /// Parse a `data-mode` value; unknown values give `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "mic" | "microphone" => Some(Mode::Live),
            "recorded" | "frames" | "scene" => Some(Mode::Recorded),
            "classic" => Some(Mode::Classic),
            _ => None,
        }
    }

    pub fn config(self) -> VisualizerConfig {
        match self {
            Mode::Live => VisualizerConfig::live(),
            Mode::Recorded => VisualizerConfig::recorded(),
            Mode::Classic => VisualizerConfig::classic(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub input: InputKind,
    pub layout: LayoutConfig,
    pub mapper: MapperConfig,
    pub smoothing: SmoothingPolicy,
    pub color_mode: ColorMode,
    /// `None` disables the shadow aggregate.
    pub shadow: Option<ShadowConfig>,
    pub tick_rate: TickRate,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self::live()
    }
}

impl VisualizerConfig {
    /// Microphone-driven SVG ring.
    pub fn live() -> Self {
        Self {
            input: InputKind::Microphone,
            layout: LayoutConfig::default(),
            mapper: MapperConfig::default(),
            smoothing: SmoothingPolicy::default(),
            color_mode: ColorMode::AmplitudeHue,
            shadow: Some(ShadowConfig::default()),
            tick_rate: TickRate::default(),
        }
    }

    /// Pre-recorded frames on the gradient scene ring.
    pub fn recorded() -> Self {
        Self {
            input: InputKind::Frames,
            layout: LayoutConfig {
                dot_spacing: SCENE_DOT_SPACING,
                taper: PulseTaper::Uniform,
                ..LayoutConfig::default()
            },
            mapper: MapperConfig::default(),
            smoothing: SmoothingPolicy::None,
            color_mode: ColorMode::Gradient {
                color_a: 0x8faae2,
                color_b: 0xec5935,
            },
            shadow: None,
            tick_rate: TickRate::EveryFrame,
        }
    }

    /// Unsmoothed microphone ring with hot normalization.
    pub fn classic() -> Self {
        Self {
            mapper: MapperConfig::classic(),
            smoothing: SmoothingPolicy::None,
            shadow: None,
            tick_rate: TickRate::EveryFrame,
            ..Self::live()
        }
    }

    /// Layer a partial JSON object over this config. Objects merge key by
    /// key; any other value replaces what it lands on. A policy object whose
    /// `kind` differs from the current one replaces it whole.
    pub fn with_overrides(&self, json: &str) -> Result<Self, ConfigError> {
        let patch: Value =
            serde_json::from_str(json).map_err(|e| ConfigError::Override(e.to_string()))?;
        let mut base = serde_json::to_value(self).map_err(|e| ConfigError::Override(e.to_string()))?;
        merge(&mut base, patch);
        let merged: Self =
            serde_json::from_value(base).map_err(|e| ConfigError::Override(e.to_string()))?;
        merged.validate()?;
        Ok(merged)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.smoothing.validate()?;
        self.mapper.validate()
    }
}

fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch))
            if patch.get("kind").map_or(true, |k| base.get("kind") == Some(k)) =>
        {
            for (k, v) in patch {
                match base.get_mut(&k) {
                    Some(slot) => merge(slot, v),
                    None => {
                        base.insert(k, v);
                    }
                }
            }
        }
        (slot, patch) => *slot = patch,
    }
}
