//! Named visual presets and the cyclic state machine that walks them.
//!
//! A state bundles a color pair for the ring gradient, a base rotation and
//! the frame file it plays. Transitions only move an index; loading the
//! frames and committing them happens in [`crate::Session::enter_state`].

use crate::error::ConfigError;
use crate::frames::{FramePrep, NormalizeParams, VariationParams};
use crate::layout::ColorMode;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateConfig {
    pub name: String,
    pub color_a: u32,
    pub color_b: u32,
    /// Rotation of the main ring in degrees.
    pub rotation_deg: f32,
    #[serde(default)]
    pub prep: FramePrep,
}

impl StateConfig {
    pub fn new(name: &str, color_a: u32, color_b: u32, rotation_deg: f32) -> Self {
        Self {
            name: name.to_string(),
            color_a,
            color_b,
            rotation_deg,
            prep: FramePrep::default(),
        }
    }

    pub fn with_prep(mut self, prep: FramePrep) -> Self {
        self.prep = prep;
        self
    }

    pub fn color_mode(&self) -> ColorMode {
        ColorMode::Gradient {
            color_a: self.color_a,
            color_b: self.color_b,
        }
    }

    /// Frame file name for this state, e.g. `company.json`.
    pub fn frame_file(&self) -> String {
        format!("{}.json", self.name)
    }
}

/// The five presets of the recorded scene, in navigation order.
pub fn default_states() -> Vec<StateConfig> {
    vec![
        StateConfig::new("company", 0x8faae2, 0xec5935, 45.0).with_prep(FramePrep {
            normalize: None,
            variations: Some(VariationParams::default()),
        }),
        StateConfig::new("homepage", 0x911c58, 0xec5935, 45.0),
        StateConfig::new("partner", 0x911c58, 0xf4b53f, 0.0),
        StateConfig::new("platform", 0x8faae2, 0xb1e088, -90.0).with_prep(FramePrep {
            normalize: Some(NormalizeParams {
                mean_threshold: 0.95,
                downscale_factor: 1.0,
                upscale_factor: 2.5,
                upscale_low: 0.05,
                upscale_high: 0.25,
            }),
            variations: None,
        }),
        StateConfig::new("solutions", 0xec5935, 0xf4b53f, 90.0),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateStep {
    Advance,
    Retreat,
}

#[derive(Clone, Debug)]
pub struct StateMachine {
    states: Vec<StateConfig>,
    by_name: FnvHashMap<String, usize>,
    current: usize,
}

impl StateMachine {
    pub fn new(states: Vec<StateConfig>) -> Result<Self, ConfigError> {
        if states.is_empty() {
            return Err(ConfigError::NoStates);
        }
        let by_name = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();
        Ok(Self {
            states,
            by_name,
            current: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &StateConfig {
        &self.states[self.current]
    }

    pub fn get(&self, index: usize) -> Option<&StateConfig> {
        self.states.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Index one step away from the current state, wrapping at both ends.
    pub fn peek(&self, step: StateStep) -> usize {
        let n = self.states.len();
        match step {
            StateStep::Advance => (self.current + 1) % n,
            StateStep::Retreat => (self.current + n - 1) % n,
        }
    }

    /// Move to `index` (wrapped into range) and return the new state.
    pub fn select(&mut self, index: usize) -> &StateConfig {
        self.current = index % self.states.len();
        &self.states[self.current]
    }

    pub fn step(&mut self, step: StateStep) -> &StateConfig {
        let next = self.peek(step);
        self.select(next)
    }

    pub fn advance(&mut self) -> &StateConfig {
        self.step(StateStep::Advance)
    }

    pub fn retreat(&mut self) -> &StateConfig {
        self.step(StateStep::Retreat)
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self {
            by_name: default_states()
                .iter()
                .enumerate()
                .map(|(i, s)| (s.name.clone(), i))
                .collect(),
            states: default_states(),
            current: 0,
        }
    }
}
