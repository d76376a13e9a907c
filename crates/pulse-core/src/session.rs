//! One visualizer session: the per-tick pipeline plus the little state it keeps.
//!
//! Setup (microphone permission, frame fetch) happens outside and hands the
//! results in; [`Session::tick`] itself is synchronous and never waits on
//! anything. A tick with nothing to show (no source yet, no frames loaded)
//! is a no-op rather than an error.

use crate::config::{InputKind, VisualizerConfig};
use crate::error::{ConfigError, RenderError};
use crate::frames::{FramePlayer, FrameSequence};
use crate::layout::{LayoutEngine, LayoutPoint, ShadowAggregate};
use crate::mapper::SegmentMapper;
use crate::render::{Renderer, SpectrumSource};
use crate::smoother::TemporalSmoother;
use crate::state::{default_states, StateConfig, StateMachine, StateStep};

pub enum Input {
    /// Live spectrum; `None` until the source has been granted.
    Spectrum(Option<Box<dyn SpectrumSource>>),
    Frames(FramePlayer),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdleReason {
    NoSource,
    NoData,
    NoFrames,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    Idle(IdleReason),
    Rendered {
        dots: usize,
        skipped: usize,
        aggregate: Option<ShadowAggregate>,
    },
}

/// A state change that has been requested but whose frames are still loading.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub request_id: u64,
    pub index: usize,
    pub state: StateConfig,
}

pub struct Session {
    config: VisualizerConfig,
    mapper: SegmentMapper,
    smoother: TemporalSmoother,
    layout: LayoutEngine,
    input: Input,
    states: StateMachine,
    rotation_deg: f32,
    rotation_dirty: bool,
    latest_request: u64,
    spectrum: Vec<u8>,
    raw: Vec<f32>,
    smoothed: Vec<f32>,
    points: Vec<LayoutPoint>,
}

impl Session {
    pub fn new(config: VisualizerConfig) -> Result<Self, ConfigError> {
        Self::with_states(config, default_states())
    }

    pub fn with_states(
        config: VisualizerConfig,
        states: Vec<StateConfig>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let segments = config.layout.total_segments;
        let input = match config.input {
            InputKind::Microphone => Input::Spectrum(None),
            InputKind::Frames => Input::Frames(FramePlayer::default()),
        };
        Ok(Self {
            mapper: SegmentMapper::new(config.mapper, segments),
            smoother: TemporalSmoother::new(config.smoothing, segments),
            layout: LayoutEngine::new(config.layout, config.color_mode),
            input,
            states: StateMachine::new(states)?,
            rotation_deg: 0.0,
            rotation_dirty: true,
            latest_request: 0,
            spectrum: Vec::new(),
            raw: Vec::with_capacity(segments),
            smoothed: Vec::with_capacity(segments),
            points: Vec::with_capacity(segments * config.layout.dot_count),
            config,
        })
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn states(&self) -> &StateMachine {
        &self.states
    }

    pub fn rotation_deg(&self) -> f32 {
        self.rotation_deg
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    /// This tick's mapped amplitudes, before smoothing.
    pub fn raw(&self) -> &[f32] {
        &self.raw
    }

    /// This tick's rendered amplitudes.
    pub fn smoothed(&self) -> &[f32] {
        &self.smoothed
    }

    pub fn points(&self) -> &[LayoutPoint] {
        &self.points
    }

    pub fn player(&self) -> Option<&FramePlayer> {
        match &self.input {
            Input::Frames(p) => Some(p),
            Input::Spectrum(_) => None,
        }
    }

    pub fn set_spectrum_source(&mut self, source: Box<dyn SpectrumSource>) {
        log::info!(
            "[session] spectrum source ready: bins={} rate={}Hz",
            source.bin_count(),
            source.sample_rate()
        );
        self.input = Input::Spectrum(Some(source));
    }

    /// Build the renderer's drawables, push the current rotation and draw the
    /// ring at rest, so a session that never leaves idle still shows it.
    pub fn attach(&mut self, renderer: &mut dyn Renderer) -> Result<(), RenderError> {
        let c = &self.config.layout;
        renderer.ensure_segments(c.total_segments, c.dot_count)?;
        renderer.set_rotation(self.rotation_deg);
        self.rotation_dirty = false;

        self.raw.clear();
        self.raw.resize(c.total_segments, 0.0);
        self.smoothed.clone_from(&self.raw);
        self.layout.layout_into(&self.smoothed, &mut self.points);
        self.draw(renderer);
        Ok(())
    }

    /// Record a request to move one state away. The caller loads the
    /// returned state's frames and hands them to [`Session::complete_transition`].
    pub fn request_transition(&mut self, step: StateStep) -> Transition {
        let index = self.states.peek(step);
        self.request_state(index)
    }

    /// Request a state by name; `None` when no state has that name.
    pub fn request_named(&mut self, name: &str) -> Option<Transition> {
        let index = self.states.index_of(name)?;
        Some(self.request_state(index))
    }

    pub fn request_state(&mut self, index: usize) -> Transition {
        self.latest_request += 1;
        let index = index % self.states.len();
        Transition {
            request_id: self.latest_request,
            index,
            state: self.states.get(index).cloned().unwrap_or_else(|| self.states.current().clone()),
        }
    }

    /// Commit a finished transition. Returns `false` (and changes nothing)
    /// when a newer request was issued in the meantime. A failed load still
    /// enters the state, with no frames, so the new colors never show old frames.
    pub fn complete_transition<E: std::fmt::Display>(
        &mut self,
        transition: &Transition,
        frames: Result<FrameSequence, E>,
    ) -> bool {
        if transition.request_id != self.latest_request {
            log::debug!(
                "[session] dropping stale transition #{} (latest #{})",
                transition.request_id,
                self.latest_request
            );
            return false;
        }
        let frames = match frames {
            Ok(f) => f,
            Err(e) => {
                log::error!(
                    "[session] frames for '{}' unavailable: {}",
                    transition.state.name,
                    e
                );
                FrameSequence::empty()
            }
        };
        self.enter_state(transition.index, frames);
        true
    }

    /// Switch state in one step: frames, playback index, rotation and colors.
    pub fn enter_state(&mut self, index: usize, frames: FrameSequence) {
        let state = self.states.select(index).clone();
        self.rotation_deg = state.rotation_deg;
        self.rotation_dirty = true;
        self.layout.set_color_mode(state.color_mode());
        self.smoother.reset();
        let len = frames.len();
        if let Input::Frames(player) = &mut self.input {
            player.replace(frames);
        } else {
            self.input = Input::Frames(FramePlayer::new(frames));
        }
        log::info!(
            "[session] entered state '{}' ({} frames, rotation {}deg)",
            state.name,
            len,
            state.rotation_deg
        );
    }

    /// Run one animation tick against `renderer`.
    pub fn tick(&mut self, renderer: &mut dyn Renderer) -> TickOutcome {
        let segments = self.config.layout.total_segments;

        match &mut self.input {
            Input::Spectrum(None) => return TickOutcome::Idle(IdleReason::NoSource),
            Input::Spectrum(Some(source)) => {
                let bins = source.bin_count();
                if self.spectrum.len() != bins {
                    self.spectrum.resize(bins, 0);
                }
                if !source.read(&mut self.spectrum) {
                    return TickOutcome::Idle(IdleReason::NoData);
                }
                let rate = source.sample_rate();
                self.mapper.map_into(&self.spectrum, rate, &mut self.raw);
            }
            Input::Frames(player) => match player.advance() {
                Some(i) => player.sequence().fill_segments(i, segments, &mut self.raw),
                None => return TickOutcome::Idle(IdleReason::NoFrames),
            },
        }

        self.smoother.smooth_into(&self.raw, &mut self.smoothed);
        self.layout.layout_into(&self.smoothed, &mut self.points);

        if self.rotation_dirty {
            renderer.set_rotation(self.rotation_deg);
            self.rotation_dirty = false;
        }
        let (dots, skipped, aggregate) = self.draw(renderer);
        TickOutcome::Rendered {
            dots,
            skipped,
            aggregate,
        }
    }

    // Push this tick's points and shadow; returns (drawn, skipped, aggregate).
    fn draw(&self, renderer: &mut dyn Renderer) -> (usize, usize, Option<ShadowAggregate>) {
        renderer.begin_frame();
        let mut skipped = 0usize;
        let mut first_error: Option<RenderError> = None;
        for p in &self.points {
            if let Err(e) = renderer.update_dot(p) {
                skipped += 1;
                first_error.get_or_insert(e);
            }
        }
        let aggregate = self.config.shadow.map(|s| s.aggregate(&self.smoothed));
        if let Some(agg) = &aggregate {
            if let Err(e) = renderer.update_aggregate(agg) {
                log::debug!("[session] shadow not updated: {}", e);
            }
        }
        renderer.end_frame();

        if let Some(e) = first_error {
            log::warn!("[session] skipped {} dots this tick (first: {})", skipped, e);
        }
        (self.points.len() - skipped, skipped, aggregate)
    }
}
