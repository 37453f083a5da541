use serde::{Deserialize, Serialize};

use crate::constants::{
    FRAME_MS_DEFAULT, MAX_FRAMES_DEFAULT, SEED_DEFAULT, VIEWPORT_HEIGHT_DEFAULT,
    VIEWPORT_WIDTH_DEFAULT,
};
use crate::error::{ConfigError, ReplayError};
use crate::frame::{FrameReport, FrameStepper, LoopState, ManualScheduler};
use crate::input::InputQueue;
use crate::render::{NullSurface, Surface, Viewport};
use crate::script::KeyScript;
use crate::sim::{validate_shot_growth, Checkpoint, World};
use crate::vector::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    pub seed: u32,
    pub max_frames: u32,
    pub frame_ms: f64,
    pub viewport: Viewport,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            seed: SEED_DEFAULT,
            max_frames: MAX_FRAMES_DEFAULT,
            frame_ms: FRAME_MS_DEFAULT,
            viewport: Viewport::new(VIEWPORT_WIDTH_DEFAULT, VIEWPORT_HEIGHT_DEFAULT),
        }
    }
}

impl ReplayConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Viewport { width, height } = self.viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        if !(self.frame_ms.is_finite() && self.frame_ms > 0.0) {
            return Err(ConfigError::InvalidFrameInterval {
                frame_ms: self.frame_ms,
            });
        }
        if self.max_frames == 0 {
            return Err(ConfigError::InvalidMaxFrames);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayResult {
    pub seed: u32,
    pub frame_count: u32,
    pub halted: bool,
    pub shots_fired: u32,
    pub shots_remaining: usize,
    pub player_position: Vec2,
    pub player_velocity: Vec2,
}

/// Drives a `FrameStepper` without a display: a virtual clock advancing by a
/// fixed interval and a scheduler pumped by the caller.
#[derive(Clone, Debug)]
pub struct HeadlessHost<S: Surface> {
    stepper: FrameStepper,
    scheduler: ManualScheduler,
    surface: S,
    viewport: Viewport,
    clock_ms: f64,
    frame_ms: f64,
}

impl<S: Surface> HeadlessHost<S> {
    pub fn new(world: World, viewport: Viewport, frame_ms: f64, surface: S) -> Self {
        let stepper = FrameStepper::new(world, 0.0);
        let mut scheduler = ManualScheduler::new();
        stepper.start(&mut scheduler);
        Self {
            stepper,
            scheduler,
            surface,
            viewport,
            clock_ms: 0.0,
            frame_ms,
        }
    }

    pub fn world(&self) -> &World {
        self.stepper.world()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn state(&self) -> LoopState {
        self.stepper.state()
    }

    pub fn input_mut(&mut self) -> &mut InputQueue {
        self.stepper.input_mut()
    }

    /// Index of the next tick to run.
    pub fn next_frame(&self) -> u32 {
        self.stepper.world().frame_count()
    }

    /// Runs the pending tick, if the stepper asked for one.
    pub fn step(&mut self) -> Option<FrameReport> {
        if !self.scheduler.take_request() {
            return None;
        }
        self.clock_ms += self.frame_ms;
        Some(self.stepper.tick(
            self.clock_ms,
            self.viewport,
            &mut self.surface,
            &mut self.scheduler,
        ))
    }

    pub fn result(&self, seed: u32) -> ReplayResult {
        let world = self.stepper.world();
        ReplayResult {
            seed,
            frame_count: world.frame_count(),
            halted: self.stepper.is_halted(),
            shots_fired: world.shots_fired(),
            shots_remaining: world.shots().len(),
            player_position: world.player().position,
            player_velocity: world.player().velocity,
        }
    }
}

fn prepare(
    config: &ReplayConfig,
    script: &KeyScript,
) -> Result<HeadlessHost<NullSurface>, ReplayError> {
    config.validate()?;
    script.validate(config.max_frames)?;
    Ok(HeadlessHost::new(
        World::generate(config.seed),
        config.viewport,
        config.frame_ms,
        NullSurface::default(),
    ))
}

pub fn replay(config: &ReplayConfig, script: &KeyScript) -> Result<ReplayResult, ReplayError> {
    let mut host = prepare(config, script)?;
    let mut cursor = script.cursor();

    while host.next_frame() < config.max_frames {
        let frame = host.next_frame();
        cursor.feed(frame, host.input_mut());
        if host.step().is_none() {
            break;
        }
    }

    Ok(host.result(config.seed))
}

/// Like [`replay`], recording a checkpoint at frame 0, every `every` frames
/// and at the final frame.
pub fn replay_with_checkpoints(
    config: &ReplayConfig,
    script: &KeyScript,
    every: u32,
) -> Result<Vec<Checkpoint>, ReplayError> {
    let every = every.max(1);
    let mut host = prepare(config, script)?;
    let mut cursor = script.cursor();
    let mut checkpoints = vec![host.world().checkpoint(false)];

    while host.next_frame() < config.max_frames {
        let frame = host.next_frame();
        cursor.feed(frame, host.input_mut());
        let Some(report) = host.step() else {
            break;
        };
        if report.frame % every == 0 {
            checkpoints.push(host.world().checkpoint(report.state == LoopState::Halted));
        }
    }

    let last = host
        .world()
        .checkpoint(host.state() == LoopState::Halted);
    if checkpoints.last().map(|entry| entry.frame_count) != Some(last.frame_count) {
        checkpoints.push(last);
    }

    Ok(checkpoints)
}

/// Replays while checking world invariants after every tick.
pub fn replay_strict(
    config: &ReplayConfig,
    script: &KeyScript,
) -> Result<ReplayResult, ReplayError> {
    let mut host = prepare(config, script)?;
    let mut cursor = script.cursor();

    host.world()
        .validate_invariants()
        .map_err(|rule| ReplayError::RuleViolation { frame: 0, rule })?;

    while host.next_frame() < config.max_frames {
        let frame = host.next_frame();
        cursor.feed(frame, host.input_mut());
        let shots_before = host.world().shots().len();
        let Some(report) = host.step() else {
            break;
        };

        let world = host.world();
        validate_shot_growth(shots_before, world.shots().len())
            .and_then(|()| world.validate_invariants())
            .map_err(|rule| ReplayError::RuleViolation {
                frame: report.frame,
                rule,
            })?;
    }

    Ok(host.result(config.seed))
}
