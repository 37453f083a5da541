use serde::{Deserialize, Serialize};

use crate::collision;
use crate::input::InputQueue;
use crate::render::{self, Surface, Viewport};
use crate::sim::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopState {
    Running,
    /// Terminal. Entered on the first player/asteroid contact.
    Halted,
}

/// The host's "call me again next refresh" primitive. Every tick must be
/// requested explicitly; nothing repeats on its own.
pub trait Scheduler {
    fn request_frame(&mut self);
}

/// Scheduler for hosts that pump frames themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualScheduler {
    pending: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one pending request, if any.
    pub fn take_request(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending += 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub frame: u32,
    pub state: LoopState,
    pub elapsed_s: f64,
    pub fired: bool,
    pub shots_culled: usize,
    pub collided: bool,
}

/// Owns the world and drives it once per display refresh.
#[derive(Clone, Debug)]
pub struct FrameStepper {
    world: World,
    input: InputQueue,
    state: LoopState,
    last_render_ms: f64,
}

impl FrameStepper {
    pub fn new(world: World, now_ms: f64) -> Self {
        Self {
            world,
            input: InputQueue::new(),
            state: LoopState::Running,
            last_render_ms: now_ms,
        }
    }

    /// Requests the first tick.
    pub fn start(&self, scheduler: &mut dyn Scheduler) {
        if self.state == LoopState::Running {
            scheduler.request_frame();
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.state == LoopState::Halted
    }

    pub fn input_mut(&mut self) -> &mut InputQueue {
        &mut self.input
    }

    /// Queues a key-down identifier for the next tick. Nothing is queued
    /// once the loop has halted.
    pub fn key_down(&mut self, identifier: &str) -> bool {
        if self.state == LoopState::Halted {
            return false;
        }
        self.input.push_identifier(identifier)
    }

    /// Runs one frame: resize and clear the surface, apply queued input,
    /// advance by the time since the previous tick, draw, then test the
    /// ship against the asteroids. The next tick is requested only while
    /// the loop is still running.
    pub fn tick(
        &mut self,
        now_ms: f64,
        viewport: Viewport,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) -> FrameReport {
        if self.state == LoopState::Halted {
            self.input.clear();
            tracing::debug!(frame = self.world.frame_count(), "tick after halt ignored");
            return FrameReport {
                frame: self.world.frame_count(),
                state: LoopState::Halted,
                elapsed_s: 0.0,
                fired: false,
                shots_culled: 0,
                collided: false,
            };
        }

        surface.resize(viewport);
        render::clear(surface);

        let input = self.world.apply_input(&mut self.input);
        let elapsed_s = (now_ms - self.last_render_ms) / 1000.0;
        self.last_render_ms = now_ms;

        let advance = self.world.advance(elapsed_s);
        render::draw_world(&self.world, surface);

        let collided = collision::detect(&self.world, surface.viewport());
        if collided {
            self.state = LoopState::Halted;
            self.input.clear();
            tracing::info!(
                frame = self.world.frame_count(),
                shots_fired = self.world.shots_fired(),
                "player collided with an asteroid; halting loop"
            );
        } else {
            scheduler.request_frame();
        }

        FrameReport {
            frame: self.world.frame_count(),
            state: self.state,
            elapsed_s,
            fired: input.fired,
            shots_culled: advance.shots_culled,
            collided,
        }
    }
}
