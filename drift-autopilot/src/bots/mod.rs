use drift_core::input::Key;
use drift_core::{Viewport, World};

mod evader;

pub use evader::EvaderBot;

/// Chooses key presses for the next tick from the current world.
pub trait AutopilotBot {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn reset(&mut self, seed: u32);
    fn next_keys(&mut self, world: &World, viewport: Viewport) -> Vec<Key>;
}

const BOT_IDS: [&str; 3] = ["idle", "gunner", "evader"];

pub fn bot_ids() -> &'static [&'static str] {
    &BOT_IDS
}

pub fn create_bot(id: &str) -> Option<Box<dyn AutopilotBot>> {
    match id {
        "idle" => Some(Box::new(IdleBot)),
        "gunner" => Some(Box::new(GunnerBot::new(GUNNER_CADENCE_FRAMES))),
        "evader" => Some(Box::new(EvaderBot::default())),
        _ => None,
    }
}

pub fn describe_bots() -> Vec<(&'static str, &'static str)> {
    bot_ids()
        .iter()
        .filter_map(|id| create_bot(id))
        .map(|bot| (bot.id(), bot.description()))
        .collect()
}

/// Never touches the keyboard; the ship keeps its spawn drift.
pub struct IdleBot;

impl AutopilotBot for IdleBot {
    fn id(&self) -> &'static str {
        "idle"
    }

    fn description(&self) -> &'static str {
        "no input; baseline drift"
    }

    fn reset(&mut self, _seed: u32) {}

    fn next_keys(&mut self, _world: &World, _viewport: Viewport) -> Vec<Key> {
        Vec::new()
    }
}

const GUNNER_CADENCE_FRAMES: u32 = 12;

/// Fires on a fixed cadence, sweeping its heading a quarter turn every
/// few volleys.
pub struct GunnerBot {
    cadence: u32,
    volleys: u32,
}

impl GunnerBot {
    pub fn new(cadence: u32) -> Self {
        Self {
            cadence: cadence.max(1),
            volleys: 0,
        }
    }
}

impl AutopilotBot for GunnerBot {
    fn id(&self) -> &'static str {
        "gunner"
    }

    fn description(&self) -> &'static str {
        "fires every 12 frames while rotating thrust"
    }

    fn reset(&mut self, _seed: u32) {
        self.volleys = 0;
    }

    fn next_keys(&mut self, world: &World, _viewport: Viewport) -> Vec<Key> {
        if world.frame_count() % self.cadence != 0 {
            return Vec::new();
        }
        self.volleys += 1;

        let steer = match (self.volleys / 4) % 4 {
            0 => Key::Down,
            1 => Key::Left,
            2 => Key::Up,
            _ => Key::Right,
        };
        vec![steer, Key::Fire]
    }
}
