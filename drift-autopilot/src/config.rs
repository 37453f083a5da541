use std::env;

use drift_core::constants::{
    FRAME_MS_DEFAULT, MAX_FRAMES_DEFAULT, VIEWPORT_HEIGHT_DEFAULT, VIEWPORT_WIDTH_DEFAULT,
};
use drift_core::{ReplayConfig, Viewport};

/// Run settings resolved from the environment. CLI flags override them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunnerDefaults {
    pub max_frames: u32,
    pub frame_ms: f64,
    pub viewport: Viewport,
}

impl Default for RunnerDefaults {
    fn default() -> Self {
        Self {
            max_frames: MAX_FRAMES_DEFAULT,
            frame_ms: FRAME_MS_DEFAULT,
            viewport: Viewport::new(VIEWPORT_WIDTH_DEFAULT, VIEWPORT_HEIGHT_DEFAULT),
        }
    }
}

impl RunnerDefaults {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let width = read_f64(&lookup, "DRIFT_VIEWPORT_WIDTH", VIEWPORT_WIDTH_DEFAULT);
        let height = read_f64(&lookup, "DRIFT_VIEWPORT_HEIGHT", VIEWPORT_HEIGHT_DEFAULT);

        Self {
            max_frames: read_u32(&lookup, "DRIFT_MAX_FRAMES", MAX_FRAMES_DEFAULT),
            frame_ms: read_f64(&lookup, "DRIFT_FRAME_MS", FRAME_MS_DEFAULT),
            viewport: Viewport::new(width, height),
        }
    }

    pub fn replay_config(&self, seed: u32) -> ReplayConfig {
        ReplayConfig {
            seed,
            max_frames: self.max_frames,
            frame_ms: self.frame_ms,
            viewport: self.viewport,
        }
    }
}

fn read_u32(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u32) -> u32 {
    lookup(name)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn read_f64(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: f64) -> f64 {
    let Some(raw) = lookup(name) else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => {
            tracing::warn!("{name}={raw:?} is not a positive number. Falling back to {default}.");
            default
        }
    }
}
