use serde::{Deserialize, Serialize};

use crate::constants::{ASTEROID_COUNT, PLAYER_MAX_SPEED, STAR_COUNT};
use crate::error::WorldRule;
use crate::vector::Vec2;

mod world;

pub use world::{InputOutcome, World};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Last nonzero velocity. Orients the ship while it is at rest.
    pub facing: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub position: Vec2,
    pub velocity: Vec2,
    pub spots: Vec<Vec2>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub position: Vec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceReport {
    pub shots_culled: usize,
}

/// Per-frame summary kept by replays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub frame_count: u32,
    pub player_x: f64,
    pub player_y: f64,
    pub player_vx: f64,
    pub player_vy: f64,
    pub shots: usize,
    pub shots_fired: u32,
    pub halted: bool,
}

/// Advances `position` by `velocity * elapsed_s` and wraps each axis.
///
/// The remainder keeps the sign of the dividend. Any result that is not
/// strictly positive lands on exactly `1.0`, so wrapped coordinates live in
/// `(0, 1]`: crossing the lower edge re-enters at the upper edge.
pub fn wrap_advance(position: Vec2, velocity: Vec2, elapsed_s: f64) -> Vec2 {
    Vec2::new(
        wrap_axis(position.x + velocity.x * elapsed_s),
        wrap_axis(position.y + velocity.y * elapsed_s),
    )
}

#[inline]
fn wrap_axis(raw: f64) -> f64 {
    let wrapped = raw % 1.0;
    if wrapped > 0.0 {
        wrapped
    } else {
        1.0
    }
}

/// Advances a shot without wrapping. `None` once either axis leaves `[0, 1]`.
pub fn bounded_advance(position: Vec2, velocity: Vec2, elapsed_s: f64) -> Option<Vec2> {
    let next = Vec2::new(
        position.x + velocity.x * elapsed_s,
        position.y + velocity.y * elapsed_s,
    );
    if next.x > 1.0 || next.x < 0.0 || next.y > 1.0 || next.y < 0.0 {
        return None;
    }
    Some(next)
}

/// A tick may remove any number of shots but add at most one.
pub fn validate_shot_growth(before: usize, after: usize) -> Result<(), WorldRule> {
    if after > before + 1 {
        return Err(WorldRule::ShotGrowth);
    }
    Ok(())
}

#[inline]
fn in_closed_unit(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn validate_player(player: &Player) -> Result<(), WorldRule> {
    let p = player.position;
    // The spawn point (0.5, 0.5) has never been wrapped, so accept [0, 1].
    if !in_closed_unit(p.x) || !in_closed_unit(p.y) {
        return Err(WorldRule::PlayerBounds);
    }
    let v = player.velocity;
    if v.x.abs() > PLAYER_MAX_SPEED || v.y.abs() > PLAYER_MAX_SPEED {
        return Err(WorldRule::PlayerSpeedClamp);
    }
    Ok(())
}

fn validate_entities(
    shots: &[Shot],
    asteroids: &[Asteroid],
    stars: &[Star],
) -> Result<(), WorldRule> {
    if asteroids.len() != ASTEROID_COUNT {
        return Err(WorldRule::AsteroidCount);
    }
    if stars.len() != STAR_COUNT {
        return Err(WorldRule::StarCount);
    }

    for shot in shots {
        if !in_closed_unit(shot.position.x) || !in_closed_unit(shot.position.y) {
            return Err(WorldRule::ShotBounds);
        }
    }

    for asteroid in asteroids {
        let p = asteroid.position;
        if !in_closed_unit(p.x) || !in_closed_unit(p.y) {
            return Err(WorldRule::AsteroidBounds);
        }
    }

    Ok(())
}
