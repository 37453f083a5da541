use drift_core::constants::{PLAYER_MAX_SPEED, THRUST_STEP};
use drift_core::input::Key;
use drift_core::{Vec2, Viewport, World};

use super::AutopilotBot;

// Distances are in units of the viewport scale, the same unit the
// collision radius is derived from.
const DANGER_RADIUS_SCALE: f64 = 0.35;
const FIRE_RANGE_SCALE: f64 = 0.9;
const LOOKAHEAD_S: f64 = 0.75;
const ESCAPE_SPEED: f64 = 0.15;
const FIRE_CONE_RAD: f64 = 0.2;
const FIRE_INTERVAL_FRAMES: u32 = 15;

/// Thrusts away from the nearest asteroid (now or shortly ahead, on the
/// torus) and takes potshots at anything lined up with its heading.
#[derive(Default)]
pub struct EvaderBot {
    last_fire_frame: Option<u32>,
}

#[derive(Clone, Copy, Debug)]
struct Threat {
    /// Field-space offset from the ship to the asteroid.
    delta: Vec2,
    distance_px: f64,
}

#[inline]
fn shortest_delta(from: f64, to: f64) -> f64 {
    let delta = to - from;
    if delta > 0.5 {
        delta - 1.0
    } else if delta < -0.5 {
        delta + 1.0
    } else {
        delta
    }
}

fn torus_delta(from: Vec2, to: Vec2) -> Vec2 {
    Vec2::new(shortest_delta(from.x, to.x), shortest_delta(from.y, to.y))
}

fn to_pixels(delta: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(delta.x * viewport.width, delta.y * viewport.height)
}

fn nearest_threat(world: &World, viewport: Viewport) -> Option<Threat> {
    let player = world.player();
    let player_ahead = player.position + player.velocity * LOOKAHEAD_S;

    world
        .asteroids()
        .iter()
        .flat_map(|asteroid| {
            let ahead = asteroid.position + asteroid.velocity * LOOKAHEAD_S;
            [
                torus_delta(player.position, asteroid.position),
                torus_delta(player_ahead, ahead),
            ]
        })
        .map(|delta| Threat {
            delta,
            distance_px: to_pixels(delta, viewport).length(),
        })
        .min_by(|a, b| a.distance_px.total_cmp(&b.distance_px))
}

fn steer_axis(current: f64, desired: f64, increase: Key, decrease: Key) -> Option<Key> {
    let desired = desired.clamp(-PLAYER_MAX_SPEED, PLAYER_MAX_SPEED);
    if desired - current > THRUST_STEP / 2.0 {
        Some(increase)
    } else if current - desired > THRUST_STEP / 2.0 {
        Some(decrease)
    } else {
        None
    }
}

fn target_in_sights(world: &World, viewport: Viewport) -> bool {
    let player = world.player();
    let heading = player.velocity.heading();
    let range_px = viewport.scale() * FIRE_RANGE_SCALE;

    world.asteroids().iter().any(|asteroid| {
        let delta = torus_delta(player.position, asteroid.position);
        let pixels = to_pixels(delta, viewport);
        if pixels.length() > range_px {
            return false;
        }
        // Shots travel in field space, so aim with the field-space angle.
        let bearing = delta.heading();
        let mut offset = (bearing - heading).abs();
        if offset > core::f64::consts::PI {
            offset = core::f64::consts::TAU - offset;
        }
        offset < FIRE_CONE_RAD
    })
}

impl AutopilotBot for EvaderBot {
    fn id(&self) -> &'static str {
        "evader"
    }

    fn description(&self) -> &'static str {
        "thrusts away from the nearest asteroid and fires when one is ahead"
    }

    fn reset(&mut self, _seed: u32) {
        self.last_fire_frame = None;
    }

    fn next_keys(&mut self, world: &World, viewport: Viewport) -> Vec<Key> {
        let mut keys = Vec::new();
        let velocity = world.player().velocity;

        if let Some(threat) = nearest_threat(world, viewport) {
            if threat.distance_px < viewport.scale() * DANGER_RADIUS_SCALE {
                let length = threat.delta.length();
                let away = if length > 0.0 {
                    threat.delta * (-ESCAPE_SPEED / length)
                } else {
                    Vec2::new(-ESCAPE_SPEED, 0.0)
                };
                keys.extend(steer_axis(velocity.x, away.x, Key::Right, Key::Left));
                keys.extend(steer_axis(velocity.y, away.y, Key::Down, Key::Up));
            }
        }

        let frame = world.frame_count();
        let ready = self
            .last_fire_frame
            .map_or(true, |last| frame.saturating_sub(last) >= FIRE_INTERVAL_FRAMES);
        if ready && target_in_sights(world, viewport) {
            self.last_fire_frame = Some(frame);
            keys.push(Key::Fire);
        }

        keys
    }
}
