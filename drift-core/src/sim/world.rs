use super::*;
use crate::constants::{
    ASTEROID_MAX_SPOTS, ASTEROID_SPEED_DIVISOR, PLAYER_START_VX, PLAYER_START_VY, PLAYER_START_X,
    PLAYER_START_Y, THRUST_STEP,
};
use crate::input::{InputQueue, Key};
use crate::rng::SeededRng;

/// Complete simulation state. Hosts own one of these and hand it to the
/// frame stepper; nothing about the game lives outside it.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    player: Player,
    shots: Vec<Shot>,
    asteroids: Vec<Asteroid>,
    stars: Vec<Star>,
    frame_count: u32,
    shots_fired: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputOutcome {
    pub applied: u32,
    pub fired: bool,
    pub fire_dropped: u32,
}

impl World {
    pub fn generate(seed: u32) -> Self {
        let mut rng = SeededRng::new(seed);

        let asteroids = (0..ASTEROID_COUNT)
            .map(|_| {
                let position = Vec2::new(rng.next_unit(), rng.next_unit());
                let velocity = Vec2::new(
                    rng.next_unit() / ASTEROID_SPEED_DIVISOR,
                    rng.next_unit() / ASTEROID_SPEED_DIVISOR,
                );
                let spot_count = (rng.next_unit() * ASTEROID_MAX_SPOTS).round() as usize;
                let spots = (0..spot_count)
                    .map(|_| Vec2::new(rng.next_unit(), rng.next_unit()))
                    .collect();
                Asteroid {
                    position,
                    velocity,
                    spots,
                }
            })
            .collect();

        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                position: Vec2::new(rng.next_unit(), rng.next_unit()),
            })
            .collect();

        Self::from_parts(Self::spawn_player(), Vec::new(), asteroids, stars)
    }

    /// Assembles a world from hand-placed entities for tests and fixtures.
    ///
    /// Entity counts are not checked here; worlds that should satisfy the
    /// fixed asteroid and star counts go through [`World::validate_invariants`].
    pub fn from_parts(
        player: Player,
        shots: Vec<Shot>,
        asteroids: Vec<Asteroid>,
        stars: Vec<Star>,
    ) -> Self {
        Self {
            player,
            shots,
            asteroids,
            stars,
            frame_count: 0,
            shots_fired: 0,
        }
    }

    pub fn spawn_player() -> Player {
        let velocity = Vec2::new(PLAYER_START_VX, PLAYER_START_VY);
        Player {
            position: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            velocity,
            facing: velocity,
        }
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    #[inline]
    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    #[inline]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    #[inline]
    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    /// Applies one key press. Returns whether a shot was fired.
    pub fn apply_key(&mut self, key: Key) -> bool {
        let velocity = &mut self.player.velocity;
        match key {
            Key::Right => velocity.x = (velocity.x + THRUST_STEP).min(PLAYER_MAX_SPEED),
            Key::Left => velocity.x = (velocity.x - THRUST_STEP).max(-PLAYER_MAX_SPEED),
            // Screen y grows downward.
            Key::Up => velocity.y = (velocity.y - THRUST_STEP).max(-PLAYER_MAX_SPEED),
            Key::Down => velocity.y = (velocity.y + THRUST_STEP).min(PLAYER_MAX_SPEED),
            Key::Fire => {
                self.fire();
                return true;
            }
        }

        if !self.player.velocity.is_zero() {
            self.player.facing = self.player.velocity;
        }
        false
    }

    /// Drains every queued key. Only the first fire press of a drain is
    /// honoured, so one tick adds at most one shot.
    pub fn apply_input(&mut self, queue: &mut InputQueue) -> InputOutcome {
        let mut outcome = InputOutcome::default();
        let keys: Vec<Key> = queue.drain().collect();

        for key in keys {
            if key == Key::Fire && outcome.fired {
                outcome.fire_dropped += 1;
                tracing::trace!(frame = self.frame_count, "dropping repeated fire press");
                continue;
            }
            if self.apply_key(key) {
                outcome.fired = true;
            }
            outcome.applied += 1;
        }

        outcome
    }

    /// Spawns a unit-speed shot at the player's position, aimed along the
    /// current velocity. A resting ship fires rightward.
    pub fn fire(&mut self) {
        let direction = Vec2::from_angle(self.player.velocity.heading());
        self.shots.push(Shot {
            position: self.player.position,
            velocity: direction,
        });
        self.shots_fired += 1;
    }

    /// Moves every entity by `elapsed_s` seconds: stars, shots, asteroids,
    /// then the player. Shots leaving the field are dropped, survivors keep
    /// their order.
    pub fn advance(&mut self, elapsed_s: f64) -> AdvanceReport {
        self.frame_count += 1;

        let next_positions: Vec<Option<Vec2>> = self
            .shots
            .iter()
            .map(|shot| bounded_advance(shot.position, shot.velocity, elapsed_s))
            .collect();
        let before = self.shots.len();
        let mut next = next_positions.into_iter();
        self.shots.retain_mut(|shot| match next.next().flatten() {
            Some(position) => {
                shot.position = position;
                true
            }
            None => false,
        });
        let shots_culled = before - self.shots.len();
        if shots_culled > 0 {
            tracing::debug!(
                frame = self.frame_count,
                culled = shots_culled,
                remaining = self.shots.len(),
                "culled expired shots"
            );
        }

        for asteroid in &mut self.asteroids {
            asteroid.position = wrap_advance(asteroid.position, asteroid.velocity, elapsed_s);
        }

        self.player.position =
            wrap_advance(self.player.position, self.player.velocity, elapsed_s);

        AdvanceReport { shots_culled }
    }

    pub fn checkpoint(&self, halted: bool) -> Checkpoint {
        Checkpoint {
            frame_count: self.frame_count,
            player_x: self.player.position.x,
            player_y: self.player.position.y,
            player_vx: self.player.velocity.x,
            player_vy: self.player.velocity.y,
            shots: self.shots.len(),
            shots_fired: self.shots_fired,
            halted,
        }
    }

    pub fn validate_invariants(&self) -> Result<(), WorldRule> {
        validate_player(&self.player)?;
        validate_entities(&self.shots, &self.asteroids, &self.stars)
    }
}

#[cfg(test)]
mod tests;
