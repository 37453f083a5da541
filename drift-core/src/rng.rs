use serde::{Deserialize, Serialize};

use crate::constants::SEED_DEFAULT;

/// xorshift32 generator. Every random quantity in world generation is drawn
/// from here so a seed fully determines the starting field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { SEED_DEFAULT } else { seed },
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        self.state
    }

    /// Uniform draw in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.next()) / 4_294_967_296.0
    }
}
