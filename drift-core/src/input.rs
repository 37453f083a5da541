use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Right,
    Left,
    Up,
    Down,
    Fire,
}

impl Key {
    /// Maps a host key identifier to a game key. Unknown identifiers map to
    /// `None` and are ignored by callers.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            "ArrowRight" | "d" => Some(Self::Right),
            "ArrowLeft" | "a" => Some(Self::Left),
            "ArrowUp" | "w" => Some(Self::Up),
            "ArrowDown" | "s" => Some(Self::Down),
            " " => Some(Self::Fire),
            _ => None,
        }
    }

    /// Canonical host identifier, used when bots emit key presses.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Right => "ArrowRight",
            Self::Left => "ArrowLeft",
            Self::Up => "ArrowUp",
            Self::Down => "ArrowDown",
            Self::Fire => " ",
        }
    }

    pub fn is_directional(self) -> bool {
        !matches!(self, Self::Fire)
    }
}

/// Key presses queued between ticks, drained on the render thread.
#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<Key>,
    ignored: u32,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw key-down identifier. Returns whether it was recognized.
    pub fn push_identifier(&mut self, identifier: &str) -> bool {
        match Key::from_identifier(identifier) {
            Some(key) => {
                self.pending.push_back(key);
                true
            }
            None => {
                self.ignored += 1;
                false
            }
        }
    }

    pub fn push(&mut self, key: Key) {
        self.pending.push_back(key);
    }

    /// Drops every pending key without applying it.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of identifiers dropped because they did not map to a key.
    pub fn ignored(&self) -> u32 {
        self.ignored
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Key> + '_ {
        self.pending.drain(..)
    }
}
