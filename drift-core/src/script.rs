use serde::{Deserialize, Serialize};

use crate::error::ScriptError;
use crate::input::InputQueue;

/// A key press delivered before tick `frame` (0-based).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedKey {
    pub frame: u32,
    pub key: String,
}

/// Recorded key-down events. Keys are kept as raw host identifiers, so a
/// script may carry keys the game ignores.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyScript {
    #[serde(default)]
    pub events: Vec<ScriptedKey>,
}

impl KeyScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: u32, key: impl Into<String>) {
        self.events.push(ScriptedKey {
            frame,
            key: key.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn validate(&self, max_frames: u32) -> Result<(), ScriptError> {
        let mut previous = 0u32;
        for (index, event) in self.events.iter().enumerate() {
            if event.frame < previous {
                return Err(ScriptError::FrameOutOfOrder {
                    index,
                    frame: event.frame,
                    previous,
                });
            }
            if event.frame >= max_frames {
                return Err(ScriptError::FrameOutOfRange {
                    index,
                    frame: event.frame,
                    max_frames,
                });
            }
            previous = event.frame;
        }
        Ok(())
    }

    pub fn cursor(&self) -> ScriptCursor<'_> {
        ScriptCursor {
            events: &self.events,
            next: 0,
        }
    }
}

/// Walks a validated script in frame order.
#[derive(Clone, Debug)]
pub struct ScriptCursor<'a> {
    events: &'a [ScriptedKey],
    next: usize,
}

impl ScriptCursor<'_> {
    /// Queues every event scheduled for `frame`. Returns how many were
    /// recognized by the input queue.
    pub fn feed(&mut self, frame: u32, queue: &mut InputQueue) -> usize {
        let mut recognized = 0;
        while let Some(event) = self.events.get(self.next) {
            if event.frame > frame {
                break;
            }
            if event.frame == frame && queue.push_identifier(&event.key) {
                recognized += 1;
            }
            self.next += 1;
        }
        recognized
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.events.len()
    }
}
