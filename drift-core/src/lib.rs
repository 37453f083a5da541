pub mod collision;
pub mod constants;
pub mod error;
pub mod frame;
pub mod input;
pub mod render;
pub mod replay;
pub mod rng;
pub mod script;
pub mod sim;
pub mod vector;

pub use error::{ConfigError, ReplayError, ScriptError, WorldRule};
pub use frame::{FrameReport, FrameStepper, LoopState, ManualScheduler, Scheduler};
pub use render::{RecordingSurface, Surface, Viewport};
pub use replay::{replay, replay_strict, replay_with_checkpoints, ReplayConfig, ReplayResult};
pub use script::KeyScript;
pub use sim::World;
pub use vector::Vec2;
