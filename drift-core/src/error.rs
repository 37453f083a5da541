use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldRule {
    PlayerBounds,
    PlayerSpeedClamp,
    ShotBounds,
    ShotGrowth,
    AsteroidCount,
    AsteroidBounds,
    StarCount,
}

impl fmt::Display for WorldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerBounds => write!(f, "PLAYER_BOUNDS"),
            Self::PlayerSpeedClamp => write!(f, "PLAYER_SPEED_CLAMP"),
            Self::ShotBounds => write!(f, "SHOT_BOUNDS"),
            Self::ShotGrowth => write!(f, "SHOT_GROWTH"),
            Self::AsteroidCount => write!(f, "ASTEROID_COUNT"),
            Self::AsteroidBounds => write!(f, "ASTEROID_BOUNDS"),
            Self::StarCount => write!(f, "STAR_COUNT"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScriptError {
    FrameOutOfOrder {
        index: usize,
        frame: u32,
        previous: u32,
    },
    FrameOutOfRange {
        index: usize,
        frame: u32,
        max_frames: u32,
    },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameOutOfOrder {
                index,
                frame,
                previous,
            } => write!(
                f,
                "script event {index} at frame {frame} precedes previous event at frame {previous}"
            ),
            Self::FrameOutOfRange {
                index,
                frame,
                max_frames,
            } => write!(
                f,
                "script event {index} at frame {frame} is past the last frame ({max_frames} frames)"
            ),
        }
    }
}

impl std::error::Error for ScriptError {}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    InvalidViewport { width: f64, height: f64 },
    InvalidFrameInterval { frame_ms: f64 },
    InvalidMaxFrames,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidViewport { width, height } => write!(
                f,
                "viewport must have positive finite dimensions, got {width}x{height}"
            ),
            Self::InvalidFrameInterval { frame_ms } => {
                write!(f, "frame interval must be positive and finite, got {frame_ms}ms")
            }
            Self::InvalidMaxFrames => write!(f, "max_frames must be > 0"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug, PartialEq)]
pub enum ReplayError {
    Config(ConfigError),
    Script(ScriptError),
    RuleViolation { frame: u32, rule: WorldRule },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid replay config: {err}"),
            Self::Script(err) => write!(f, "invalid key script: {err}"),
            Self::RuleViolation { frame, rule } => {
                write!(f, "rule violation at frame {frame}: {rule}")
            }
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Script(err) => Some(err),
            Self::RuleViolation { .. } => None,
        }
    }
}

impl From<ConfigError> for ReplayError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ScriptError> for ReplayError {
    fn from(err: ScriptError) -> Self {
        Self::Script(err)
    }
}
