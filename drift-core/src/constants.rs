// Field geometry is normalized: both axes span [0, 1] regardless of the
// surface aspect ratio. Velocities are field units per second.

pub const ASTEROID_COUNT: usize = 10;
pub const STAR_COUNT: usize = 10;
pub const ASTEROID_MAX_SPOTS: f64 = 15.0;
/// Each asteroid velocity component is `unit / ASTEROID_SPEED_DIVISOR`.
pub const ASTEROID_SPEED_DIVISOR: f64 = 5.0;

pub const PLAYER_START_X: f64 = 0.5;
pub const PLAYER_START_Y: f64 = 0.5;
pub const PLAYER_START_VX: f64 = 0.01;
pub const PLAYER_START_VY: f64 = 0.0;

pub const THRUST_STEP: f64 = 0.01;
pub const PLAYER_MAX_SPEED: f64 = 0.2;

// Radii and offsets are divisors of the per-frame surface scale.
pub const STAR_RADIUS_DIVISOR: f64 = 150.0;
pub const SHOT_RADIUS_DIVISOR: f64 = 100.0;
pub const ASTEROID_RADIUS_DIVISOR: f64 = 18.0;
pub const SPOT_RADIUS_DIVISOR: f64 = 80.0;
pub const SPOT_SPREAD_DIVISOR: f64 = 15.0;
pub const SPOT_CENTER_DIVISOR: f64 = 30.0;

pub const SHIP_NOSE_LENGTH: f64 = 0.05;
pub const SHIP_WING_LENGTH: f64 = 0.02;

pub const SEED_DEFAULT: u32 = 0xDEAD_BEEF;
pub const FRAME_MS_DEFAULT: f64 = 1000.0 / 60.0;
pub const MAX_FRAMES_DEFAULT: u32 = 3_600;
pub const VIEWPORT_WIDTH_DEFAULT: f64 = 1280.0;
pub const VIEWPORT_HEIGHT_DEFAULT: f64 = 720.0;
