use core::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` radians.
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// True for both `+0.0` and `-0.0` on each axis.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// `atan2(y, x)` with the origin pinned to angle 0.
    ///
    /// IEEE `atan2` returns `±π` or `±0` at the origin depending on the signs of
    /// the zeros; a zero vector always reports 0 here.
    pub fn heading(self) -> f64 {
        if self.is_zero() {
            0.0
        } else {
            self.y.atan2(self.x)
        }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_heading_is_pinned_for_signed_zeros() {
        assert_eq!(Vec2::new(0.0, 0.0).heading(), 0.0);
        assert_eq!(Vec2::new(-0.0, 0.0).heading(), 0.0);
        assert_eq!(Vec2::new(-0.0, -0.0).heading(), 0.0);
    }

    #[test]
    fn heading_follows_atan2_away_from_origin() {
        let heading = Vec2::new(0.0, 1.0).heading();
        assert!((heading - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
        let heading = Vec2::new(-1.0, 0.0).heading();
        assert!((heading - core::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn distance_is_euclidean() {
        let d = Vec2::new(0.0, 0.0).distance(Vec2::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }
}
