use core::f64::consts::FRAC_PI_2;

use crate::constants::{ASTEROID_RADIUS_DIVISOR, SHIP_NOSE_LENGTH, SHIP_WING_LENGTH};
use crate::render::Viewport;
use crate::sim::{Player, World};
use crate::vector::Vec2;

/// Heading of the drawn ship in surface space.
///
/// Velocity components are stretched by the viewport so the nose points where
/// the ship actually travels on a non-square surface. A resting ship keeps its
/// last nonzero direction.
pub fn ship_heading(player: &Player, viewport: Viewport) -> f64 {
    let direction = if player.velocity.is_zero() {
        player.facing
    } else {
        player.velocity
    };
    Vec2::new(direction.x * viewport.width, direction.y * viewport.height).heading()
}

/// Nose, then the two wing tips, in surface pixels.
pub fn ship_triangle(player: &Player, viewport: Viewport) -> [Vec2; 3] {
    let scale = viewport.scale();
    let center = viewport.to_surface(player.position);
    let angle = ship_heading(player, viewport);

    [
        center + Vec2::from_angle(angle) * (SHIP_NOSE_LENGTH * scale),
        center + Vec2::from_angle(angle + FRAC_PI_2) * (SHIP_WING_LENGTH * scale),
        center + Vec2::from_angle(angle - FRAC_PI_2) * (SHIP_WING_LENGTH * scale),
    ]
}

/// True iff some vertex lies strictly closer than `scale / 18` to some
/// asteroid centre.
pub fn is_collision(vertices: &[Vec2], asteroid_centers: &[Vec2], scale: f64) -> bool {
    let radius = scale / ASTEROID_RADIUS_DIVISOR;
    vertices.iter().any(|vertex| {
        asteroid_centers
            .iter()
            .any(|center| vertex.distance(*center) < radius)
    })
}

/// Tests the ship against the current asteroid positions.
pub fn detect(world: &World, viewport: Viewport) -> bool {
    let vertices = ship_triangle(world.player(), viewport);
    let centers: Vec<Vec2> = world
        .asteroids()
        .iter()
        .map(|asteroid| viewport.to_surface(asteroid.position))
        .collect();
    is_collision(&vertices, &centers, viewport.scale())
}
