use serde::{Deserialize, Serialize};

use crate::collision::ship_triangle;
use crate::constants::{
    ASTEROID_RADIUS_DIVISOR, SHOT_RADIUS_DIVISOR, SPOT_CENTER_DIVISOR, SPOT_RADIUS_DIVISOR,
    SPOT_SPREAD_DIVISOR, STAR_RADIUS_DIVISOR,
};
use crate::sim::World;
use crate::vector::Vec2;

/// Host viewport in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `(h * w) / (h + w)`: the size every radius and offset is derived from.
    pub fn scale(&self) -> f64 {
        (self.height * self.width) / (self.height + self.width)
    }

    /// Maps a normalized field position onto the surface.
    pub fn to_surface(&self, position: Vec2) -> Vec2 {
        Vec2::new(position.x * self.width, position.y * self.height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
    Yellow,
    Gray,
    DarkGray,
    Red,
}

/// The 2D drawing context a host hands to the frame stepper.
pub trait Surface {
    /// Resizes the backing canvas. Called at the start of every tick.
    fn resize(&mut self, viewport: Viewport);
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn set_fill(&mut self, color: Color);
    fn fill_rect(&mut self, origin: Vec2, width: f64, height: f64);
    fn fill_circle(&mut self, center: Vec2, radius: f64);
    fn fill_polygon(&mut self, points: &[Vec2]);

    fn viewport(&self) -> Viewport {
        Viewport::new(self.width(), self.height())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Resize { width: f64, height: f64 },
    SetFill { color: Color },
    FillRect { origin: Vec2, width: f64, height: f64 },
    FillCircle { center: Vec2, radius: f64 },
    FillPolygon { points: Vec<Vec2> },
}

/// Records draw calls for headless hosts. The command list is reset on every
/// resize, so it always holds exactly the last frame.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    viewport: Option<Viewport>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        self.commands.clear();
        self.commands.push(DrawCommand::Resize {
            width: viewport.width,
            height: viewport.height,
        });
    }

    fn width(&self) -> f64 {
        self.viewport.map_or(0.0, |viewport| viewport.width)
    }

    fn height(&self) -> f64 {
        self.viewport.map_or(0.0, |viewport| viewport.height)
    }

    fn set_fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFill { color });
    }

    fn fill_rect(&mut self, origin: Vec2, width: f64, height: f64) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64) {
        self.commands.push(DrawCommand::FillCircle { center, radius });
    }

    fn fill_polygon(&mut self, points: &[Vec2]) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
        });
    }
}

/// Tracks the viewport and discards every draw call.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface {
    width: f64,
    height: f64,
}

impl Surface for NullSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.width = viewport.width;
        self.height = viewport.height;
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_fill(&mut self, _color: Color) {}

    fn fill_rect(&mut self, _origin: Vec2, _width: f64, _height: f64) {}

    fn fill_circle(&mut self, _center: Vec2, _radius: f64) {}

    fn fill_polygon(&mut self, _points: &[Vec2]) {}
}

pub fn clear(surface: &mut dyn Surface) {
    let (width, height) = (surface.width(), surface.height());
    surface.set_fill(Color::Black);
    surface.fill_rect(Vec2::ZERO, width, height);
}

/// Draws one frame back to front: stars, shots, asteroids, player.
pub fn draw_world(world: &World, surface: &mut dyn Surface) {
    let viewport = surface.viewport();
    let scale = viewport.scale();

    draw_stars(world, surface, viewport, scale);
    draw_shots(world, surface, viewport, scale);
    draw_asteroids(world, surface, viewport, scale);
    draw_player(world, surface, viewport);
}

fn draw_stars(world: &World, surface: &mut dyn Surface, viewport: Viewport, scale: f64) {
    surface.set_fill(Color::Yellow);
    for star in world.stars() {
        surface.fill_circle(
            viewport.to_surface(star.position),
            scale / STAR_RADIUS_DIVISOR,
        );
    }
}

fn draw_shots(world: &World, surface: &mut dyn Surface, viewport: Viewport, scale: f64) {
    surface.set_fill(Color::White);
    for shot in world.shots() {
        surface.fill_circle(
            viewport.to_surface(shot.position),
            scale / SHOT_RADIUS_DIVISOR,
        );
    }
}

fn draw_asteroids(world: &World, surface: &mut dyn Surface, viewport: Viewport, scale: f64) {
    for asteroid in world.asteroids() {
        let center = viewport.to_surface(asteroid.position);
        surface.set_fill(Color::Gray);
        surface.fill_circle(center, scale / ASTEROID_RADIUS_DIVISOR);

        surface.set_fill(Color::DarkGray);
        for spot in &asteroid.spots {
            surface.fill_circle(spot_center(center, *spot, scale), scale / SPOT_RADIUS_DIVISOR);
        }
    }
}

fn draw_player(world: &World, surface: &mut dyn Surface, viewport: Viewport) {
    surface.set_fill(Color::Red);
    surface.fill_polygon(&ship_triangle(world.player(), viewport));
}

#[inline]
pub fn spot_center(asteroid_center: Vec2, spot: Vec2, scale: f64) -> Vec2 {
    let offset = scale / SPOT_CENTER_DIVISOR;
    Vec2::new(
        asteroid_center.x + (spot.x * scale) / SPOT_SPREAD_DIVISOR - offset,
        asteroid_center.y + (spot.y * scale) / SPOT_SPREAD_DIVISOR - offset,
    )
}
