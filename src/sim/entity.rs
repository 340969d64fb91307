//! Shared entity geometry
//!
//! Every movable object is an axis-aligned box with a position (top-left
//! corner), a velocity and an alive flag. Dead entities are never moved again
//! and get reaped by whoever owns them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width: size.x,
            height: size.y,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap test (touching edges do not overlap)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Position, velocity, size and liveness shared by all movers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub alive: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            alive: true,
        }
    }

    /// Integrate velocity over `dt` seconds
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Common capability of every simulated object
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn position(&self) -> Vec2 {
        self.body().pos
    }

    fn bounds(&self) -> Rect {
        self.body().bounds()
    }

    fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    fn is_alive(&self) -> bool {
        self.body().alive
    }

    fn destroy(&mut self) {
        self.body_mut().alive = false;
    }

    /// AABB overlap between two live entities
    fn collides_with(&self, other: &dyn Entity) -> bool {
        self.is_alive() && other.is_alive() && self.bounds().overlaps(&other.bounds())
    }
}
