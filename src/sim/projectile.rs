//! Straight-line projectiles fired by the player and the formation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use crate::consts::*;

/// Who fired a projectile (decides what it can damage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub owner: Owner,
}

impl Projectile {
    /// Create a projectile whose top-left corner sits at `pos`
    pub fn new(pos: Vec2, vel: Vec2, owner: Owner) -> Self {
        let mut body = Body::new(pos, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT));
        body.vel = vel;
        Self { body, owner }
    }

    /// Player shot leaving the nose of a ship whose top-left is `ship_pos`
    pub fn from_player(ship_pos: Vec2, ship_width: f32, vel: Vec2) -> Self {
        let pos = Vec2::new(ship_pos.x + ship_width / 2.0 - PROJECTILE_WIDTH / 2.0, ship_pos.y);
        Self::new(pos, vel, Owner::Player)
    }

    /// Enemy shot dropping from just below the shooter
    pub fn from_enemy(shooter: &Body, speed: f32) -> Self {
        let pos = Vec2::new(
            shooter.pos.x + shooter.size.x / 2.0 - PROJECTILE_WIDTH / 2.0,
            shooter.pos.y + shooter.size.y,
        );
        Self::new(pos, Vec2::new(0.0, speed), Owner::Enemy)
    }

    /// Move and despawn once fully outside the play field
    pub fn update(&mut self, dt: f32) {
        if !self.body.alive {
            return;
        }
        self.body.integrate(dt);
        if self.is_off_screen() {
            self.body.alive = false;
        }
    }

    pub fn is_off_screen(&self) -> bool {
        let b = self.body.bounds();
        b.bottom() < 0.0 || b.y > CANVAS_HEIGHT || b.right() < 0.0 || b.x > CANVAS_WIDTH
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}
