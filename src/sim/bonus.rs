//! Mystery flyer crossing the top of the screen

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusTarget {
    pub body: Body,
    /// +1.0 moves left-to-right, -1.0 right-to-left
    pub direction: f32,
    /// Point value, drawn once at spawn
    pub points: u32,
    /// Points are shown in place of the sprite for a moment after a hit
    pub show_score: bool,
    score_timer: f32,
    score_display: f32,
}

impl BonusTarget {
    pub fn new(direction: f32, points: u32, speed: f32, score_display: f32) -> Self {
        let x = if direction > 0.0 {
            BONUS_SPAWN_LEFT_X
        } else {
            BONUS_SPAWN_RIGHT_X
        };
        let mut body = Body::new(Vec2::new(x, BONUS_Y), Vec2::new(BONUS_WIDTH, BONUS_HEIGHT));
        body.vel = Vec2::new(speed * direction, 0.0);
        Self {
            body,
            direction,
            points,
            show_score: false,
            score_timer: 0.0,
            score_display,
        }
    }

    /// Random side and point value
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        values: &[u32],
        speed: f32,
        score_display: f32,
    ) -> Self {
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let points = values.choose(rng).copied().unwrap_or(0);
        Self::new(direction, points, speed, score_display)
    }

    pub fn update(&mut self, dt: f32) {
        if !self.body.alive {
            if self.show_score {
                self.score_timer += dt;
                if self.score_timer >= self.score_display {
                    self.show_score = false;
                }
            }
            return;
        }

        self.body.integrate(dt);

        let gone = if self.direction > 0.0 {
            self.body.pos.x > CANVAS_WIDTH
        } else {
            self.body.bounds().right() < 0.0
        };
        if gone {
            self.body.alive = false;
        }
    }

    /// Shoot it down; returns the points it was worth
    pub fn hit(&mut self) -> u32 {
        if self.body.alive {
            self.body.alive = false;
            self.show_score = true;
            self.score_timer = 0.0;
        }
        self.points
    }

    /// Off-screen or shot down, with the score display finished
    pub fn is_fully_done(&self) -> bool {
        !self.body.alive && !self.show_score
    }
}

impl Entity for BonusTarget {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}
