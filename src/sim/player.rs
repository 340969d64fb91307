//! Player ship, damage lifecycle and power-ups

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    RapidFire,
    SpreadShot,
    Shield,
    /// Applied instantly, never tracked as a timed effect
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::RapidFire,
        PowerUpKind::SpreadShot,
        PowerUpKind::Shield,
        PowerUpKind::ExtraLife,
    ];
}

/// A timed power-up flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimedEffect {
    pub active: bool,
    pub remaining: f32,
}

impl TimedEffect {
    fn activate(&mut self, duration: f32) {
        self.active = true;
        self.remaining = duration;
    }

    fn tick(&mut self, dt: f32) {
        if self.active {
            self.remaining -= dt;
            if self.remaining <= 0.0 {
                self.active = false;
                self.remaining = 0.0;
            }
        }
    }
}

/// Active power-up effects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub rapid_fire: TimedEffect,
    pub spread_shot: TimedEffect,
    pub shield: TimedEffect,
}

impl ActiveEffects {
    fn get_mut(&mut self, kind: PowerUpKind) -> Option<&mut TimedEffect> {
        match kind {
            PowerUpKind::RapidFire => Some(&mut self.rapid_fire),
            PowerUpKind::SpreadShot => Some(&mut self.spread_shot),
            PowerUpKind::Shield => Some(&mut self.shield),
            PowerUpKind::ExtraLife => None,
        }
    }

    fn tick(&mut self, dt: f32) {
        self.rapid_fire.tick(dt);
        self.spread_shot.tick(dt);
        self.shield.tick(dt);
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub lives: u32,
    pub invulnerable: bool,
    invulnerable_timer: f32,
    /// Playing the explosion; no movement, shooting or damage
    pub dying: bool,
    death_timer: f32,
    pub death_frame: u8,
    /// Simulation time of the last accepted shot (seconds)
    last_fire_time: Option<f64>,
    pub effects: ActiveEffects,
}

impl Player {
    pub fn new(lives: u32) -> Self {
        Self {
            body: Body::new(
                crate::player_spawn_point(),
                Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            ),
            lives,
            invulnerable: false,
            invulnerable_timer: 0.0,
            dying: false,
            death_timer: 0.0,
            death_frame: 0,
            last_fire_time: None,
            effects: ActiveEffects::default(),
        }
    }

    /// Steer (-1 left, 0 idle, +1 right), clamp to the field and run timers
    pub fn update(&mut self, dt: f32, steer: f32, speed: f32, death_frame_interval: f32) {
        if self.dying {
            self.death_timer += dt;
            if self.death_timer > death_frame_interval {
                self.death_frame = (self.death_frame + 1) % 2;
                self.death_timer = 0.0;
            }
            return;
        }
        if !self.body.alive {
            return;
        }

        self.body.vel.x = steer * speed;
        self.body.integrate(dt);
        self.body.pos.x = self.body.pos.x.clamp(0.0, CANVAS_WIDTH - self.body.size.x);

        if self.invulnerable {
            self.invulnerable_timer -= dt;
            if self.invulnerable_timer <= 0.0 {
                self.invulnerable = false;
                self.invulnerable_timer = 0.0;
            }
        }

        self.effects.tick(dt);
    }

    fn fire_cooldown(&self, base: f32) -> f64 {
        if self.effects.rapid_fire.active {
            base as f64 / 2.0
        } else {
            base as f64
        }
    }

    pub fn can_shoot(&self, now: f64, cooldown: f32) -> bool {
        if self.dying || !self.body.alive {
            return false;
        }
        match self.last_fire_time {
            Some(last) => now - last >= self.fire_cooldown(cooldown),
            None => true,
        }
    }

    /// Accept a shot if the cooldown allows it
    pub fn shoot(&mut self, now: f64, cooldown: f32) -> bool {
        if self.can_shoot(now, cooldown) {
            self.last_fire_time = Some(now);
            true
        } else {
            false
        }
    }

    /// Apply a hit; false when invulnerable, shielded or already dying
    pub fn take_damage(&mut self) -> bool {
        if self.invulnerable || self.effects.shield.active || self.dying || !self.body.alive {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.dying = true;
        self.death_timer = 0.0;
        self.death_frame = 0;
        true
    }

    /// End the explosion: respawn with invulnerability, or die for good
    pub fn finish_death(&mut self, invulnerable_duration: f32) {
        self.dying = false;
        if self.lives > 0 {
            self.body.pos = crate::player_spawn_point();
            self.body.vel = Vec2::ZERO;
            self.invulnerable = true;
            self.invulnerable_timer = invulnerable_duration;
        } else {
            self.body.alive = false;
        }
    }

    /// Instant, unconditional loss of every life (formation reached the ground)
    pub fn wipe_out(&mut self) {
        self.lives = 0;
        self.dying = false;
        self.body.alive = false;
    }

    pub fn apply_power_up(&mut self, kind: PowerUpKind, duration: f32) {
        match self.effects.get_mut(kind) {
            Some(effect) => effect.activate(duration),
            None => self.lives += 1,
        }
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// A power-up capsule falling from a destroyed enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpDrop {
    pub body: Body,
    pub kind: PowerUpKind,
}

impl PowerUpDrop {
    /// Capsule centered on `center`, kind chosen uniformly
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, center: Vec2, fall_speed: f32) -> Self {
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        let size = Vec2::splat(POWERUP_SIZE);
        let mut body = Body::new(center - size / 2.0, size);
        body.vel = Vec2::new(0.0, fall_speed);
        Self { body, kind }
    }

    pub fn update(&mut self, dt: f32) {
        if !self.body.alive {
            return;
        }
        self.body.integrate(dt);
        if self.body.pos.y > CANVAS_HEIGHT {
            self.body.alive = false;
        }
    }
}

impl Entity for PowerUpDrop {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}
