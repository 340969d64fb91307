//! Enemy formation controller
//!
//! The formation owns every enemy and moves them in lockstep: on each step
//! either every live enemy slides sideways or every live enemy drops and the
//! direction flips. The step interval shrinks superlinearly as enemies die,
//! like the arcade hardware speeding up with fewer sprites to draw.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use super::projectile::Projectile;
use super::state::GameEvent;
use crate::consts::*;
use crate::tuning::Tuning;

/// Enemy rank (decides sprite and point value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Top,
    Middle,
    Bottom,
}

impl EnemyKind {
    /// Kind for a formation row: row 0 top, rows 1-2 middle, the rest bottom
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => EnemyKind::Top,
            1 | 2 => EnemyKind::Middle,
            _ => EnemyKind::Bottom,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            EnemyKind::Top => 30,
            EnemyKind::Middle => 20,
            EnemyKind::Bottom => 10,
        }
    }

    pub fn size(&self) -> Vec2 {
        let (w, h) = match self {
            EnemyKind::Top => TOP_ENEMY_SIZE,
            EnemyKind::Middle => MIDDLE_ENEMY_SIZE,
            EnemyKind::Bottom => BOTTOM_ENEMY_SIZE,
        };
        Vec2::new(w, h)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    /// Current sprite frame (0 or 1)
    pub frame: u8,
    frame_timer: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, kind: EnemyKind) -> Self {
        Self {
            body: Body::new(pos, kind.size()),
            kind,
            frame: 0,
            frame_timer: 0.0,
        }
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    /// Advance the two-frame animation (independent of the step clock)
    fn animate(&mut self, dt: f32, interval: f32) {
        self.frame_timer += dt;
        if self.frame_timer >= interval {
            self.frame = (self.frame + 1) % 2;
            self.frame_timer = 0.0;
        }
    }
}

impl Entity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Outcome of a single lockstep step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Slide,
    Drop,
}

/// The synchronized enemy grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub enemies: Vec<Enemy>,
    /// Horizontal direction, +1.0 (right) or -1.0 (left)
    pub direction: f32,
    /// Number of enemies at creation (fixed for the level)
    pub initial_count: usize,
    step_timer: f32,
    base_step_interval: f32,
    min_step_interval: f32,
    acceleration_exponent: f32,
    step_size: f32,
    drop_distance: f32,
    spacing_x: f32,
    fire_timer: f32,
    fire_interval: f32,
    projectile_speed: f32,
    animation_interval: f32,
    /// Position in the four-note bass cycle
    bass_note: u8,
}

impl Formation {
    /// Build a fresh grid for `level`, centered horizontally
    pub fn new(level: u32, tuning: &Tuning) -> Self {
        let rows = tuning.enemy_rows;
        let cols = tuning.enemy_cols;
        let formation_width = cols as f32 * tuning.enemy_spacing_x;
        let start_x = (CANVAS_WIDTH - formation_width) / 2.0;

        let mut enemies = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let pos = Vec2::new(
                    start_x + col as f32 * tuning.enemy_spacing_x,
                    tuning.enemy_start_y + row as f32 * tuning.enemy_spacing_y,
                );
                enemies.push(Enemy::new(pos, EnemyKind::for_row(row)));
            }
        }

        let initial_count = enemies.len();
        log::debug!("Created formation with {} enemies (level {})", initial_count, level);

        Self {
            enemies,
            direction: 1.0,
            initial_count,
            step_timer: 0.0,
            base_step_interval: tuning.step_interval_for_level(level),
            min_step_interval: tuning.enemy_min_step_interval,
            acceleration_exponent: tuning.enemy_acceleration_exponent,
            step_size: tuning.enemy_step_size,
            drop_distance: tuning.enemy_drop_distance,
            spacing_x: tuning.enemy_spacing_x,
            fire_timer: 0.0,
            fire_interval: tuning.fire_interval_for_level(level),
            projectile_speed: tuning.enemy_projectile_speed,
            animation_interval: tuning.enemy_animation_interval,
            bass_note: 0,
        }
    }

    pub fn alive(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.body.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn all_destroyed(&self) -> bool {
        self.alive().next().is_none()
    }

    pub fn base_step_interval(&self) -> f32 {
        self.base_step_interval
    }

    pub fn min_step_interval(&self) -> f32 {
        self.min_step_interval
    }

    pub fn step_size(&self) -> f32 {
        self.step_size
    }

    pub fn drop_distance(&self) -> f32 {
        self.drop_distance
    }

    /// Lowest point reached by any live enemy (largest bottom edge)
    pub fn lowest_edge(&self) -> Option<f32> {
        self.alive().map(|e| e.body.bounds().bottom()).reduce(f32::max)
    }

    /// Step interval for the current survivor count
    ///
    /// Equals the base interval with a full grid and the floor with a single
    /// survivor; in between the survivor ratio is raised to the acceleration
    /// exponent so the last few enemies speed up sharply.
    pub fn current_step_interval(&self) -> f32 {
        let alive = self.alive_count();
        if self.initial_count <= 1 || alive >= self.initial_count {
            return self.base_step_interval;
        }
        if alive <= 1 {
            return self.min_step_interval;
        }
        let ratio = (alive - 1) as f32 / (self.initial_count - 1) as f32;
        let speed = ratio.powf(self.acceleration_exponent);
        self.min_step_interval + (self.base_step_interval - self.min_step_interval) * speed
    }

    /// Advance timers; may step, play a bass note and fire one projectile
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        rng: &mut R,
        projectiles: &mut Vec<Projectile>,
        events: &mut Vec<GameEvent>,
    ) {
        if self.all_destroyed() {
            return;
        }

        let interval = self.current_step_interval();
        self.step_timer += dt;
        if self.step_timer >= interval {
            self.step_timer = 0.0;
            self.step();
            events.push(GameEvent::BassStep {
                index: self.bass_note,
            });
            self.bass_note = (self.bass_note + 1) % 4;
        }

        let animation_interval = self.animation_interval;
        for enemy in self.enemies.iter_mut().filter(|e| e.body.alive) {
            enemy.animate(dt, animation_interval);
        }

        self.fire_timer += dt;
        if self.fire_timer >= self.fire_interval {
            self.fire_timer = 0.0;
            if let Some(projectile) = self.fire(rng) {
                projectiles.push(projectile);
            }
        }
    }

    /// Perform one lockstep movement: everyone slides or everyone drops
    pub fn step(&mut self) -> Step {
        let dx = self.direction * self.step_size;
        let hits_edge = self.alive().any(|e| {
            let next_x = e.body.pos.x + dx;
            if self.direction > 0.0 {
                next_x + e.body.size.x >= CANVAS_WIDTH
            } else {
                next_x <= 0.0
            }
        });

        if hits_edge {
            self.direction = -self.direction;
            let drop = self.drop_distance;
            for enemy in self.enemies.iter_mut().filter(|e| e.body.alive) {
                enemy.body.pos.y += drop;
            }
            Step::Drop
        } else {
            for enemy in self.enemies.iter_mut().filter(|e| e.body.alive) {
                enemy.body.pos.x += dx;
            }
            Step::Slide
        }
    }

    /// Front-line shooters: the lowest live enemy of every column
    ///
    /// Columns are derived from x / spacing so they track the grid as it moves.
    /// Returned in column order.
    pub fn front_line(&self) -> Vec<usize> {
        let mut columns: BTreeMap<i32, usize> = BTreeMap::new();
        for (idx, enemy) in self.enemies.iter().enumerate() {
            if !enemy.body.alive {
                continue;
            }
            let col = (enemy.body.pos.x / self.spacing_x).floor() as i32;
            match columns.get(&col) {
                Some(&best) if self.enemies[best].body.pos.y >= enemy.body.pos.y => {}
                _ => {
                    columns.insert(col, idx);
                }
            }
        }
        columns.into_values().collect()
    }

    /// Pick a uniformly random front-line enemy and fire from below it
    pub fn fire<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Projectile> {
        let shooters = self.front_line();
        if shooters.is_empty() {
            return None;
        }
        let shooter = &self.enemies[shooters[rng.random_range(0..shooters.len())]];
        Some(Projectile::from_enemy(&shooter.body, self.projectile_speed))
    }
}
