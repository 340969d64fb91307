//! Data-driven game balance
//!
//! Every number a designer might want to tweak lives here. Defaults reproduce
//! the arcade feel; a JSON file can override any subset of fields.

use serde::{Deserialize, Serialize};

/// Gameplay tuning values (times in seconds, distances in pixels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Formation ===
    pub enemy_rows: usize,
    pub enemy_cols: usize,
    pub enemy_spacing_x: f32,
    pub enemy_spacing_y: f32,
    pub enemy_start_y: f32,
    /// Horizontal distance of one lockstep slide
    pub enemy_step_size: f32,
    /// Vertical distance of one lockstep drop
    pub enemy_drop_distance: f32,
    /// Step interval with a full formation
    pub enemy_step_interval: f32,
    /// Step interval floor, reached with a single survivor
    pub enemy_min_step_interval: f32,
    /// Exponent applied to the alive ratio (superlinear acceleration)
    pub enemy_acceleration_exponent: f32,
    pub enemy_fire_interval: f32,
    /// Per-level divisor applied to the base step interval
    pub level_speed_increase: f32,
    /// Per-level multiplier applied to the fire interval
    pub level_fire_rate_increase: f32,
    /// Formation loses instantly once an enemy's lower edge is this close to the bottom
    pub enemy_bottom_margin: f32,
    /// Frame toggle period of the two-frame enemy animation
    pub enemy_animation_interval: f32,

    // === Player ===
    pub player_speed: f32,
    pub player_fire_cooldown: f32,
    pub player_lives: u32,
    pub invulnerable_duration: f32,
    pub death_animation_duration: f32,
    pub respawn_delay: f32,
    /// Frame toggle period of the explosion animation
    pub death_frame_interval: f32,

    // === Projectiles ===
    pub player_projectile_speed: f32,
    pub enemy_projectile_speed: f32,
    /// Horizontal velocity of the outer spread-shot projectiles
    pub spread_vx: f32,

    // === Bonus target ===
    pub bonus_spawn_min: f32,
    pub bonus_spawn_max: f32,
    pub bonus_speed: f32,
    pub bonus_values: Vec<u32>,
    pub bonus_score_display: f32,

    // === Scoring ===
    pub combo_increment: f64,
    pub combo_max: f64,
    pub combo_timeout: f32,

    // === Barriers ===
    /// Nearest-cell distance that counts as a projectile hit
    pub barrier_hit_radius: f32,
    pub projectile_erosion_radius: f32,
    pub enemy_erosion_radius: f32,

    // === Power-ups ===
    pub powerup_drop_chance: f64,
    pub powerup_duration: f32,
    pub powerup_fall_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            enemy_rows: 5,
            enemy_cols: 11,
            enemy_spacing_x: 40.0,
            enemy_spacing_y: 32.0,
            enemy_start_y: 100.0,
            enemy_step_size: 8.0,
            enemy_drop_distance: 16.0,
            enemy_step_interval: 0.9,
            enemy_min_step_interval: 0.05,
            enemy_acceleration_exponent: 1.5,
            enemy_fire_interval: 2.0,
            level_speed_increase: 1.2,
            level_fire_rate_increase: 0.9,
            enemy_bottom_margin: 50.0,
            enemy_animation_interval: 0.5,

            player_speed: 200.0,
            player_fire_cooldown: 0.5,
            player_lives: 3,
            invulnerable_duration: 2.0,
            death_animation_duration: 1.0,
            respawn_delay: 1.5,
            death_frame_interval: 0.2,

            player_projectile_speed: 400.0,
            enemy_projectile_speed: 200.0,
            spread_vx: 60.0,

            bonus_spawn_min: 25.0,
            bonus_spawn_max: 35.0,
            bonus_speed: 100.0,
            bonus_values: vec![50, 100, 150, 200, 250, 300],
            bonus_score_display: 1.0,

            combo_increment: 0.1,
            combo_max: 3.0,
            combo_timeout: 2.0,

            barrier_hit_radius: 6.0,
            projectile_erosion_radius: 12.0,
            enemy_erosion_radius: 20.0,

            powerup_drop_chance: 0.15,
            powerup_duration: 10.0,
            powerup_fall_speed: 100.0,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Base step interval for a level (level 1 = configured value)
    pub fn step_interval_for_level(&self, level: u32) -> f32 {
        let exp = level.saturating_sub(1) as i32;
        (self.enemy_step_interval / self.level_speed_increase.powi(exp))
            .max(self.enemy_min_step_interval)
    }

    /// Fire interval for a level (level 1 = configured value)
    pub fn fire_interval_for_level(&self, level: u32) -> f32 {
        let exp = level.saturating_sub(1) as i32;
        self.enemy_fire_interval * self.level_fire_rate_increase.powi(exp)
    }

    /// Total time spent in the dying phase before respawn or game over
    pub fn dying_duration(&self) -> f32 {
        self.death_animation_duration + self.respawn_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "enemy_rows": 2, "combo_max": 2.0 }"#).unwrap();
        assert_eq!(tuning.enemy_rows, 2);
        assert_eq!(tuning.combo_max, 2.0);
        assert_eq!(tuning.enemy_cols, 11);
        assert_eq!(tuning.bonus_values, vec![50, 100, 150, 200, 250, 300]);
    }

    #[test]
    fn test_level_scaling() {
        let tuning = Tuning::default();
        assert_eq!(tuning.step_interval_for_level(1), tuning.enemy_step_interval);
        assert_eq!(tuning.fire_interval_for_level(1), tuning.enemy_fire_interval);
        assert!(tuning.step_interval_for_level(2) < tuning.step_interval_for_level(1));
        assert!(tuning.fire_interval_for_level(3) < tuning.fire_interval_for_level(2));
        // Floors at the minimum interval
        assert_eq!(
            tuning.step_interval_for_level(200),
            tuning.enemy_min_step_interval
        );
    }
}
