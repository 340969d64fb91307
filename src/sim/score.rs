//! Score accumulation with a decaying combo multiplier

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTracker {
    pub score: u64,
    /// Best score seen so far (seeded from persistence)
    pub high_score: u64,
    /// Multiplier in [1.0, combo_max]
    pub combo: f64,
    /// Seconds left before the combo resets
    pub combo_timer: f32,
    combo_increment: f64,
    combo_max: f64,
    combo_timeout: f32,
}

impl ScoreTracker {
    pub fn new(high_score: u64, tuning: &Tuning) -> Self {
        Self {
            score: 0,
            high_score,
            combo: 1.0,
            combo_timer: 0.0,
            combo_increment: tuning.combo_increment,
            combo_max: tuning.combo_max,
            combo_timeout: tuning.combo_timeout,
        }
    }

    /// Start a new game (high score survives)
    pub fn reset(&mut self) {
        self.score = 0;
        self.reset_combo();
    }

    /// Award `points` times the current combo (floored), then grow the combo
    ///
    /// Returns the awarded amount.
    pub fn add_score(&mut self, points: u32) -> u64 {
        let awarded = (points as f64 * self.combo).floor() as u64;
        self.score += awarded;

        self.combo = (self.combo + self.combo_increment).min(self.combo_max);
        self.combo_timer = self.combo_timeout;
        debug_assert!((1.0..=self.combo_max).contains(&self.combo));

        if self.score > self.high_score {
            self.high_score = self.score;
        }
        awarded
    }

    /// Run the combo timeout; expiry is the only way the combo decays
    pub fn update(&mut self, dt: f32) {
        if self.combo_timer > 0.0 {
            self.combo_timer -= dt;
            if self.combo_timer <= 0.0 {
                self.reset_combo();
            }
        }
    }

    fn reset_combo(&mut self) {
        self.combo = 1.0;
        self.combo_timer = 0.0;
    }
}
