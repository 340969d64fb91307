//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`, including the
//! seeded RNG, so a serialized state replays identically.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::barrier::{Barrier, ErosionRadii};
use super::bonus::BonusTarget;
use super::formation::{EnemyKind, Formation};
use super::player::{Player, PowerUpDrop, PowerUpKind};
use super::projectile::Projectile;
use super::score::ScoreTracker;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for fire
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Explosion + respawn delay; the formation keeps marching
    PlayerDying,
    /// Run ended, waiting for fire
    GameOver,
    /// Formation cleared; resolved into the next level within the same tick
    LevelComplete,
}

/// Things that happened during a tick, for audio and UI feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    /// Player projectile(s) fired
    Shoot,
    /// One note of the four-note march
    BassStep { index: u8 },
    EnemyKilled { kind: EnemyKind, awarded: u64 },
    BarrierHit,
    BonusSpawned { points: u32, direction: f32 },
    BonusHit { points: u32, awarded: u64 },
    /// Bonus target left the screen or was shot down; its loop should stop
    BonusGone,
    PowerUpCollected { kind: PowerUpKind },
    PlayerHit { lives: u32 },
    PlayerRespawned,
    LevelCleared { level: u32 },
    NewHighScore { score: u64 },
    GameOver { score: u64 },
}

/// Complete simulation context (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The only source of randomness in the simulation
    pub rng: Pcg32,
    /// Balance values in effect for this session
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulation clock in seconds
    pub clock: f64,
    pub player: Player,
    pub formation: Formation,
    pub barriers: Vec<Barrier>,
    pub projectiles: Vec<Projectile>,
    pub drops: Vec<PowerUpDrop>,
    /// At most one mystery flyer at a time
    pub bonus: Option<BonusTarget>,
    /// Seconds since the last bonus spawn
    pub bonus_timer: f32,
    /// Seconds until the next bonus spawn is due
    pub next_bonus_at: f32,
    pub score: ScoreTracker,
    /// Seconds spent in the current `PlayerDying` phase
    pub dying_timer: f32,
    /// Fire button state on the previous tick (edge detection)
    pub fire_was_pressed: bool,
    pub pause_was_pressed: bool,
    /// Events emitted by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state sitting at the title screen
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let next_bonus_at = super::tick::roll_bonus_delay(&mut rng, &tuning);
        Self {
            seed,
            rng,
            player: Player::new(tuning.player_lives),
            formation: Formation::new(1, &tuning),
            barriers: Barrier::row(Self::erosion_radii(&tuning)),
            score: ScoreTracker::new(high_score, &tuning),
            tuning,
            phase: GamePhase::Menu,
            level: 1,
            time_ticks: 0,
            clock: 0.0,
            projectiles: Vec::new(),
            drops: Vec::new(),
            bonus: None,
            bonus_timer: 0.0,
            next_bonus_at,
            dying_timer: 0.0,
            fire_was_pressed: false,
            pause_was_pressed: false,
            events: Vec::new(),
        }
    }

    pub fn erosion_radii(tuning: &Tuning) -> ErosionRadii {
        ErosionRadii {
            hit: tuning.barrier_hit_radius,
            projectile: tuning.projectile_erosion_radius,
            enemy: tuning.enemy_erosion_radius,
        }
    }

    /// True while the simulation advances entities
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::PlayerDying)
    }
}
