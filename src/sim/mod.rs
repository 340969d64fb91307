//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (stored in `GameState`)
//! - Stable iteration order (collection order)
//! - No rendering, audio or platform dependencies

pub mod barrier;
pub mod bonus;
pub mod collision;
pub mod entity;
pub mod formation;
pub mod player;
pub mod projectile;
pub mod score;
pub mod state;
pub mod tick;

pub use barrier::{Barrier, BarrierCell, ErosionRadii};
pub use bonus::BonusTarget;
pub use collision::{Collidables, CollisionReport, EnemyHit, resolve};
pub use entity::{Body, Entity, Rect};
pub use formation::{Enemy, EnemyKind, Formation, Step};
pub use player::{ActiveEffects, Player, PowerUpDrop, PowerUpKind, TimedEffect};
pub use projectile::{Owner, Projectile};
pub use score::ScoreTracker;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, roll_bonus_delay, start_game, tick};
