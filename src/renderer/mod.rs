//! Rendering module
//!
//! Rendering is a read-only pass: a `Frame` is captured from the simulation
//! state once per displayed frame and handed to a `Renderer`. Backends never
//! see (or mutate) `GameState` directly.

pub mod ascii;

pub use ascii::AsciiRenderer;

use serde::Serialize;

use crate::sim::{
    ActiveEffects, EnemyKind, Entity, GamePhase, GameState, Owner, PowerUpKind, Rect,
};

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    Enemy(EnemyKind),
    Player,
    /// Ship explosion; the frame alternates while dying
    PlayerExplosion,
    Projectile(Owner),
    BarrierCell,
    Bonus,
    /// Points shown where the bonus target was shot down
    BonusScore(u32),
    PowerUp(PowerUpKind),
}

impl SpriteKind {
    /// Flat RGBA color for this sprite
    pub fn color(&self) -> [f32; 4] {
        match self {
            SpriteKind::Enemy(EnemyKind::Top) => [1.0, 0.3, 0.9, 1.0],
            SpriteKind::Enemy(EnemyKind::Middle) => [0.3, 0.9, 1.0, 1.0],
            SpriteKind::Enemy(EnemyKind::Bottom) => [0.4, 1.0, 0.4, 1.0],
            SpriteKind::Player => [0.2, 1.0, 0.2, 1.0],
            SpriteKind::PlayerExplosion => [1.0, 0.6, 0.1, 1.0],
            SpriteKind::Projectile(Owner::Player) => [1.0, 1.0, 1.0, 1.0],
            SpriteKind::Projectile(Owner::Enemy) => [1.0, 0.3, 0.3, 1.0],
            SpriteKind::BarrierCell => [0.2, 0.9, 0.2, 1.0],
            SpriteKind::Bonus => [1.0, 0.1, 0.1, 1.0],
            SpriteKind::BonusScore(_) => [1.0, 1.0, 1.0, 1.0],
            SpriteKind::PowerUp(PowerUpKind::RapidFire) => [1.0, 0.8, 0.0, 1.0],
            SpriteKind::PowerUp(PowerUpKind::SpreadShot) => [0.0, 0.8, 1.0, 1.0],
            SpriteKind::PowerUp(PowerUpKind::Shield) => [0.6, 0.4, 1.0, 1.0],
            SpriteKind::PowerUp(PowerUpKind::ExtraLife) => [1.0, 0.4, 0.6, 1.0],
        }
    }
}

/// One drawable rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
    /// Animation frame (0 or 1)
    pub frame: u8,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    pub level: u32,
    pub combo: f64,
    pub phase: GamePhase,
    pub effects: ActiveEffects,
}

/// Read-only snapshot of everything visible this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Back-to-front draw order
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
    /// Fraction of a tick since the last simulation step
    pub alpha: f32,
}

/// Ticks per invulnerability blink phase
const BLINK_TICKS: u64 = 6;

impl Frame {
    pub fn capture(state: &GameState, alpha: f32) -> Self {
        let mut sprites = Vec::new();

        for barrier in &state.barriers {
            sprites.extend(barrier.alive_cells().map(|cell| Sprite {
                kind: SpriteKind::BarrierCell,
                rect: cell.bounds(),
                frame: 0,
            }));
        }

        sprites.extend(state.formation.alive().map(|enemy| Sprite {
            kind: SpriteKind::Enemy(enemy.kind),
            rect: enemy.bounds(),
            frame: enemy.frame,
        }));

        if let Some(bonus) = &state.bonus {
            if bonus.is_alive() {
                sprites.push(Sprite {
                    kind: SpriteKind::Bonus,
                    rect: bonus.bounds(),
                    frame: 0,
                });
            } else if bonus.show_score {
                sprites.push(Sprite {
                    kind: SpriteKind::BonusScore(bonus.points),
                    rect: bonus.bounds(),
                    frame: 0,
                });
            }
        }

        sprites.extend(state.drops.iter().filter(|d| d.is_alive()).map(|d| Sprite {
            kind: SpriteKind::PowerUp(d.kind),
            rect: d.bounds(),
            frame: 0,
        }));

        sprites.extend(
            state
                .projectiles
                .iter()
                .filter(|p| p.is_alive())
                .map(|p| Sprite {
                    kind: SpriteKind::Projectile(p.owner),
                    rect: p.bounds(),
                    frame: 0,
                }),
        );

        let player = &state.player;
        if player.dying {
            sprites.push(Sprite {
                kind: SpriteKind::PlayerExplosion,
                rect: player.bounds(),
                frame: player.death_frame,
            });
        } else if player.is_alive() {
            let blink_off = player.invulnerable && (state.time_ticks / BLINK_TICKS) % 2 == 1;
            if !blink_off {
                sprites.push(Sprite {
                    kind: SpriteKind::Player,
                    rect: player.bounds(),
                    frame: 0,
                });
            }
        }

        Self {
            sprites,
            hud: Hud {
                score: state.score.score,
                high_score: state.score.high_score,
                lives: player.lives,
                level: state.level,
                combo: state.score.combo,
                phase: state.phase,
                effects: player.effects.clone(),
            },
            alpha,
        }
    }

    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}

/// Presentation backend
pub trait Renderer {
    fn render(&mut self, frame: &Frame);
}
