//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Per tick:
//! input edges -> player -> formation -> bonus target -> projectiles ->
//! collisions -> score -> win/loss checks.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::barrier::Barrier;
use super::bonus::BonusTarget;
use super::collision::{self, Collidables, CollisionReport};
use super::entity::Entity;
use super::formation::Formation;
use super::player::{Player, PowerUpDrop};
use super::projectile::Projectile;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
///
/// Buttons are sampled levels; edges are derived by comparing with the
/// previous tick inside the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub pause: bool,
}

impl TickInput {
    /// Horizontal steering; left wins when both are held
    pub fn steer(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    let fire_edge = input.fire && !state.fire_was_pressed;
    let pause_edge = input.pause && !state.pause_was_pressed;
    state.fire_was_pressed = input.fire;
    state.pause_was_pressed = input.pause;

    // Handle pause toggle
    if pause_edge {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            if fire_edge {
                start_game(state);
            }
            return;
        }
        GamePhase::Paused => return,
        _ => {}
    }

    state.time_ticks += 1;
    state.clock += dt as f64;

    match state.phase {
        GamePhase::Playing => tick_playing(state, input, fire_edge, dt),
        GamePhase::PlayerDying => tick_dying(state, dt),
        GamePhase::LevelComplete => advance_level(state),
        GamePhase::Menu | GamePhase::Paused | GamePhase::GameOver => {}
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput, fire_edge: bool, dt: f32) {
    let t = &state.tuning;
    state
        .player
        .update(dt, input.steer(), t.player_speed, t.death_frame_interval);

    if fire_edge && state.player.shoot(state.clock, state.tuning.player_fire_cooldown) {
        fire_player_shots(state);
    }

    state.formation.update(
        dt,
        &mut state.rng,
        &mut state.projectiles,
        &mut state.events,
    );
    update_bonus(state, dt);
    advance_world(state, dt);
}

fn tick_dying(state: &mut GameState, dt: f32) {
    // Only the explosion animates; the invaders keep coming
    let t = &state.tuning;
    state.player.update(dt, 0.0, t.player_speed, t.death_frame_interval);
    state.formation.update(
        dt,
        &mut state.rng,
        &mut state.projectiles,
        &mut state.events,
    );
    advance_world(state, dt);

    if state.phase != GamePhase::PlayerDying {
        return;
    }
    state.dying_timer += dt;
    if state.dying_timer >= state.tuning.dying_duration() {
        state.dying_timer = 0.0;
        state.player.finish_death(state.tuning.invulnerable_duration);
        if state.player.is_alive() {
            log::debug!("Player respawned ({} lives left)", state.player.lives);
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::PlayerRespawned);
        } else {
            game_over(state);
        }
    }
}

/// Projectiles, capsules, collisions, scoring and outcome checks
fn advance_world(state: &mut GameState, dt: f32) {
    for projectile in &mut state.projectiles {
        projectile.update(dt);
    }
    for drop in &mut state.drops {
        drop.update(dt);
    }

    let report = collision::resolve(Collidables {
        projectiles: &mut state.projectiles,
        formation: &mut state.formation,
        barriers: &mut state.barriers,
        bonus: state.bonus.as_mut(),
        player: &mut state.player,
        drops: &mut state.drops,
    });
    apply_collisions(state, report);

    state.projectiles.retain(|p| p.is_alive());
    state.drops.retain(|d| d.is_alive());

    state.score.update(dt);
    check_outcome(state);
}

fn fire_player_shots(state: &mut GameState) {
    let speed = state.tuning.player_projectile_speed;
    let ship = &state.player.body;
    state.projectiles.push(Projectile::from_player(
        ship.pos,
        ship.size.x,
        Vec2::new(0.0, -speed),
    ));
    if state.player.effects.spread_shot.active {
        let vx = state.tuning.spread_vx;
        for dx in [-vx, vx] {
            state.projectiles.push(Projectile::from_player(
                ship.pos,
                ship.size.x,
                Vec2::new(dx, -speed),
            ));
        }
    }
    state.events.push(GameEvent::Shoot);
}

fn apply_collisions(state: &mut GameState, report: CollisionReport) {
    let high_before = state.score.high_score;

    if report.barrier_hits > 0 {
        state.events.push(GameEvent::BarrierHit);
    }

    let drop_chance = state.tuning.powerup_drop_chance.clamp(0.0, 1.0);
    for hit in report.enemy_hits {
        let awarded = state.score.add_score(hit.kind.points());
        log::debug!(
            "Enemy destroyed! +{} points (combo {:.1})",
            awarded,
            state.score.combo
        );
        state.events.push(GameEvent::EnemyKilled {
            kind: hit.kind,
            awarded,
        });
        if state.rng.random_bool(drop_chance) {
            let drop = PowerUpDrop::spawn(
                &mut state.rng,
                hit.center,
                state.tuning.powerup_fall_speed,
            );
            state.drops.push(drop);
        }
    }

    if let Some(points) = report.bonus_points {
        let awarded = state.score.add_score(points);
        log::info!("Mystery target destroyed! +{} bonus points", awarded);
        state.events.push(GameEvent::BonusHit { points, awarded });
        state.events.push(GameEvent::BonusGone);
    }

    if report.player_hit && state.player.take_damage() {
        log::debug!("Player hit! Lives remaining: {}", state.player.lives);
        state.events.push(GameEvent::PlayerHit {
            lives: state.player.lives,
        });
        state.phase = GamePhase::PlayerDying;
        state.dying_timer = 0.0;
    }

    for kind in report.collected {
        state
            .player
            .apply_power_up(kind, state.tuning.powerup_duration);
        state.events.push(GameEvent::PowerUpCollected { kind });
    }

    if state.score.high_score > high_before {
        state.events.push(GameEvent::NewHighScore {
            score: state.score.high_score,
        });
    }
}

/// Bonus spawn timer and flight
fn update_bonus(state: &mut GameState, dt: f32) {
    state.bonus_timer += dt;
    if state.bonus.is_none() && state.bonus_timer >= state.next_bonus_at {
        let t = &state.tuning;
        let bonus = BonusTarget::spawn(
            &mut state.rng,
            &t.bonus_values,
            t.bonus_speed,
            t.bonus_score_display,
        );
        log::info!("Mystery target spawned! Worth {} points", bonus.points);
        state.events.push(GameEvent::BonusSpawned {
            points: bonus.points,
            direction: bonus.direction,
        });
        state.bonus = Some(bonus);
        state.bonus_timer = 0.0;
        state.next_bonus_at = roll_bonus_delay(&mut state.rng, &state.tuning);
    }

    if let Some(bonus) = &mut state.bonus {
        let was_alive = bonus.is_alive();
        bonus.update(dt);
        if was_alive && !bonus.is_alive() {
            state.events.push(GameEvent::BonusGone);
        }
        if bonus.is_fully_done() {
            state.bonus = None;
        }
    }
}

/// Uniform delay before the next bonus target
pub fn roll_bonus_delay<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> f32 {
    if tuning.bonus_spawn_max > tuning.bonus_spawn_min {
        rng.random_range(tuning.bonus_spawn_min..=tuning.bonus_spawn_max)
    } else {
        tuning.bonus_spawn_min
    }
}

/// Bottom-reach loss and formation-cleared win
fn check_outcome(state: &mut GameState) {
    if let Some(lowest) = state.formation.lowest_edge() {
        if lowest >= CANVAS_HEIGHT - state.tuning.enemy_bottom_margin {
            log::info!("Enemies reached the bottom!");
            state.player.wipe_out();
            game_over(state);
            return;
        }
    }

    if state.formation.all_destroyed() {
        if state.phase == GamePhase::Playing {
            state.phase = GamePhase::LevelComplete;
        }
        advance_level(state);
    }
}

/// Rebuild the formation one level up; level clears never linger
fn advance_level(state: &mut GameState) {
    log::info!("Level {} complete!", state.level);
    state.events.push(GameEvent::LevelCleared { level: state.level });
    state.level += 1;
    state.formation = Formation::new(state.level, &state.tuning);
    if state.phase == GamePhase::LevelComplete {
        state.phase = GamePhase::Playing;
    }
}

fn game_over(state: &mut GameState) {
    log::info!("Game over! Final score: {}", state.score.score);
    state.phase = GamePhase::GameOver;
    state.dying_timer = 0.0;
    if state.bonus.take().is_some_and(|b| b.is_alive()) {
        state.events.push(GameEvent::BonusGone);
    }
    state.events.push(GameEvent::GameOver {
        score: state.score.score,
    });
}

/// Start (or restart) a session at level 1
pub fn start_game(state: &mut GameState) {
    if state.bonus.take().is_some_and(|b| b.is_alive()) {
        state.events.push(GameEvent::BonusGone);
    }

    state.phase = GamePhase::Playing;
    state.level = 1;
    state.score.reset();
    state.player = Player::new(state.tuning.player_lives);
    state.projectiles.clear();
    state.drops.clear();
    state.barriers = Barrier::row(GameState::erosion_radii(&state.tuning));
    state.formation = Formation::new(1, &state.tuning);
    state.bonus_timer = 0.0;
    state.next_bonus_at = roll_bonus_delay(&mut state.rng, &state.tuning);
    state.dying_timer = 0.0;

    log::info!("Game started (seed {})", state.seed);
    state.events.push(GameEvent::GameStarted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::formation::EnemyKind;
    use crate::sim::projectile::Owner;

    const FIRE: TickInput = TickInput {
        left: false,
        right: false,
        fire: true,
        pause: false,
    };
    const IDLE: TickInput = TickInput {
        left: false,
        right: false,
        fire: false,
        pause: false,
    };

    /// A running game where the formation never shoots
    fn quiet_game() -> GameState {
        let tuning = Tuning {
            enemy_fire_interval: 1.0e9,
            powerup_drop_chance: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(12345, tuning, 0);
        tick(&mut state, &FIRE, SIM_DT);
        tick(&mut state, &IDLE, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    fn shot_at(target: &dyn Entity, owner: Owner) -> Projectile {
        Projectile::new(target.center() - Vec2::new(2.0, 6.0), Vec2::ZERO, owner)
    }

    #[test]
    fn test_menu_to_playing_on_fire_edge() {
        let mut state = GameState::new(1, Tuning::default(), 0);
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &IDLE, SIM_DT);
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &FIRE, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events.contains(&GameEvent::GameStarted));

        // Holding fire from the menu press does not shoot
        tick(&mut state, &FIRE, SIM_DT);
        assert!(state.projectiles.iter().all(|p| p.owner != Owner::Player));
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut state = quiet_game();
        for _ in 0..120 {
            tick(&mut state, &FIRE, SIM_DT);
        }
        let shots = state
            .projectiles
            .iter()
            .filter(|p| p.owner == Owner::Player)
            .count();
        // One press, one shot (it may already have left the screen)
        assert!(shots <= 1);

        let mut state = quiet_game();
        tick(&mut state, &FIRE, SIM_DT);
        assert!(state.events.contains(&GameEvent::Shoot));
        tick(&mut state, &IDLE, SIM_DT);
        tick(&mut state, &FIRE, SIM_DT);
        // Re-pressed inside the cooldown: rejected
        assert!(!state.events.contains(&GameEvent::Shoot));
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = quiet_game();
        let pause = TickInput {
            pause: true,
            ..IDLE
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        let ticks = state.time_ticks;
        let formation = state.formation.clone();
        for _ in 0..200 {
            tick(&mut state, &IDLE, SIM_DT);
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.formation, formation);

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_bottom_enemy_kill_scores_ten() {
        let mut state = quiet_game();
        assert_eq!(state.formation.alive_count(), 55);
        let target = state.formation.enemies[44].clone();
        assert_eq!(target.kind, EnemyKind::Bottom);
        state.projectiles.push(shot_at(&target, Owner::Player));

        tick(&mut state, &IDLE, SIM_DT);
        assert_eq!(state.score.score, 10);
        assert_eq!(state.formation.alive_count(), 54);
        assert!(state.projectiles.is_empty());
        assert!(state.events.contains(&GameEvent::EnemyKilled {
            kind: EnemyKind::Bottom,
            awarded: 10,
        }));
    }

    #[test]
    fn test_last_life_ends_in_game_over() {
        let mut state = quiet_game();
        state.player.lives = 1;
        let ship = state.player.clone();
        state.projectiles.push(shot_at(&ship, Owner::Enemy));

        tick(&mut state, &IDLE, SIM_DT);
        assert_eq!(state.phase, GamePhase::PlayerDying);
        assert_eq!(state.player.lives, 0);
        assert!(state.player.dying);

        let mut ticks = 0;
        while state.phase == GamePhase::PlayerDying {
            tick(&mut state, &IDLE, SIM_DT);
            ticks += 1;
            assert!(ticks <= 200);
        }
        // 2.5 seconds of explosion and delay
        assert!((149..=152).contains(&ticks), "ticks {ticks}");
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.player.is_alive());
    }

    #[test]
    fn test_damage_with_lives_respawns() {
        let mut state = quiet_game();
        state.player.body.pos.x = 40.0;
        let ship = state.player.clone();
        state.projectiles.push(shot_at(&ship, Owner::Enemy));
        tick(&mut state, &IDLE, SIM_DT);
        assert_eq!(state.phase, GamePhase::PlayerDying);

        let enemy_x = state.formation.enemies[0].body.pos.x;
        while state.phase == GamePhase::PlayerDying {
            tick(&mut state, &IDLE, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.lives, 2);
        assert!(state.player.invulnerable);
        assert_eq!(state.player.body.pos, crate::player_spawn_point());
        // The formation kept marching during the explosion
        assert_ne!(state.formation.enemies[0].body.pos.x, enemy_x);
    }

    #[test]
    fn test_enemy_at_bottom_is_instant_game_over() {
        let mut state = quiet_game();
        state.formation.enemies[54].body.pos.y = CANVAS_HEIGHT - 60.0;
        tick(&mut state, &IDLE, SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.lives, 0);
        assert!(!state.player.is_alive());

        // Fire restarts a fresh game
        tick(&mut state, &FIRE, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.score.score, 0);
    }

    #[test]
    fn test_clearing_formation_advances_level() {
        let mut state = quiet_game();
        for enemy in state.formation.enemies.iter_mut().take(54) {
            enemy.destroy();
        }
        let target = state.formation.enemies[54].clone();
        state.projectiles.push(shot_at(&target, Owner::Player));

        tick(&mut state, &IDLE, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 2);
        assert_eq!(state.formation.alive_count(), 55);
        assert!(state.events.contains(&GameEvent::LevelCleared { level: 1 }));
        assert!(state.formation.base_step_interval() < state.tuning.enemy_step_interval);
    }

    #[test]
    fn test_bonus_spawns_inside_window() {
        let mut state = quiet_game();
        let mut ticks = 0u32;
        while state.bonus.is_none() {
            tick(&mut state, &IDLE, SIM_DT);
            ticks += 1;
            assert!(ticks < 36 * 60, "bonus never spawned");
        }
        let secs = ticks as f32 * SIM_DT;
        assert!(secs >= 24.9, "spawned after {secs}s");
        let spawned = state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::BonusSpawned { .. }));
        assert!(spawned);
        let bonus = state.bonus.as_ref().unwrap();
        assert!(state.tuning.bonus_values.contains(&bonus.points));
    }

    #[test]
    fn test_shooting_bonus_scores_its_value() {
        let mut state = quiet_game();
        let mut bonus = BonusTarget::new(1.0, 300, 100.0, 1.0);
        bonus.body.pos.x = 200.0;
        let target = bonus.clone();
        state.bonus = Some(bonus);
        state.projectiles.push(shot_at(&target, Owner::Player));
        tick(&mut state, &IDLE, SIM_DT);
        assert_eq!(state.score.score, 300);
        assert!(state.events.contains(&GameEvent::BonusGone));

        // Score display, then cleanup
        for _ in 0..61 {
            tick(&mut state, &IDLE, SIM_DT);
        }
        assert!(state.bonus.is_none());
    }

    #[test]
    fn test_spread_shot_fires_three() {
        let mut state = quiet_game();
        state
            .player
            .apply_power_up(crate::sim::player::PowerUpKind::SpreadShot, 5.0);
        tick(&mut state, &FIRE, SIM_DT);
        let shots: Vec<_> = state
            .projectiles
            .iter()
            .filter(|p| p.owner == Owner::Player)
            .collect();
        assert_eq!(shots.len(), 3);
        assert!(shots.iter().any(|p| p.body.vel.x < 0.0));
        assert!(shots.iter().any(|p| p.body.vel.x > 0.0));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Tuning::default(), 0);
        let mut state2 = GameState::new(99999, Tuning::default(), 0);

        for i in 0..1200u32 {
            let input = TickInput {
                left: i % 200 < 70,
                right: i % 200 > 130,
                fire: i % 20 < 3,
                pause: false,
            };
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(
            serde_json::to_string(&state1).unwrap(),
            serde_json::to_string(&state2).unwrap()
        );
    }
}
