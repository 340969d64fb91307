//! Collision resolution pipeline
//!
//! Runs once per tick in a fixed order:
//! (a) projectile-barrier, (b) enemy-barrier, (c) projectile-enemy,
//! (d) projectile-bonus, (e) projectile-player, (f) capsule-player.
//! Each stage only sees entities still alive after the previous stages, and a
//! projectile that hits anything dies at once, so it never scores twice.
//! Within a stage the first match in collection order wins.

use glam::Vec2;

use super::barrier::Barrier;
use super::bonus::BonusTarget;
use super::entity::Entity;
use super::formation::{EnemyKind, Formation};
use super::player::{Player, PowerUpDrop, PowerUpKind};
use super::projectile::{Owner, Projectile};

/// An enemy destroyed by a player projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyHit {
    pub kind: EnemyKind,
    pub center: Vec2,
}

/// Everything the resolver changed, for scoring and feedback
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Projectiles absorbed by barriers
    pub barrier_hits: u32,
    /// Enemies that eroded a barrier
    pub barrier_contacts: u32,
    pub enemy_hits: Vec<EnemyHit>,
    /// Points of a bonus target shot down this tick
    pub bonus_points: Option<u32>,
    /// An enemy projectile reached the player
    pub player_hit: bool,
    pub collected: Vec<PowerUpKind>,
}

/// Mutable view of every collidable collection
pub struct Collidables<'a> {
    pub projectiles: &'a mut [Projectile],
    pub formation: &'a mut Formation,
    pub barriers: &'a mut [Barrier],
    pub bonus: Option<&'a mut BonusTarget>,
    pub player: &'a mut Player,
    pub drops: &'a mut [PowerUpDrop],
}

/// Resolve all pairwise interactions for this tick
pub fn resolve(world: Collidables<'_>) -> CollisionReport {
    let Collidables {
        projectiles,
        formation,
        barriers,
        bonus,
        player,
        drops,
    } = world;
    let mut report = CollisionReport::default();

    // (a) Barriers absorb projectiles from either side
    for projectile in projectiles.iter_mut().filter(|p| p.is_alive()) {
        for barrier in barriers.iter_mut() {
            if barrier.check_projectile_collision(&mut *projectile) {
                report.barrier_hits += 1;
                break;
            }
        }
    }

    // (b) Enemies grind through barriers
    for enemy in formation.enemies.iter().filter(|e| e.is_alive()) {
        for barrier in barriers.iter_mut() {
            if barrier.check_enemy_collision(enemy) {
                report.barrier_contacts += 1;
            }
        }
    }

    // (c) Player projectiles vs enemies
    for projectile in player_shots(projectiles) {
        if let Some(enemy) = formation
            .enemies
            .iter_mut()
            .find(|e| e.is_alive() && e.bounds().overlaps(&projectile.bounds()))
        {
            projectile.destroy();
            enemy.destroy();
            report.enemy_hits.push(EnemyHit {
                kind: enemy.kind,
                center: enemy.center(),
            });
        }
    }

    // (d) Player projectiles vs the mystery flyer
    if let Some(bonus) = bonus.filter(|b| b.is_alive()) {
        if let Some(projectile) = player_shots(projectiles).find(|p| p.collides_with(&*bonus)) {
            projectile.destroy();
            report.bonus_points = Some(bonus.hit());
        }
    }

    // (e) Enemy projectiles vs the player (first hit only, none while exploding)
    if player.is_alive() && !player.dying {
        if let Some(projectile) = projectiles
            .iter_mut()
            .filter(|p| p.owner == Owner::Enemy)
            .find(|p| p.collides_with(&*player))
        {
            projectile.destroy();
            report.player_hit = true;
        }
    }

    // (f) Falling capsules vs the player
    if player.is_alive() && !player.dying {
        for drop in drops.iter_mut() {
            if drop.collides_with(&*player) {
                drop.destroy();
                report.collected.push(drop.kind);
            }
        }
    }

    report
}

fn player_shots(projectiles: &mut [Projectile]) -> impl Iterator<Item = &mut Projectile> {
    projectiles
        .iter_mut()
        .filter(|p| p.owner == Owner::Player && p.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::barrier::ErosionRadii;
    use crate::tuning::Tuning;

    const RADII: ErosionRadii = ErosionRadii {
        hit: 6.0,
        projectile: 12.0,
        enemy: 20.0,
    };

    struct Fixture {
        projectiles: Vec<Projectile>,
        formation: Formation,
        barriers: Vec<Barrier>,
        bonus: Option<BonusTarget>,
        player: Player,
        drops: Vec<PowerUpDrop>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                projectiles: Vec::new(),
                formation: Formation::new(1, &Tuning::default()),
                barriers: Vec::new(),
                bonus: None,
                player: Player::new(3),
                drops: Vec::new(),
            }
        }

        fn resolve(&mut self) -> CollisionReport {
            resolve(Collidables {
                projectiles: &mut self.projectiles,
                formation: &mut self.formation,
                barriers: &mut self.barriers,
                bonus: self.bonus.as_mut(),
                player: &mut self.player,
                drops: &mut self.drops,
            })
        }
    }

    /// Projectile overlapping the center of `target`
    fn shot_on(target: &dyn Entity, owner: Owner) -> Projectile {
        let c = target.center();
        Projectile::new(c - Vec2::new(2.0, 6.0), Vec2::ZERO, owner)
    }

    #[test]
    fn test_player_shot_kills_one_enemy() {
        let mut f = Fixture::new();
        let target = f.formation.enemies[44].clone();
        f.projectiles.push(shot_on(&target, Owner::Player));
        let report = f.resolve();
        assert_eq!(report.enemy_hits.len(), 1);
        assert_eq!(report.enemy_hits[0].kind, EnemyKind::Bottom);
        assert!(!f.formation.enemies[44].is_alive());
        assert_eq!(f.formation.alive_count(), 54);
        assert!(!f.projectiles[0].is_alive());
    }

    #[test]
    fn test_first_match_in_collection_order() {
        let mut f = Fixture::new();
        // Stack two enemies on the same spot; only the first listed dies
        let pos = f.formation.enemies[0].body.pos;
        f.formation.enemies[1].body.pos = pos;
        let target = f.formation.enemies[0].clone();
        f.projectiles.push(shot_on(&target, Owner::Player));
        let report = f.resolve();
        assert_eq!(report.enemy_hits.len(), 1);
        assert!(!f.formation.enemies[0].is_alive());
        assert!(f.formation.enemies[1].is_alive());
    }

    #[test]
    fn test_enemy_shots_ignore_enemies() {
        let mut f = Fixture::new();
        let target = f.formation.enemies[30].clone();
        f.projectiles.push(shot_on(&target, Owner::Enemy));
        let report = f.resolve();
        assert!(report.enemy_hits.is_empty());
        assert!(f.projectiles[0].is_alive());
    }

    #[test]
    fn test_player_shots_ignore_player() {
        let mut f = Fixture::new();
        let ship = f.player.clone();
        f.projectiles.push(shot_on(&ship, Owner::Player));
        let report = f.resolve();
        assert!(!report.player_hit);
        assert!(f.projectiles[0].is_alive());
    }

    #[test]
    fn test_enemy_shot_hits_player_once() {
        let mut f = Fixture::new();
        let ship = f.player.clone();
        f.projectiles.push(shot_on(&ship, Owner::Enemy));
        f.projectiles.push(shot_on(&ship, Owner::Enemy));
        let report = f.resolve();
        assert!(report.player_hit);
        assert!(!f.projectiles[0].is_alive());
        // Second projectile survives this tick
        assert!(f.projectiles[1].is_alive());
    }

    #[test]
    fn test_enemy_shot_passes_exploding_player() {
        let mut f = Fixture::new();
        assert!(f.player.take_damage());
        let ship = f.player.clone();
        f.projectiles.push(shot_on(&ship, Owner::Enemy));
        let report = f.resolve();
        assert!(!report.player_hit);
        assert!(f.projectiles[0].is_alive());
    }

    #[test]
    fn test_barrier_blocks_before_enemy() {
        let mut f = Fixture::new();
        let target = f.formation.enemies[44].clone();
        let shot = shot_on(&target, Owner::Player);
        // Put a barrier under the shot
        let origin = shot.center() - Vec2::new(44.0, 40.0);
        f.barriers.push(Barrier::new(origin, RADII));
        f.projectiles.push(shot);
        let report = f.resolve();
        assert_eq!(report.barrier_hits, 1);
        assert!(report.enemy_hits.is_empty());
        assert!(!f.projectiles[0].is_alive());
    }

    #[test]
    fn test_shot_hits_enemy_before_bonus() {
        let mut f = Fixture::new();
        let target = f.formation.enemies[0].clone();
        let mut bonus = BonusTarget::new(1.0, 200, 100.0, 1.0);
        bonus.body.pos = target.body.pos;
        f.bonus = Some(bonus);
        f.projectiles.push(shot_on(&target, Owner::Player));
        let report = f.resolve();
        assert_eq!(report.enemy_hits.len(), 1);
        assert_eq!(report.bonus_points, None);
        assert!(f.bonus.as_ref().unwrap().is_alive());
    }

    #[test]
    fn test_shot_downs_bonus() {
        let mut f = Fixture::new();
        let mut bonus = BonusTarget::new(1.0, 250, 100.0, 1.0);
        bonus.body.pos = Vec2::new(200.0, 50.0);
        f.projectiles.push(shot_on(&bonus, Owner::Player));
        f.bonus = Some(bonus);
        let report = f.resolve();
        assert_eq!(report.bonus_points, Some(250));
        assert!(f.bonus.as_ref().unwrap().show_score);
    }

    #[test]
    fn test_capsule_collected_by_live_player() {
        let mut f = Fixture::new();
        let center = f.player.center();
        f.drops.push(PowerUpDrop {
            body: crate::sim::entity::Body::new(center, Vec2::splat(20.0)),
            kind: PowerUpKind::RapidFire,
        });
        let report = f.resolve();
        assert_eq!(report.collected, vec![PowerUpKind::RapidFire]);
        assert!(!f.drops[0].is_alive());
    }

    #[test]
    fn test_each_projectile_hits_at_most_once() {
        let mut f = Fixture::new();
        // A tall projectile spanning two rows of the same column
        let top = f.formation.enemies[33].body.pos;
        let mut tall = Projectile::new(top, Vec2::ZERO, Owner::Player);
        tall.body.size.y = 60.0;
        f.projectiles.push(tall);
        let report = f.resolve();
        assert_eq!(report.enemy_hits.len(), 1);
        assert_eq!(f.formation.alive_count(), 54);
    }
}
