//! Destructible barriers
//!
//! A barrier is a dome of small square cells built from a fixed stencil.
//! Hits erase every live cell inside a radius around the impact point, so a
//! single shot carves a visible crater. Cells never come back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Rect};
use crate::consts::*;

/// Classic dome with an arch cut out of the bottom (22 x 16 cells)
const STENCIL: [&str; 16] = [
    "......##########......",
    "....##############....",
    "...################...",
    "..##################..",
    ".####################.",
    "######################",
    "######################",
    "######################",
    "######################",
    "######################",
    "######################",
    "######################",
    "######################",
    "######..........######",
    "#####............#####",
    "#####............#####",
];

/// Barrier width in pixels
pub const BARRIER_WIDTH: f32 = 22.0 * BARRIER_CELL_SIZE;

/// One destructible square of a barrier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarrierCell {
    pub pos: Vec2,
    pub size: f32,
    pub alive: bool,
}

impl BarrierCell {
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Radii governing barrier damage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErosionRadii {
    /// Nearest live cell must be closer than this for a projectile hit
    pub hit: f32,
    /// Crater radius around a projectile impact
    pub projectile: f32,
    /// Crater radius around an enemy pushing through
    pub enemy: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    pub cells: Vec<BarrierCell>,
    radii: ErosionRadii,
}

impl Barrier {
    /// Build a barrier whose top-left corner is at `origin`
    pub fn new(origin: Vec2, radii: ErosionRadii) -> Self {
        let cells = STENCIL
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'#')
                    .map(move |(col, _)| BarrierCell {
                        pos: origin
                            + Vec2::new(col as f32, row as f32) * BARRIER_CELL_SIZE,
                        size: BARRIER_CELL_SIZE,
                        alive: true,
                    })
            })
            .collect();
        Self { cells, radii }
    }

    /// The standard row of barriers, evenly spaced across the field
    pub fn row(radii: ErosionRadii) -> Vec<Barrier> {
        let total = BARRIER_COUNT as f32 * BARRIER_WIDTH;
        let spacing = (CANVAS_WIDTH - total) / (BARRIER_COUNT as f32 + 1.0);
        (0..BARRIER_COUNT)
            .map(|i| {
                let x = spacing + i as f32 * (BARRIER_WIDTH + spacing);
                Barrier::new(Vec2::new(x, BARRIER_Y), radii)
            })
            .collect()
    }

    pub fn alive_cells(&self) -> impl Iterator<Item = &BarrierCell> {
        self.cells.iter().filter(|c| c.alive)
    }

    pub fn is_destroyed(&self) -> bool {
        self.alive_cells().next().is_none()
    }

    /// Erase every live cell whose center lies within `radius` of `point`
    ///
    /// Returns the number of cells erased.
    pub fn erode_at(&mut self, point: Vec2, radius: f32) -> usize {
        let mut erased = 0;
        for cell in self.cells.iter_mut().filter(|c| c.alive) {
            if cell.center().distance(point) <= radius {
                cell.alive = false;
                erased += 1;
            }
        }
        erased
    }

    /// Tight nearest-cell test for a projectile
    ///
    /// The nearest live cell must sit within the hit radius of the projectile
    /// center; then a wider crater is carved and the projectile destroyed.
    pub fn check_projectile_collision(&mut self, projectile: &mut dyn Entity) -> bool {
        if !projectile.is_alive() {
            return false;
        }
        let center = projectile.center();
        let nearest = self
            .alive_cells()
            .map(|c| c.center().distance(center))
            .reduce(f32::min);

        match nearest {
            Some(dist) if dist < self.radii.hit => {
                self.erode_at(center, self.radii.projectile);
                projectile.destroy();
                true
            }
            _ => false,
        }
    }

    /// AABB test of an enemy against the cells; one crater per call
    pub fn check_enemy_collision(&mut self, enemy: &dyn Entity) -> bool {
        if !enemy.is_alive() {
            return false;
        }
        let bounds = enemy.bounds();
        if self.alive_cells().any(|c| c.bounds().overlaps(&bounds)) {
            self.erode_at(bounds.center(), self.radii.enemy);
            true
        } else {
            false
        }
    }
}
