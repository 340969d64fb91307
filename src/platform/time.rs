//! Fixed timestep accumulator
//!
//! Wall-clock frame time goes in; a whole number of simulation ticks comes
//! out. The render rate never changes what the simulation computes.

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, PartialEq)]
pub struct FixedStep {
    accumulator: f32,
    dt: f32,
    max_substeps: u32,
    max_frame_time: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStep {
    pub fn new(dt: f32) -> Self {
        Self {
            accumulator: 0.0,
            dt,
            max_substeps: MAX_SUBSTEPS,
            max_frame_time: MAX_FRAME_TIME,
        }
    }

    /// Tick duration in seconds
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Feed one frame's elapsed time; returns how many ticks to run now
    ///
    /// Long stalls (tab switch, debugger) are clamped so the simulation
    /// never tries to catch up more than `MAX_SUBSTEPS` ticks in a frame.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, self.max_frame_time)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            self.accumulator -= self.dt;
            substeps += 1;
        }
        substeps
    }

    /// Fraction of a tick left in the accumulator (for render interpolation)
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.dt).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
