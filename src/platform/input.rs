//! Input sources
//!
//! Sources report button levels only. Edge detection (fire, pause) happens
//! inside the simulation by comparing consecutive ticks.

use std::collections::BTreeSet;

use crate::sim::{Entity, GamePhase, GameState, TickInput};

/// Something that can be polled for the current button levels
pub trait InputSource {
    fn is_left_pressed(&self) -> bool;
    fn is_right_pressed(&self) -> bool;
    fn is_fire_pressed(&self) -> bool;

    fn is_pause_pressed(&self) -> bool {
        false
    }

    /// Snapshot all buttons for one tick
    fn sample(&self) -> TickInput {
        TickInput {
            left: self.is_left_pressed(),
            right: self.is_right_pressed(),
            fire: self.is_fire_pressed(),
            pause: self.is_pause_pressed(),
        }
    }
}

/// A fixed input, held for as long as it is polled
impl InputSource for TickInput {
    fn is_left_pressed(&self) -> bool {
        self.left
    }

    fn is_right_pressed(&self) -> bool {
        self.right
    }

    fn is_fire_pressed(&self) -> bool {
        self.fire
    }

    fn is_pause_pressed(&self) -> bool {
        self.pause
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Button {
    Left,
    Right,
    Fire,
    Pause,
}

/// Button bound to a `KeyboardEvent.key` value
pub fn bound_button(key: &str) -> Option<Button> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Button::Left),
        "ArrowRight" | "d" | "D" => Some(Button::Right),
        " " | "Space" => Some(Button::Fire),
        "Escape" | "p" | "P" => Some(Button::Pause),
        _ => None,
    }
}

/// Button levels built from key down/up events
///
/// Every bound key is tracked separately, so releasing `a` while
/// `ArrowLeft` is still down keeps moving left.
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: BTreeSet<(Button, String)>,
}

impl Keyboard {
    /// Record a key event; returns false for unbound keys
    pub fn key_event(&mut self, key: &str, pressed: bool) -> bool {
        let Some(button) = bound_button(key) else {
            return false;
        };
        let entry = (button, key.to_owned());
        if pressed {
            self.held.insert(entry);
        } else {
            self.held.remove(&entry);
        }
        true
    }

    /// Forget every held key (focus lost)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    fn is_down(&self, button: Button) -> bool {
        self.held.iter().any(|(b, _)| *b == button)
    }
}

impl InputSource for Keyboard {
    fn is_left_pressed(&self) -> bool {
        self.is_down(Button::Left)
    }

    fn is_right_pressed(&self) -> bool {
        self.is_down(Button::Right)
    }

    fn is_fire_pressed(&self) -> bool {
        self.is_down(Button::Fire)
    }

    fn is_pause_pressed(&self) -> bool {
        self.is_down(Button::Pause)
    }
}

/// Horizontal slack before the autopilot bothers to steer
const DEAD_ZONE: f32 = 4.0;
/// Horizontal misalignment still worth a shot
const AIM_TOLERANCE: f32 = 10.0;

/// Attract-mode player
///
/// Tracks the front-line enemy nearest to the ship and taps fire while
/// lined up. Call `observe` once per tick before sampling.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    current: TickInput,
    /// Fire alternates so every other tick is a fresh press
    fire_latch: bool,
    /// Start a new game after game over
    pub restart: bool,
}

impl Autopilot {
    pub fn new(restart: bool) -> Self {
        Self {
            restart,
            ..Self::default()
        }
    }

    /// Decide this tick's buttons from the current state
    pub fn observe(&mut self, state: &GameState) {
        self.fire_latch = !self.fire_latch;
        let mut input = TickInput::default();

        match state.phase {
            GamePhase::Menu => input.fire = self.fire_latch,
            GamePhase::GameOver => input.fire = self.restart && self.fire_latch,
            GamePhase::Playing => {
                let ship_x = state.player.center().x;
                if let Some(target_x) = Self::target_x(state, ship_x) {
                    let dx = target_x - ship_x;
                    input.left = dx < -DEAD_ZONE;
                    input.right = dx > DEAD_ZONE;
                    input.fire = self.fire_latch && dx.abs() < AIM_TOLERANCE;
                }
            }
            GamePhase::Paused | GamePhase::PlayerDying | GamePhase::LevelComplete => {}
        }

        self.current = input;
    }

    fn target_x(state: &GameState, ship_x: f32) -> Option<f32> {
        let formation = &state.formation;
        formation
            .front_line()
            .into_iter()
            .map(|idx| formation.enemies[idx].center().x)
            .min_by(|a, b| (a - ship_x).abs().total_cmp(&(b - ship_x).abs()))
    }
}

impl InputSource for Autopilot {
    fn is_left_pressed(&self) -> bool {
        self.current.left
    }

    fn is_right_pressed(&self) -> bool {
        self.current.right
    }

    fn is_fire_pressed(&self) -> bool {
        self.current.fire
    }
}
