//! Browser entry point
//!
//! The page forwards `keydown`/`keyup` and `requestAnimationFrame` to a
//! `WebGame` and paints whatever it draws. Scores and preferences live in
//! LocalStorage.

use wasm_bindgen::prelude::*;

use crate::audio::NullAudio;
use crate::consts::SIM_DT;
use crate::platform::{self, Keyboard, LocalStore};
use crate::renderer::AsciiRenderer;
use crate::{Game, Tuning};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    platform::init_logging();
    log::info!("Pixel Invaders (web) starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    keys: Keyboard,
    audio: NullAudio,
    renderer: AsciiRenderer,
    /// Timestamp of the previous animation frame (ms), 0 before the first
    last_time: f64,
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = platform::entropy_seed();
        Self {
            game: Game::new(seed, Tuning::default(), Box::new(LocalStore)),
            keys: Keyboard::default(),
            audio: NullAudio::default(),
            renderer: AsciiRenderer::new(),
            last_time: 0.0,
        }
    }

    /// Returns true when the key is bound, so the page can `preventDefault`
    pub fn key_event(&mut self, key: &str, pressed: bool) -> bool {
        self.keys.key_event(key, pressed)
    }

    pub fn blur(&mut self) {
        self.keys.release_all();
    }

    /// Animation frame callback; returns the number of ticks run
    pub fn frame(&mut self, time: f64) -> u32 {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        self.last_time = time;
        self.game.frame(dt, &self.keys, &mut self.audio)
    }

    /// Current frame as text
    pub fn render_text(&mut self) -> String {
        self.game.render(&mut self.renderer);
        self.renderer.last_frame().to_owned()
    }

    pub fn score(&self) -> f64 {
        self.game.state.score.score as f64
    }

    pub fn high_score(&self) -> f64 {
        self.game.high_score() as f64
    }

    pub fn toggle_mute(&mut self) {
        let mut settings = self.game.settings().clone();
        settings.toggle_mute();
        self.game.set_settings(settings, &mut self.audio);
    }

    pub fn restart(&mut self) {
        self.game.restart(platform::entropy_seed());
        self.last_time = 0.0;
    }
}
