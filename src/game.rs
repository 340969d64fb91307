//! Game driver
//!
//! Owns the simulation state and everything around it: the fixed-step clock,
//! audio dispatch and persistence. A host calls `frame` once per displayed
//! frame and `render` afterwards.

use crate::audio::{AudioDirector, AudioSink};
use crate::highscores::HighScore;
use crate::platform::{FixedStep, InputSource, KeyValueStore};
use crate::renderer::{Frame, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

pub struct Game {
    pub state: GameState,
    clock: FixedStep,
    audio: AudioDirector,
    settings: Settings,
    high_score: HighScore,
    store: Box<dyn KeyValueStore>,
    /// Events from every tick of the latest frame
    frame_events: Vec<GameEvent>,
}

impl Game {
    /// Load preferences and the best score, then sit at the title screen
    pub fn new(seed: u64, tuning: Tuning, store: Box<dyn KeyValueStore>) -> Self {
        let high_score = HighScore::load(store.as_ref());
        let settings = Settings::load(store.as_ref());
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(seed, tuning, high_score.value),
            clock: FixedStep::default(),
            audio: AudioDirector::new(&settings),
            settings,
            high_score,
            store,
            frame_events: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Best score on record (persisted)
    pub fn high_score(&self) -> u64 {
        self.high_score.value
    }

    pub fn frame_events(&self) -> &[GameEvent] {
        &self.frame_events
    }

    /// Advance by one displayed frame; returns the number of ticks run
    pub fn frame(
        &mut self,
        elapsed: f32,
        input: &dyn InputSource,
        sink: &mut dyn AudioSink,
    ) -> u32 {
        self.frame_events.clear();
        let ticks = self.clock.advance(elapsed);
        let sampled = input.sample();
        for _ in 0..ticks {
            self.run_tick(&sampled, sink);
        }
        self.persist_high_score();
        ticks
    }

    /// Run exactly one tick, bypassing the frame clock
    pub fn step(&mut self, input: &TickInput, sink: &mut dyn AudioSink) {
        self.frame_events.clear();
        self.run_tick(input, sink);
        self.persist_high_score();
    }

    fn run_tick(&mut self, input: &TickInput, sink: &mut dyn AudioSink) {
        tick(&mut self.state, input, self.clock.dt());
        self.audio.dispatch(&self.state.events, sink);
        self.frame_events.extend(self.state.events.iter().cloned());
    }

    /// At most one write per frame, however many kills raised the record
    fn persist_high_score(&mut self) {
        let best = self
            .frame_events
            .iter()
            .filter_map(|e| match e {
                GameEvent::NewHighScore { score } => Some(*score),
                _ => None,
            })
            .max();
        if let Some(score) = best {
            self.high_score.submit(score, self.store.as_mut());
        }
    }

    /// Draw the current state (read-only)
    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.render(&Frame::capture(&self.state, self.clock.alpha()));
    }

    /// Change and persist preferences
    pub fn set_settings(&mut self, settings: Settings, sink: &mut dyn AudioSink) {
        self.audio.apply_settings(&settings, sink);
        settings.save(self.store.as_mut());
        self.settings = settings;
    }

    /// Throw the current session away and return to the title screen
    pub fn restart(&mut self, seed: u64) {
        let tuning = self.state.tuning.clone();
        self.state = GameState::new(seed, tuning, self.high_score.value);
        self.clock.reset();
        self.frame_events.clear();
        log::info!("Game restarted with seed: {}", seed);
    }

    /// Serialize the full simulation state
    pub fn snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.state)
    }

    /// Resume from a snapshot
    pub fn restore(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let state: GameState = serde_json::from_str(json)?;
        log::info!("Restored game at level {}", state.level);
        self.state = state;
        self.clock.reset();
        self.frame_events.clear();
        Ok(())
    }
}
