//! Audio dispatch
//!
//! The simulation never touches audio. It records `GameEvent`s, and the
//! `AudioDirector` turns them into fire-and-forget calls on an `AudioSink`
//! after each tick. Synthesis itself belongs to the sink implementation.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Opaque handle to a looping sound started by a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

/// Sound output backend
///
/// Calls never block and never report failure; a sink that cannot play
/// simply stays silent.
pub trait AudioSink {
    fn play_shoot(&mut self);
    fn play_enemy_killed(&mut self);
    fn play_player_death(&mut self);
    /// One note of the four-note march (`index` in 0..4)
    fn play_bass_step(&mut self, index: u8);
    fn play_bonus_loop_start(&mut self) -> SoundHandle;
    fn stop_bonus_loop(&mut self, handle: SoundHandle);

    /// Master volume (0.0 - 1.0)
    fn set_volume(&mut self, _volume: f32) {}
}

/// Silent sink for headless runs
#[derive(Debug, Default)]
pub struct NullAudio {
    next_handle: u32,
}

impl AudioSink for NullAudio {
    fn play_shoot(&mut self) {}
    fn play_enemy_killed(&mut self) {}
    fn play_player_death(&mut self) {}
    fn play_bass_step(&mut self, _index: u8) {}

    fn play_bonus_loop_start(&mut self) -> SoundHandle {
        self.next_handle = self.next_handle.wrapping_add(1);
        SoundHandle(self.next_handle)
    }

    fn stop_bonus_loop(&mut self, _handle: SoundHandle) {}
}

/// A call received by a `RecordingAudio`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCall {
    Shoot,
    EnemyKilled,
    PlayerDeath,
    BassStep(u8),
    BonusLoopStart(SoundHandle),
    BonusLoopStop(SoundHandle),
}

/// Sink that remembers every call, for tests and replay inspection
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub calls: Vec<SoundCall>,
    pub volume: Option<f32>,
    next_handle: u32,
}

impl RecordingAudio {
    /// Loops started and not yet stopped
    pub fn active_loops(&self) -> Vec<SoundHandle> {
        let mut active = Vec::new();
        for call in &self.calls {
            match *call {
                SoundCall::BonusLoopStart(h) => active.push(h),
                SoundCall::BonusLoopStop(h) => active.retain(|a| *a != h),
                _ => {}
            }
        }
        active
    }
}

impl AudioSink for RecordingAudio {
    fn play_shoot(&mut self) {
        self.calls.push(SoundCall::Shoot);
    }

    fn play_enemy_killed(&mut self) {
        self.calls.push(SoundCall::EnemyKilled);
    }

    fn play_player_death(&mut self) {
        self.calls.push(SoundCall::PlayerDeath);
    }

    fn play_bass_step(&mut self, index: u8) {
        self.calls.push(SoundCall::BassStep(index));
    }

    fn play_bonus_loop_start(&mut self) -> SoundHandle {
        self.next_handle += 1;
        let handle = SoundHandle(self.next_handle);
        self.calls.push(SoundCall::BonusLoopStart(handle));
        handle
    }

    fn stop_bonus_loop(&mut self, handle: SoundHandle) {
        self.calls.push(SoundCall::BonusLoopStop(handle));
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = Some(volume);
    }
}

/// Maps simulation events onto a sink and owns the bonus loop handle
#[derive(Debug)]
pub struct AudioDirector {
    muted: bool,
    master_volume: f32,
    bonus_loop: Option<SoundHandle>,
}

impl AudioDirector {
    pub fn new(settings: &Settings) -> Self {
        Self {
            muted: settings.muted,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            bonus_loop: None,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Whether a bonus loop is currently playing
    pub fn bonus_loop(&self) -> Option<SoundHandle> {
        self.bonus_loop
    }

    /// Apply new preferences; muting cuts a running loop
    pub fn apply_settings(&mut self, settings: &Settings, sink: &mut dyn AudioSink) {
        self.muted = settings.muted;
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        sink.set_volume(settings.effective_volume());
        if self.muted {
            self.stop_loop(sink);
        }
    }

    /// Dispatch one tick's worth of events
    pub fn dispatch(&mut self, events: &[GameEvent], sink: &mut dyn AudioSink) {
        for event in events {
            match event {
                GameEvent::BonusGone | GameEvent::GameStarted | GameEvent::GameOver { .. } => {
                    self.stop_loop(sink)
                }
                _ if self.muted => {}
                GameEvent::Shoot => sink.play_shoot(),
                GameEvent::EnemyKilled { .. } | GameEvent::BonusHit { .. } => {
                    sink.play_enemy_killed()
                }
                GameEvent::PlayerHit { .. } => sink.play_player_death(),
                GameEvent::BassStep { index } => sink.play_bass_step(*index),
                GameEvent::BonusSpawned { .. } => {
                    self.stop_loop(sink);
                    self.bonus_loop = Some(sink.play_bonus_loop_start());
                }
                _ => {}
            }
        }
    }

    fn stop_loop(&mut self, sink: &mut dyn AudioSink) {
        if let Some(handle) = self.bonus_loop.take() {
            sink.stop_bonus_loop(handle);
        }
    }
}
