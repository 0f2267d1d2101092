//! Sound events emitted by the simulation
//!
//! The simulation only names what happened; synthesis lives behind
//! `AudioSink`, which is fire-and-forget and must never fail.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Enemy stomped
    Stomp,
    /// Player died
    Hit,
    /// Game started from the title screen
    Coin,
    /// Goal reached
    Goal,
    /// Boss fired a projectile
    Shoot,
    /// Boss lost a hit point
    BossHit,
    /// Boss defeated
    BossDie,
}

impl SoundEffect {
    /// Stable event name handed to audio backends
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Stomp => "stomp",
            SoundEffect::Hit => "hit",
            SoundEffect::Coin => "coin",
            SoundEffect::Goal => "goal",
            SoundEffect::Shoot => "shoot",
            SoundEffect::BossHit => "bossHit",
            SoundEffect::BossDie => "bossDie",
        }
    }
}

/// Fire-and-forget audio playback
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Keeps every event in order (replays, tests)
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    pub events: Vec<SoundEffect>,
}

impl RecordingAudio {
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.events.iter().filter(|e| **e == effect).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.events.push(effect);
    }
}

/// Audio manager for headless runs: resolves volume and logs each event
#[derive(Debug, Clone)]
pub struct LogAudio {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("sfx {} (vol {:.2})", effect.name(), vol);
    }
}
