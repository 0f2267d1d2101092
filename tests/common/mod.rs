#![allow(dead_code)]

use retro_platformer::audio::RecordingAudio;
use retro_platformer::consts::SIM_DT;
use retro_platformer::input::KeyboardState;
use retro_platformer::persistence::MemoryStore;
use retro_platformer::sim::{GameState, Services, Session, SessionConfig, tick};

/// Session plus recording collaborators, stepped one fixed tick at a time
pub struct Harness {
    pub session: Session,
    pub audio: RecordingAudio,
    pub scores: MemoryStore,
    pub input: KeyboardState,
}

impl Harness {
    pub fn new(levels: &[&str]) -> Self {
        let levels = levels.iter().map(|s| s.to_string()).collect();
        let config = SessionConfig {
            seed: 1234,
            ..Default::default()
        };
        Self {
            session: Session::new(levels, config).unwrap(),
            audio: RecordingAudio::default(),
            scores: MemoryStore::new(),
            input: KeyboardState::default(),
        }
    }

    /// Leave the title screen
    pub fn start(levels: &[&str]) -> Self {
        let mut h = Self::new(levels);
        h.tap("Enter");
        assert_eq!(h.session.state, GameState::Play);
        h
    }

    pub fn step(&mut self) {
        let mut services = Services {
            audio: &mut self.audio,
            scores: &mut self.scores,
        };
        tick(&mut self.session, &self.input, &mut services, SIM_DT);
        self.input.end_tick();
    }

    pub fn tap(&mut self, key: &str) {
        self.input.key_down(key);
        self.step();
        self.input.key_up(key);
    }

    pub fn run(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Step until `state` is reached. Returns the ticks taken, or None past `limit`.
    pub fn run_until(&mut self, state: GameState, limit: usize) -> Option<usize> {
        for n in 1..=limit {
            self.step();
            if self.session.state == state {
                return Some(n);
            }
        }
        None
    }
}
