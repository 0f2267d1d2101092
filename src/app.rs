//! Fixed-timestep driver
//!
//! Owns a session plus its collaborators and turns variable frame deltas
//! into whole simulation ticks.

use crate::audio::AudioSink;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::Result;
use crate::input::KeyboardState;
use crate::persistence::ScoreStore;
use crate::settings::Settings;
use crate::sim::{Services, Session, SessionConfig, Snapshot, tick};

/// Game instance holding all state
pub struct App<A: AudioSink, S: ScoreStore> {
    pub session: Session,
    /// Feed key events here between frames
    pub input: KeyboardState,
    audio: A,
    scores: S,
    accumulator: f32,
}

impl<A: AudioSink, S: ScoreStore> App<A, S> {
    pub fn new(levels: Vec<String>, settings: &Settings, audio: A, mut scores: S) -> Result<Self> {
        let mut session = Session::new(levels, SessionConfig::from_settings(settings))?;
        session.high_scores = scores.load_scores();
        log::info!("Game initialized with seed: {}", session.seed());
        Ok(Self {
            session,
            input: KeyboardState::new(settings.bindings.clone()),
            audio,
            scores,
            accumulator: 0.0,
        })
    }

    /// Advance by one rendered frame. Returns how many ticks ran.
    pub fn frame(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let mut services = Services {
                audio: &mut self.audio,
                scores: &mut self.scores,
            };
            tick(&mut self.session, &self.input, &mut services, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Presses count for exactly one tick
            self.input.end_tick();
        }
        substeps
    }

    /// Render/HUD view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.session)
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }
}
