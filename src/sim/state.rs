//! Session state
//!
//! Everything the orchestrator mutates during a tick lives on `Session`.
//! Transitions themselves are driven by `tick`; the methods here are the
//! level-loading and reset building blocks it uses.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::level::TileLevel;
use super::particles::ParticleSystem;
use super::player::Player;
use super::projectile::Projectile;
use super::rng::SimRng;
use crate::consts::*;
use crate::error::{PlatformerError, Result};
use crate::highscores::HighScores;
use crate::settings::Settings;

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Waiting for start
    Title,
    /// Active gameplay
    Play,
    /// Short pause after losing a life
    Dead,
    /// Short pause after reaching the goal
    LevelComplete,
    /// All levels cleared; name entry
    Win,
    /// Out of lives; name entry
    GameOver,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Title => "TITLE",
            GameState::Play => "PLAY",
            GameState::Dead => "DEAD",
            GameState::LevelComplete => "LEVEL_COMPLETE",
            GameState::Win => "WIN",
            GameState::GameOver => "GAME_OVER",
        }
    }

    /// States that end a run and ask for initials
    pub fn is_final(&self) -> bool {
        matches!(self, GameState::Win | GameState::GameOver)
    }
}

/// Initials typed on the WIN/GAME_OVER screens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    pub initials: String,
    /// Set once the score has been recorded
    pub confirmed: bool,
}

impl NameEntry {
    pub fn clear(&mut self) {
        self.initials.clear();
        self.confirmed = false;
    }

    pub fn is_full(&self) -> bool {
        self.initials.len() >= MAX_NAME_LEN
    }
}

/// Session-wide parameters fixed at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub seed: u64,
    pub view_width: f32,
    pub view_height: f32,
    pub starting_lives: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl SessionConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            seed: settings.resolve_seed(),
            view_width: settings.view_width,
            view_height: settings.view_height,
            starting_lives: settings.starting_lives,
        }
    }
}

/// A play session: the current run plus everything needed to restart it
#[derive(Debug, Clone)]
pub struct Session {
    pub rng: SimRng,
    levels: Vec<String>,
    pub level_index: usize,
    pub level: TileLevel,
    pub player: Player,
    /// Boss shots and fireballs, in spawn order
    pub projectiles: Vec<Projectile>,
    pub particles: ParticleSystem,
    pub camera: Camera,
    pub score: u64,
    /// Goes negative on the last death, right before GAME_OVER
    pub lives: i32,
    pub state: GameState,
    /// Countdown for DEAD and LEVEL_COMPLETE
    pub state_timer: f32,
    /// Seconds since construction, all states; drives emitter phases
    pub elapsed: f32,
    pub time_ticks: u64,
    pub name_entry: NameEntry,
    pub show_scoreboard: bool,
    pub high_scores: HighScores,
    config: SessionConfig,
}

impl Session {
    /// Start a session on the first level, in TITLE
    pub fn new(levels: Vec<String>, config: SessionConfig) -> Result<Self> {
        let first = levels.first().ok_or(PlatformerError::NoLevels)?;
        let mut rng = SimRng::new(config.seed);
        let level = TileLevel::parse(first, &mut rng);
        let player = Player::new(level.player_start);
        let mut camera = Camera::new(config.view_width, config.view_height);
        camera.seed_jitter(config.seed);
        camera.set_world_size(level.map.pixel_width(), level.map.pixel_height());

        log::info!("New session: {} levels, seed {}", levels.len(), config.seed);

        Ok(Self {
            rng,
            levels,
            level_index: 0,
            level,
            player,
            projectiles: Vec::new(),
            particles: ParticleSystem::new(),
            camera,
            score: 0,
            lives: config.starting_lives,
            state: GameState::Title,
            state_timer: 0.0,
            elapsed: 0.0,
            time_ticks: 0,
            name_entry: NameEntry::default(),
            show_scoreboard: false,
            high_scores: HighScores::new(),
            config,
        })
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn view_size(&self) -> Vec2 {
        Vec2::new(self.config.view_width, self.config.view_height)
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    /// True while WIN/GAME_OVER still accepts initials
    pub fn is_entering_name(&self) -> bool {
        self.state.is_final() && !self.name_entry.confirmed && !self.name_entry.is_full()
    }

    /// Change state, resetting the display timer
    pub(crate) fn set_state(&mut self, state: GameState, timer: f32) {
        if self.state != state {
            log::info!("State {} -> {}", self.state.as_str(), state.as_str());
        }
        self.state = state;
        self.state_timer = timer;
    }

    /// Parse level `index` and move the player to its start.
    /// Returns false if there is no such level.
    pub(crate) fn load_level(&mut self, index: usize) -> bool {
        let Some(text) = self.levels.get(index) else {
            return false;
        };
        self.level_index = index;
        self.level = TileLevel::parse(text, &mut self.rng);
        self.camera
            .set_world_size(self.level.map.pixel_width(), self.level.map.pixel_height());
        self.player.spawn = self.level.player_start;
        self.player.respawn();
        self.projectiles.clear();
        log::info!("Loaded level {}/{}", index + 1, self.levels.len());
        true
    }

    /// Jump straight into PLAY on level `index` (developer shortcut).
    /// Returns false if the index is out of range.
    pub fn goto_level(&mut self, index: usize) -> bool {
        if !self.load_level(index) {
            log::warn!("No level {} (have {})", index + 1, self.levels.len());
            return false;
        }
        self.particles.clear();
        self.set_state(GameState::Play, 0.0);
        true
    }

    /// Back to TITLE on the first level with a fresh score and lives
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.load_level(0);
        self.name_entry.clear();
        self.show_scoreboard = false;
        self.set_state(GameState::Title, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: &str = "------\n-P--G-\nXXXXXX";
    const TWO: &str = "--------\n-----P--\nXXXXXXXX";

    fn session() -> Session {
        Session::new(vec![ONE.to_string(), TWO.to_string()], SessionConfig::default()).unwrap()
    }

    #[test]
    fn test_new_starts_on_title() {
        let s = session();
        assert_eq!(s.state, GameState::Title);
        assert_eq!(s.lives, STARTING_LIVES);
        assert_eq!(s.level_index, 0);
        assert_eq!(s.player.body.pos, Vec2::new(18.0, 18.0));
        assert_eq!(s.level_count(), 2);
    }

    #[test]
    fn test_new_rejects_empty_level_list() {
        let result = Session::new(Vec::new(), SessionConfig::default());
        assert!(matches!(result, Err(PlatformerError::NoLevels)));
    }

    #[test]
    fn test_goto_level() {
        let mut s = session();
        s.projectiles.push(Projectile::shot(Vec2::ZERO, Vec2::X));
        assert!(s.goto_level(1));
        assert_eq!(s.state, GameState::Play);
        assert_eq!(s.level_index, 1);
        assert_eq!(s.player.body.pos, Vec2::new(82.0, 18.0));
        assert!(s.projectiles.is_empty());
        assert!(!s.goto_level(5));
        assert_eq!(s.level_index, 1);
    }

    #[test]
    fn test_reset_restores_run() {
        let mut s = session();
        s.goto_level(1);
        s.score = 1200;
        s.lives = -1;
        s.state = GameState::GameOver;
        s.name_entry.initials = "AB".into();
        s.show_scoreboard = true;
        s.reset();
        assert_eq!(s.state, GameState::Title);
        assert_eq!((s.score, s.lives, s.level_index), (0, STARTING_LIVES, 0));
        assert!(s.name_entry.initials.is_empty());
        assert!(!s.show_scoreboard);
    }

    #[test]
    fn test_name_entry_window() {
        let mut s = session();
        assert!(!s.is_entering_name());
        s.state = GameState::Win;
        assert!(s.is_entering_name());
        s.name_entry.initials = "ABC".into();
        assert!(!s.is_entering_name());
        s.name_entry.initials = "A".into();
        s.name_entry.confirmed = true;
        assert!(!s.is_entering_name());
    }

    #[test]
    fn test_same_seed_same_level() {
        let config = SessionConfig {
            seed: 5,
            ..Default::default()
        };
        let a = Session::new(vec!["----\n-L--\nXXXX".into()], config).unwrap();
        let b = Session::new(vec!["----\n-L--\nXXXX".into()], config).unwrap();
        assert_eq!(a.level.emitters()[0].offset, b.level.emitters()[0].offset);
    }
}
