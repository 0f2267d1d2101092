//! Retro Platformer - A tile-based 2D platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile collision, actors, session state machine)
//! - `input`: Logical actions mapped from physical keys
//! - `audio`: Fire-and-forget sound event sink
//! - `persistence`: High-score storage
//! - `app`: Fixed-timestep driver
//! - `levels`: Built-in level maps

pub mod app;
pub mod audio;
pub mod error;
pub mod highscores;
pub mod input;
pub mod levels;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use app::App;
pub use error::PlatformerError;
pub use highscores::{HighScoreEntry, HighScores};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest wall-clock delta accepted per frame (avoids spiral of death on stalls)
    pub const MAX_FRAME_DT: f32 = 0.05;
    /// Maximum substeps per frame
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Tile edge length in pixels
    pub const TILE_SIZE: f32 = 16.0;

    /// Physics (px/s², tuned against a 320x180 view)
    pub const GRAVITY: f32 = 1200.0;
    pub const MAX_FALL_SPEED: f32 = 800.0;

    /// Player movement
    pub const PLAYER_WIDTH: f32 = 12.0;
    pub const PLAYER_HEIGHT: f32 = 14.0;
    pub const PLAYER_MOVE_ACCEL: f32 = 900.0;
    pub const PLAYER_AIR_ACCEL: f32 = 600.0;
    pub const PLAYER_MAX_SPEED: f32 = 120.0;
    /// Multiplicative damping per tick when no direction is held
    pub const FRICTION_GROUND: f32 = 0.82;
    pub const FRICTION_AIR: f32 = 0.92;
    pub const JUMP_VELOCITY: f32 = 310.0;
    /// Seconds after leaving ground during which a jump is still honored
    pub const COYOTE_TIME: f32 = 0.08;
    /// Seconds an early jump press is remembered
    pub const JUMP_BUFFER_TIME: f32 = 0.1;
    /// Post-respawn grace period
    pub const RESPAWN_INVINCIBILITY: f32 = 0.4;
    /// How far below the map the player may fall before dying
    pub const PLAYER_FALL_MARGIN: f32 = 40.0;

    /// Enemy patrol
    pub const ENEMY_SIZE: f32 = 12.0;
    pub const ENEMY_SPEED: f32 = 40.0;
    pub const ENEMY_FALL_MARGIN: f32 = 200.0;

    /// Boss
    pub const BOSS_WIDTH: f32 = 18.0;
    pub const BOSS_HEIGHT: f32 = 16.0;
    pub const BOSS_BASE_SPEED: f32 = 45.0;
    pub const BOSS_MAX_HP: i32 = 5;
    pub const BOSS_INVULN_TIME: f32 = 0.4;
    pub const BOSS_FIRST_SHOT_DELAY: f32 = 1.2;
    pub const BOSS_FIRST_JUMP_DELAY: f32 = 1.8;
    /// Jump timer floor while in phase 1 (no jumps happen)
    pub const BOSS_IDLE_JUMP_FLOOR: f32 = 0.5;
    pub const BOSS_JUMP_IMPULSE: f32 = 260.0;
    pub const BOSS_SHOT_SPEED: f32 = 110.0;

    /// Projectiles and fireballs
    pub const PROJECTILE_SIZE: f32 = 4.0;
    pub const PROJECTILE_EXIT_MARGIN: f32 = 20.0;
    pub const FIREBALL_SIZE: f32 = 12.0;
    pub const FIREBALL_FALL_MARGIN: f32 = 60.0;

    /// Hazard emitters
    pub const LAVA_EMITTER_INTERVAL: f32 = 2.2;
    pub const FAST_EMITTER_INTERVAL: f32 = 1.1;
    pub const SLOW_EMITTER_INTERVAL: f32 = 1.6;
    pub const FAST_EMITTER_SIZE: f32 = 16.0;
    pub const SLOW_EMITTER_SIZE: f32 = 12.0;
    pub const FAST_EMITTER_POWER: f32 = 540.0;
    pub const SLOW_EMITTER_POWER: f32 = 500.0;
    pub const FAST_EMITTER_RANDOMNESS: f32 = 100.0;
    pub const SLOW_EMITTER_RANDOMNESS: f32 = 80.0;

    /// Stomp detection: minimum downward speed and maximum top-edge overlap
    pub const STOMP_MIN_FALL_SPEED: f32 = 60.0;
    pub const ENEMY_STOMP_DEPTH: f32 = 10.0;
    pub const BOSS_STOMP_DEPTH: f32 = 12.0;
    /// Bounce after a stomp, as a fraction of jump velocity
    pub const ENEMY_STOMP_BOUNCE: f32 = 0.6;
    pub const BOSS_STOMP_BOUNCE: f32 = 0.75;

    /// Camera shakes as (magnitude px, seconds)
    pub const SHAKE_STOMP: (f32, f32) = (1.5, 0.2);
    pub const SHAKE_BOSS_HIT: (f32, f32) = (2.1, 0.25);
    pub const SHAKE_GOAL: (f32, f32) = (1.2, 0.25);
    pub const SHAKE_DEATH: (f32, f32) = (2.3, 0.35);

    /// Scoring
    pub const SCORE_STOMP: u64 = 100;
    pub const SCORE_BOSS_HIT: u64 = 300;
    pub const SCORE_GOAL: u64 = 500;
    pub const SCORE_COMPLETION_BONUS: u64 = 2000;

    /// Session
    pub const STARTING_LIVES: i32 = 3;
    pub const DEAD_DISPLAY_TIME: f32 = 1.0;
    pub const LEVEL_COMPLETE_DISPLAY_TIME: f32 = 1.2;
    pub const MAX_NAME_LEN: usize = 3;

    /// Default viewport (pixels)
    pub const VIEW_WIDTH: f32 = 320.0;
    pub const VIEW_HEIGHT: f32 = 180.0;
}

/// Decrement a countdown timer while it is still running
#[inline]
pub fn count_down(value: f32, amount: f32) -> f32 {
    if value > 0.0 { value - amount } else { value }
}
