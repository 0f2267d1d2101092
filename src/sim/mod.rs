//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod boss;
pub mod camera;
pub mod enemy;
pub mod level;
pub mod particles;
pub mod player;
pub mod projectile;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use body::{MotionBody, Rect};
pub use boss::{Boss, BossPhase};
pub use camera::Camera;
pub use enemy::Enemy;
pub use level::{EmitterKind, HazardEmitter, TileKind, TileLevel, TileMap};
pub use particles::{Particle, ParticleKind, ParticleSystem};
pub use player::Player;
pub use projectile::{Projectile, ProjectileKind};
pub use rng::SimRng;
pub use snapshot::{EntityKind, EntityView, Snapshot};
pub use state::{GameState, NameEntry, Session, SessionConfig};
pub use tick::{Services, tick};
