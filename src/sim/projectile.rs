//! Boss shots and lava fireballs
//!
//! Both live in one list owned by the session; update dispatches on kind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::MotionBody;
use super::level::TileMap;
use super::particles::{ParticleKind, ParticleSystem};
use super::rng::SimRng;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Straight-line boss shot, no gravity
    Shot,
    /// Vertical ballistic fireball; `origin_y` is its launch height
    Fireball { origin_y: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: MotionBody,
    pub kind: ProjectileKind,
}

impl Projectile {
    pub fn shot(pos: Vec2, vel: Vec2) -> Self {
        let mut body = MotionBody::new(pos.x, pos.y, PROJECTILE_SIZE, PROJECTILE_SIZE);
        body.vel = vel;
        Self {
            body,
            kind: ProjectileKind::Shot,
        }
    }

    pub fn fireball(pos: Vec2, initial_vy: f32, size: f32) -> Self {
        let mut body = MotionBody::new(pos.x, pos.y, size, size);
        body.vel = Vec2::new(0.0, initial_vy);
        Self {
            body,
            kind: ProjectileKind::Fireball { origin_y: pos.y },
        }
    }

    pub fn is_fireball(&self) -> bool {
        matches!(self.kind, ProjectileKind::Fireball { .. })
    }

    pub fn update(
        &mut self,
        map: &TileMap,
        dt: f32,
        particles: &mut ParticleSystem,
        rng: &mut SimRng,
    ) {
        match self.kind {
            ProjectileKind::Shot => self.update_shot(map, dt),
            ProjectileKind::Fireball { origin_y } => {
                self.update_fireball(map, dt, origin_y, particles, rng)
            }
        }
    }

    fn update_shot(&mut self, map: &TileMap, dt: f32) {
        let body = &mut self.body;
        body.pos.x += body.vel.x * dt;
        if map.resolve_collisions(body) {
            body.alive = false;
        }
        body.pos.y += body.vel.y * dt;
        if map.resolve_collisions(body) {
            body.alive = false;
        }

        let m = PROJECTILE_EXIT_MARGIN;
        if body.pos.x < -m
            || body.pos.y < -m
            || body.pos.x > map.pixel_width() + m
            || body.pos.y > map.pixel_height() + m
        {
            body.alive = false;
        }
    }

    fn update_fireball(
        &mut self,
        map: &TileMap,
        dt: f32,
        origin_y: f32,
        particles: &mut ParticleSystem,
        rng: &mut SimRng,
    ) {
        let body = &mut self.body;
        body.apply_gravity(GRAVITY, MAX_FALL_SPEED, dt);
        body.pos.y += body.vel.y * dt;

        particles.burst(rng, body.center(), ParticleKind::Fireball, 1, 50.0);

        if map.resolve_collisions(body) {
            body.alive = false;
            return;
        }
        // Fell back into the pit it came from
        if body.vel.y > 0.0 && body.pos.y >= origin_y {
            body.alive = false;
        }
        if body.pos.y > map.pixel_height() + FIREBALL_FALL_MARGIN {
            body.alive = false;
        }
    }
}
