//! Ephemeral visual particles
//!
//! Purely cosmetic: nothing in gameplay reads particle state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::SimRng;

/// Gravity applied to particles (lighter than actor gravity)
pub const PARTICLE_GRAVITY: f32 = 800.0;

/// Maximum live particles; the oldest are evicted past this
pub const MAX_PARTICLES: usize = 1024;

/// Palette tag the renderer maps to a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Spark,
    Enemy,
    Boss,
    Projectile,
    Fireball,
    Flag,
    White,
}

/// Confetti palette cycled across the win celebration columns
pub const CONFETTI_PALETTE: [ParticleKind; 6] = [
    ParticleKind::Flag,
    ParticleKind::Spark,
    ParticleKind::Projectile,
    ParticleKind::Enemy,
    ParticleKind::Boss,
    ParticleKind::White,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
    pub kind: ParticleKind,
    pub size: f32,
}

impl Particle {
    fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel.y += PARTICLE_GRAVITY * dt;
        self.life -= dt;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// Radial burst in every direction
    pub fn burst(
        &mut self,
        rng: &mut SimRng,
        at: Vec2,
        kind: ParticleKind,
        count: usize,
        speed: f32,
    ) {
        for _ in 0..count {
            let angle = rng.next_f32() * std::f32::consts::TAU;
            let v = speed * (0.5 + rng.next_f32());
            let life = 0.4 + rng.next_f32() * 0.5;
            let size = 2.0 + (rng.next_f32() * 2.0).floor();
            self.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * v,
                life,
                kind,
                size,
            });
        }
    }

    /// Upward confetti fan (straight up, ±35°)
    pub fn confetti_up(
        &mut self,
        rng: &mut SimRng,
        at: Vec2,
        kind: ParticleKind,
        count: usize,
        base_speed: f32,
    ) {
        for _ in 0..count {
            let spread = (rng.next_f32() - 0.5) * (std::f32::consts::PI * 0.39);
            let angle = -std::f32::consts::FRAC_PI_2 + spread;
            let v = base_speed * (0.7 + rng.next_f32() * 0.6);
            let life = 0.8 + rng.next_f32() * 0.9;
            let size = 2.0 + (rng.next_f32() * 2.0).floor();
            self.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * v,
                life,
                kind,
                size,
            });
        }
    }

    pub fn update(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.update(dt);
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_spawns_count() {
        let mut rng = SimRng::new(1);
        let mut particles = ParticleSystem::new();
        particles.burst(&mut rng, Vec2::new(10.0, 10.0), ParticleKind::Enemy, 14, 160.0);
        assert_eq!(particles.len(), 14);
        assert!(particles.particles().iter().all(|p| p.size == 2.0 || p.size == 3.0));
    }

    #[test]
    fn test_confetti_goes_up() {
        let mut rng = SimRng::new(2);
        let mut particles = ParticleSystem::new();
        particles.confetti_up(&mut rng, Vec2::ZERO, ParticleKind::Flag, 32, 420.0);
        assert!(particles.particles().iter().all(|p| p.vel.y < 0.0));
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = SimRng::new(3);
        let mut particles = ParticleSystem::new();
        particles.burst(&mut rng, Vec2::ZERO, ParticleKind::Spark, 10, 100.0);
        for _ in 0..60 {
            particles.update(1.0 / 60.0);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut rng = SimRng::new(4);
        let mut particles = ParticleSystem::new();
        particles.burst(&mut rng, Vec2::ZERO, ParticleKind::Spark, MAX_PARTICLES + 5, 100.0);
        assert_eq!(particles.len(), MAX_PARTICLES);
    }
}
