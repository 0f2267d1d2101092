//! Boss controller
//!
//! The boss has no explicit state machine: its phase is recomputed from
//! `hp` every tick, and each phase scales movement, jump and shot cadence.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::MotionBody;
use super::camera::Camera;
use super::level::TileMap;
use super::particles::{ParticleKind, ParticleSystem};
use super::projectile::Projectile;
use super::rng::SimRng;
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::count_down;

/// Difficulty tier derived from remaining hit points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BossPhase {
    One = 1,
    Two = 2,
    Three = 3,
}

impl BossPhase {
    pub fn from_hp(hp: u8) -> Self {
        match hp {
            4.. => BossPhase::One,
            2..=3 => BossPhase::Two,
            _ => BossPhase::Three,
        }
    }

    #[inline]
    fn tier(self) -> f32 {
        (self as u8 - 1) as f32
    }

    pub fn speed_multiplier(self) -> f32 {
        match self {
            BossPhase::One => 1.0,
            BossPhase::Two => 1.35,
            BossPhase::Three => 1.7,
        }
    }

    pub fn shoot_interval(self) -> f32 {
        match self {
            BossPhase::One => 1.8,
            BossPhase::Two => 1.0,
            BossPhase::Three => 0.6,
        }
    }

    /// `None` in phase 1: the boss stays grounded
    pub fn jump_interval(self) -> Option<f32> {
        match self {
            BossPhase::One => None,
            BossPhase::Two => Some(1.9),
            BossPhase::Three => Some(1.2),
        }
    }

    pub fn jump_strength(self) -> f32 {
        BOSS_JUMP_IMPULSE * (1.0 + self.tier() * 0.2)
    }

    pub fn shot_speed(self) -> f32 {
        BOSS_SHOT_SPEED * (1.0 + self.tier() * 0.3)
    }

    /// Steepest upward shot allowed, in degrees above horizontal
    pub fn max_up_angle_deg(self) -> f32 {
        match self {
            BossPhase::One => 20.0,
            BossPhase::Two => 35.0,
            BossPhase::Three => 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub body: MotionBody,
    /// 0..=BOSS_MAX_HP
    pub hp: u8,
    pub invuln: f32,
    pub shoot_timer: f32,
    pub jump_timer: f32,
    pub dir: f32,
}

impl Boss {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: MotionBody::new(x, y, BOSS_WIDTH, BOSS_HEIGHT),
            hp: BOSS_MAX_HP as u8,
            invuln: 0.0,
            shoot_timer: BOSS_FIRST_SHOT_DELAY,
            jump_timer: BOSS_FIRST_JUMP_DELAY,
            dir: -1.0,
        }
    }

    pub fn phase(&self) -> BossPhase {
        BossPhase::from_hp(self.hp)
    }

    pub fn is_alive(&self) -> bool {
        self.body.alive
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln > 0.0
    }

    pub fn update(
        &mut self,
        map: &TileMap,
        dt: f32,
        target: &MotionBody,
        projectiles: &mut Vec<Projectile>,
        audio: &mut dyn AudioSink,
    ) {
        let phase = self.phase();

        self.patrol(map, phase, dt);

        match phase.jump_interval() {
            Some(interval) => {
                self.jump_timer -= dt;
                if self.jump_timer <= 0.0 {
                    self.body.vel.y = -phase.jump_strength();
                    self.jump_timer = interval;
                }
            }
            None => self.jump_timer = self.jump_timer.max(BOSS_IDLE_JUMP_FLOOR),
        }

        self.shoot_timer -= dt;
        if self.shoot_timer <= 0.0 {
            let vel = self.aim(target.center(), phase);
            projectiles.push(Projectile::shot(self.body.center(), vel));
            audio.play(SoundEffect::Shoot);
            self.shoot_timer = phase.shoot_interval();
        }

        self.invuln = count_down(self.invuln, dt);
    }

    /// Walk back and forth, reversing on walls only
    fn patrol(&mut self, map: &TileMap, phase: BossPhase, dt: f32) {
        let body = &mut self.body;
        body.vel.x = self.dir * BOSS_BASE_SPEED * phase.speed_multiplier();
        body.apply_gravity(GRAVITY, MAX_FALL_SPEED, dt);

        body.pos.x += body.vel.x * dt;
        if map.resolve_collisions(body) {
            self.dir = -self.dir;
        }

        body.pos.y += body.vel.y * dt;
        if map.resolve_collisions(body) {
            body.on_ground = body.vel.y > 0.0;
            body.vel.y = 0.0;
        } else {
            body.on_ground = false;
        }
    }

    /// Velocity toward `target`, with the upward angle limited per phase
    pub fn aim(&self, target: Vec2, phase: BossPhase) -> Vec2 {
        let mut d = target - self.body.center();

        // y grows downward: negative dy means the target is above
        if d.y < 0.0 {
            let max_up = d.x.abs() * phase.max_up_angle_deg().to_radians().tan();
            if -d.y > max_up {
                d.y = -max_up;
            }
        }

        let len = d.length();
        let dir = if len < 0.001 {
            Vec2::new(self.dir, 0.0)
        } else {
            d / len
        };
        dir * phase.shot_speed()
    }

    /// Register a stomp. Returns false when the hit is ignored.
    pub fn take_hit(
        &mut self,
        audio: &mut dyn AudioSink,
        particles: &mut ParticleSystem,
        camera: &mut Camera,
        rng: &mut SimRng,
    ) -> bool {
        if self.is_invulnerable() || !self.body.alive {
            return false;
        }

        self.hp = self.hp.saturating_sub(1);
        self.invuln = BOSS_INVULN_TIME;
        particles.burst(rng, self.body.center(), ParticleKind::Boss, 18, 200.0);
        camera.add_shake(SHAKE_BOSS_HIT.0, SHAKE_BOSS_HIT.1);

        if self.hp > 0 {
            audio.play(SoundEffect::BossHit);
            log::debug!("Boss hit, {} hp left", self.hp);
        } else {
            self.body.alive = false;
            audio.play(SoundEffect::BossDie);
            log::info!("Boss defeated");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;

    const ARENA: &str = "--------------------\n--------------------\n--------------------\n--------------------\nXXXXXXXXXXXXXXXXXXXX";

    #[test]
    fn test_phase_thresholds() {
        assert_eq!(BossPhase::from_hp(5), BossPhase::One);
        assert_eq!(BossPhase::from_hp(4), BossPhase::One);
        assert_eq!(BossPhase::from_hp(3), BossPhase::Two);
        assert_eq!(BossPhase::from_hp(2), BossPhase::Two);
        assert_eq!(BossPhase::from_hp(1), BossPhase::Three);
    }

    #[test]
    fn test_phase_tracks_hp_every_call() {
        let mut boss = Boss::new(0.0, 0.0);
        assert_eq!(boss.phase(), BossPhase::One);
        boss.hp = 2;
        assert_eq!(boss.phase(), BossPhase::Two);
        boss.hp = 1;
        assert_eq!(boss.phase(), BossPhase::Three);
    }

    #[test]
    fn test_phase_scaling() {
        assert_eq!(BossPhase::One.shot_speed(), 110.0);
        assert!((BossPhase::Three.shot_speed() - 176.0).abs() < 1e-3);
        assert!((BossPhase::Two.jump_strength() - 312.0).abs() < 1e-3);
        assert!(BossPhase::One.jump_interval().is_none());
    }

    #[test]
    fn test_aim_clamps_steep_upward_shots() {
        let boss = Boss::new(100.0, 100.0);
        let center = boss.body.center();
        // Almost straight up
        let vel = boss.aim(center + Vec2::new(10.0, -200.0), BossPhase::One);
        let angle = (-vel.y).atan2(vel.x.abs()).to_degrees();
        assert!(angle <= 20.0 + 1e-3, "angle {angle}");
        assert!((vel.length() - 110.0).abs() < 1e-3);
    }

    #[test]
    fn test_aim_does_not_clamp_downward() {
        let boss = Boss::new(100.0, 100.0);
        let center = boss.body.center();
        let vel = boss.aim(center + Vec2::new(0.0, 100.0), BossPhase::One);
        assert!(vel.x.abs() < 1e-4);
        assert!((vel.y - 110.0).abs() < 1e-3);
    }

    #[test]
    fn test_aim_directly_above_falls_back_to_horizontal() {
        let boss = Boss::new(100.0, 100.0);
        let center = boss.body.center();
        let vel = boss.aim(center + Vec2::new(0.0, -50.0), BossPhase::Two);
        assert_eq!(vel.y, 0.0);
        assert!((vel.x + BossPhase::Two.shot_speed()).abs() < 1e-3);
    }

    #[test]
    fn test_take_hit_respects_invulnerability() {
        let mut boss = Boss::new(0.0, 0.0);
        let mut audio = RecordingAudio::default();
        let mut particles = ParticleSystem::new();
        let mut camera = Camera::new(320.0, 180.0);
        let mut rng = SimRng::new(5);

        assert!(boss.take_hit(&mut audio, &mut particles, &mut camera, &mut rng));
        assert_eq!(boss.hp, 4);
        assert!(!boss.take_hit(&mut audio, &mut particles, &mut camera, &mut rng));
        assert_eq!(boss.hp, 4);
        assert_eq!(audio.count(SoundEffect::BossHit), 1);
        assert!(camera.is_shaking());
    }

    #[test]
    fn test_last_hit_kills() {
        let mut boss = Boss::new(0.0, 0.0);
        boss.hp = 1;
        let mut audio = RecordingAudio::default();
        let mut particles = ParticleSystem::new();
        let mut camera = Camera::new(320.0, 180.0);
        let mut rng = SimRng::new(5);

        assert!(boss.take_hit(&mut audio, &mut particles, &mut camera, &mut rng));
        assert_eq!(boss.hp, 0);
        assert!(!boss.is_alive());
        assert_eq!(audio.events, vec![SoundEffect::BossDie]);

        boss.invuln = 0.0;
        assert!(!boss.take_hit(&mut audio, &mut particles, &mut camera, &mut rng));
    }

    #[test]
    fn test_shoots_on_schedule() {
        let map = TileMap::parse(ARENA);
        let mut boss = Boss::new(200.0, 40.0);
        let player = MotionBody::new(20.0, 50.0, PLAYER_WIDTH, PLAYER_HEIGHT);
        let mut projectiles = Vec::new();
        let mut audio = RecordingAudio::default();

        // First shot at 1.2s, then every 1.8s in phase 1
        for _ in 0..(60.0 * 3.1) as usize {
            boss.update(&map, SIM_DT, &player, &mut projectiles, &mut audio);
        }
        assert_eq!(projectiles.len(), 2);
        assert_eq!(audio.count(SoundEffect::Shoot), 2);
        assert!(projectiles.iter().all(|p| p.body.vel.x < 0.0));
    }

    #[test]
    fn test_phase_one_never_jumps() {
        let map = TileMap::parse(ARENA);
        let mut boss = Boss::new(200.0, 46.0);
        let player = MotionBody::new(20.0, 50.0, PLAYER_WIDTH, PLAYER_HEIGHT);
        let mut projectiles = Vec::new();
        let mut audio = RecordingAudio::default();
        for _ in 0..60 * 5 {
            boss.update(&map, SIM_DT, &player, &mut projectiles, &mut audio);
            assert!(boss.body.vel.y >= 0.0);
        }
        assert!(boss.jump_timer >= BOSS_IDLE_JUMP_FLOOR);
    }

    #[test]
    fn test_phase_two_jumps() {
        let map = TileMap::parse(ARENA);
        let mut boss = Boss::new(200.0, 46.0);
        boss.hp = 3;
        let player = MotionBody::new(20.0, 50.0, PLAYER_WIDTH, PLAYER_HEIGHT);
        let mut projectiles = Vec::new();
        let mut audio = RecordingAudio::default();
        let mut jumped = false;
        for _ in 0..60 * 3 {
            boss.update(&map, SIM_DT, &player, &mut projectiles, &mut audio);
            if boss.body.vel.y < -200.0 {
                jumped = true;
            }
        }
        assert!(jumped);
    }
}
