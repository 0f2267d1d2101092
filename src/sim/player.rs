//! Player controller: acceleration, friction, buffered/coyote jumps, gravity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::MotionBody;
use super::level::TileMap;
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::count_down;
use crate::input::{Action, InputSnapshot};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: MotionBody,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    /// Seconds a jump is still allowed after leaving the ground
    pub coyote_timer: f32,
    /// Seconds an early jump press stays queued
    pub jump_buffer_timer: f32,
    pub spawn: Vec2,
    /// Post-respawn grace; hits are ignored while positive
    pub invincible_time: f32,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: MotionBody::new(spawn.x, spawn.y, PLAYER_WIDTH, PLAYER_HEIGHT),
            facing: 1.0,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
            spawn,
            invincible_time: 0.0,
        }
    }

    /// Back to the spawn point without recreating the player
    pub fn respawn(&mut self) {
        self.body.pos = self.spawn;
        self.body.vel = Vec2::ZERO;
        self.body.alive = true;
        self.invincible_time = RESPAWN_INVINCIBILITY;
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_time > 0.0
    }

    pub fn update(
        &mut self,
        input: &dyn InputSnapshot,
        map: &TileMap,
        audio: &mut dyn AudioSink,
        dt: f32,
    ) {
        self.update_horizontal(input, dt);
        self.update_jump(input, audio, dt);
        self.body.apply_gravity(GRAVITY, MAX_FALL_SPEED, dt);
        self.integrate(map, dt);

        let max_x = (map.pixel_width() - self.body.size.x).max(0.0);
        self.body.pos.x = self.body.pos.x.clamp(0.0, max_x);
        if self.body.pos.y > map.pixel_height() + PLAYER_FALL_MARGIN {
            self.body.alive = false;
        }

        self.invincible_time = count_down(self.invincible_time, dt);
    }

    fn update_horizontal(&mut self, input: &dyn InputSnapshot, dt: f32) {
        let accel = if self.body.on_ground {
            PLAYER_MOVE_ACCEL
        } else {
            PLAYER_AIR_ACCEL
        };

        if input.is_down(Action::Left) {
            self.body.vel.x -= accel * dt;
            self.facing = -1.0;
        } else if input.is_down(Action::Right) {
            self.body.vel.x += accel * dt;
            self.facing = 1.0;
        } else if self.body.on_ground {
            self.body.vel.x *= FRICTION_GROUND;
        } else {
            self.body.vel.x *= FRICTION_AIR;
        }

        self.body.vel.x = self.body.vel.x.clamp(-PLAYER_MAX_SPEED, PLAYER_MAX_SPEED);
    }

    fn update_jump(&mut self, input: &dyn InputSnapshot, audio: &mut dyn AudioSink, dt: f32) {
        if input.pressed(Action::Jump) {
            self.jump_buffer_timer = JUMP_BUFFER_TIME;
        }
        self.jump_buffer_timer = count_down(self.jump_buffer_timer, dt);

        if self.body.on_ground {
            self.coyote_timer = COYOTE_TIME;
        } else {
            self.coyote_timer = count_down(self.coyote_timer, dt);
        }

        if self.coyote_timer > 0.0 && self.jump_buffer_timer > 0.0 {
            self.body.vel.y = -JUMP_VELOCITY;
            self.body.on_ground = false;
            self.coyote_timer = 0.0;
            self.jump_buffer_timer = 0.0;
            audio.play(SoundEffect::Jump);
        }
    }

    /// Move one axis at a time, resolving against tiles after each
    fn integrate(&mut self, map: &TileMap, dt: f32) {
        let body = &mut self.body;
        body.on_ground = false;

        body.pos.x += body.vel.x * dt;
        if map.resolve_collisions(body) {
            body.vel.x = 0.0;
        }

        body.pos.y += body.vel.y * dt;
        if map.resolve_collisions(body) {
            if body.vel.y > 0.0 {
                body.on_ground = true;
            }
            body.vel.y = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::input::KeyboardState;

    // Ledge at column 3; floor on row 4
    const LEDGE: &str = "----------\n----------\n----------\n----------\nXXXX------";

    fn settle(player: &mut Player, map: &TileMap, audio: &mut RecordingAudio) {
        let input = KeyboardState::default();
        for _ in 0..30 {
            player.update(&input, map, audio, SIM_DT);
        }
    }

    #[test]
    fn test_lands_on_floor() {
        let map = TileMap::parse(LEDGE);
        let mut audio = RecordingAudio::default();
        let mut player = Player::new(Vec2::new(2.0, 2.0));
        settle(&mut player, &map, &mut audio);
        assert!(player.body.on_ground);
        assert_eq!(player.body.bottom(), 64.0);
        assert_eq!(player.body.vel.y, 0.0);
    }

    #[test]
    fn test_jump_from_ground_plays_sound_once() {
        let map = TileMap::parse(LEDGE);
        let mut audio = RecordingAudio::default();
        let mut player = Player::new(Vec2::new(2.0, 2.0));
        settle(&mut player, &map, &mut audio);

        let mut input = KeyboardState::default();
        input.key_down("Space");
        player.update(&input, &map, &mut audio, SIM_DT);
        assert!(player.body.vel.y < 0.0);
        input.end_tick();
        for _ in 0..5 {
            player.update(&input, &map, &mut audio, SIM_DT);
        }
        assert_eq!(audio.count(SoundEffect::Jump), 1);
    }

    #[test]
    fn test_buffered_jump_fires_on_landing() {
        let map = TileMap::parse(LEDGE);
        let mut audio = RecordingAudio::default();
        // Floor is one pixel below; landing happens on the third tick
        let mut player = Player::new(Vec2::new(2.0, 49.0));
        let mut input = KeyboardState::default();
        input.key_down("Space");
        let mut jumped = false;
        for _ in 0..6 {
            player.update(&input, &map, &mut audio, SIM_DT);
            input.end_tick();
            if player.body.vel.y < -JUMP_VELOCITY * 0.9 {
                jumped = true;
                break;
            }
        }
        assert!(jumped);
        assert_eq!(audio.count(SoundEffect::Jump), 1);
    }

    /// Walk off the ledge, then press jump `delay_ticks` after the last grounded tick
    fn jump_after_leaving(delay_ticks: usize) -> bool {
        let map = TileMap::parse(LEDGE);
        let mut audio = RecordingAudio::default();
        let mut player = Player::new(Vec2::new(40.0, 2.0));
        settle(&mut player, &map, &mut audio);

        // Slide right until we leave the ground
        player.body.vel.x = PLAYER_MAX_SPEED;
        let mut input = KeyboardState::default();
        input.key_down("ArrowRight");
        let mut guard = 0;
        while player.body.on_ground && guard < 120 {
            player.update(&input, &map, &mut audio, SIM_DT);
            input.end_tick();
            guard += 1;
        }
        assert!(!player.body.on_ground);

        for _ in 1..delay_ticks {
            player.update(&input, &map, &mut audio, SIM_DT);
            input.end_tick();
        }
        input.key_down("Space");
        player.update(&input, &map, &mut audio, SIM_DT);
        audio.count(SoundEffect::Jump) == 1
    }

    #[test]
    fn test_coyote_window() {
        // 0.05s after leaving: still allowed
        assert!(jump_after_leaving(3));
        // 0.15s after leaving: too late
        assert!(!jump_after_leaving(9));
    }

    #[test]
    fn test_falls_off_map_dies() {
        let map = TileMap::parse("----\n----");
        let mut audio = RecordingAudio::default();
        let mut player = Player::new(Vec2::new(2.0, 2.0));
        let input = KeyboardState::default();
        for _ in 0..120 {
            player.update(&input, &map, &mut audio, SIM_DT);
        }
        assert!(!player.body.alive);
    }

    #[test]
    fn test_respawn_grants_grace() {
        let mut player = Player::new(Vec2::new(10.0, 20.0));
        player.body.pos = Vec2::new(100.0, 100.0);
        player.body.alive = false;
        player.respawn();
        assert!(player.body.alive);
        assert_eq!(player.body.pos, Vec2::new(10.0, 20.0));
        assert!(player.is_invincible());
    }

    #[test]
    fn test_speed_clamped() {
        let rows = ["-".repeat(60), "-".repeat(60), "-".repeat(60), "X".repeat(60)];
        let map = TileMap::parse(&rows.join("\n"));
        let mut audio = RecordingAudio::default();
        let mut player = Player::new(Vec2::new(20.0, 30.0));
        let mut input = KeyboardState::default();
        input.key_down("d");
        for _ in 0..120 {
            player.update(&input, &map, &mut audio, SIM_DT);
        }
        assert_eq!(player.body.vel.x, PLAYER_MAX_SPEED);
        assert_eq!(player.facing, 1.0);
    }
}
