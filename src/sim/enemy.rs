//! Patrolling enemy: walks until a wall or a ledge, then turns around

use serde::{Deserialize, Serialize};

use super::body::MotionBody;
use super::level::TileMap;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: MotionBody,
    /// +1 walking right, -1 walking left
    pub dir: f32,
    pub speed: f32,
}

impl Enemy {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: MotionBody::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            dir: -1.0,
            speed: ENEMY_SPEED,
        }
    }

    pub fn update(&mut self, map: &TileMap, dt: f32) {
        let body = &mut self.body;

        // Probe one pixel below the feet, under the center and just past the leading edge
        let foot_y = body.bottom() + 1.0;
        let grounded_now = map.is_solid_at_pixel(body.center().x, foot_y);
        let front_x = if self.dir > 0.0 {
            body.right() + 1.0
        } else {
            body.left() - 1.0
        };
        let ground_ahead = map.is_solid_at_pixel(front_x, foot_y);
        if grounded_now && !ground_ahead {
            self.dir = -self.dir;
        }

        body.vel.x = self.dir * self.speed;
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

        if body.pos.y > map.pixel_height() + ENEMY_FALL_MARGIN {
            body.alive = false;
        }
    }
}
