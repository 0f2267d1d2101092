//! Smoothed follow camera with screen shake
//!
//! Shake jitter comes from the camera's own generator, so reading the view
//! offset never disturbs the simulation's random stream.

use std::cell::RefCell;

use glam::Vec2;

use super::rng::SimRng;

/// Fraction of distance left after one second of follow
const FOLLOW_RESIDUAL_PER_SEC: f32 = 0.001;

#[derive(Debug, Clone)]
pub struct Camera {
    /// Top-left of the view in world pixels (unshaken)
    pub pos: Vec2,
    view: Vec2,
    world: Vec2,
    shake_time: f32,
    shake_magnitude: f32,
    jitter: RefCell<SimRng>,
}

impl Camera {
    pub fn new(view_width: f32, view_height: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            view: Vec2::new(view_width, view_height),
            world: Vec2::new(view_width, view_height),
            shake_time: 0.0,
            shake_magnitude: 0.0,
            jitter: RefCell::new(SimRng::new(0)),
        }
    }

    /// Restart the shake jitter sequence from `seed`
    pub fn seed_jitter(&mut self, seed: u64) {
        self.jitter = RefCell::new(SimRng::new(seed));
    }

    pub fn set_world_size(&mut self, width: f32, height: f32) {
        self.world = Vec2::new(width, height);
    }

    /// Ease toward centering `target`, then clamp into the world
    pub fn update(&mut self, target: Vec2, dt: f32) {
        let goal = target - self.view / 2.0;
        let t = 1.0 - FOLLOW_RESIDUAL_PER_SEC.powf(dt);
        self.pos += (goal - self.pos) * t;

        let max = self.world - self.view;
        self.pos.x = self.pos.x.min(max.x).max(0.0);
        self.pos.y = self.pos.y.min(max.y).max(0.0);

        if self.shake_time > 0.0 {
            self.shake_time -= dt;
            if self.shake_time <= 0.0 {
                self.shake_time = 0.0;
                self.shake_magnitude = 0.0;
            }
        }
    }

    /// Shakes overwrite if greater, they never stack
    pub fn add_shake(&mut self, magnitude: f32, time: f32) {
        self.shake_magnitude = self.shake_magnitude.max(magnitude);
        self.shake_time = self.shake_time.max(time);
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_time > 0.0
    }

    /// View offset including shake jitter. Re-rolled on every call while a
    /// shake is active.
    pub fn offset(&self) -> Vec2 {
        if self.shake_time > 0.0 {
            let mut rng = self.jitter.borrow_mut();
            let m = self.shake_magnitude;
            self.pos + Vec2::new(rng.jitter(m), rng.jitter(m))
        } else {
            self.pos
        }
    }
}
