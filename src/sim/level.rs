//! Tile levels
//!
//! A level is parsed from an ASCII grid. `TileMap` is the static geometry
//! (solidity, hazards, collision resolution); `TileLevel` adds the spawn
//! data recorded while parsing plus the live enemy/boss roster.
//!
//! Legend:
//! - `X` ground, `B` brick, `?` block (all solid)
//! - `-` empty
//! - `L` lava (hazard, non-solid; spawns fireballs if the cell above exists)
//! - `P` player start, `E` enemy, `K` boss, `G` goal (consumed, become empty)
//! - `F` / `f` fast / slow fireball emitters (consumed, become empty)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{MotionBody, Rect};
use super::boss::Boss;
use super::enemy::Enemy;
use super::projectile::Projectile;
use super::rng::SimRng;
use crate::consts::*;

/// Symbol used to pad short rows
pub const EMPTY_SYMBOL: char = '-';

/// Spawn markers sit this far inside their tile
const SPAWN_INSET: f32 = 2.0;

const GOAL_WIDTH: f32 = 12.0;
const GOAL_HEIGHT: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Empty,
    Ground,
    Brick,
    Block,
    Lava,
    /// Any unrecognized symbol: drawn as nothing, never collides
    Decor,
}

impl TileKind {
    pub fn from_symbol(c: char) -> Self {
        match c {
            'X' => TileKind::Ground,
            'B' => TileKind::Brick,
            '?' => TileKind::Block,
            'L' => TileKind::Lava,
            '-' | 'P' | 'E' | 'G' | 'K' | 'F' | 'f' => TileKind::Empty,
            _ => TileKind::Decor,
        }
    }

    pub fn is_solid(self) -> bool {
        matches!(self, TileKind::Ground | TileKind::Brick | TileKind::Block)
    }

    pub fn is_hazard(self) -> bool {
        self == TileKind::Lava
    }
}

/// Convert a pixel coordinate to a tile index
#[inline]
pub fn tile_index(px: f32) -> i32 {
    (px / TILE_SIZE).floor() as i32
}

/// Rectangular tile grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    width: usize,
    height: usize,
    /// Row-major
    tiles: Vec<TileKind>,
}

impl TileMap {
    /// Parse geometry only. Short rows are right-padded with `EMPTY_SYMBOL`.
    pub fn parse(text: &str) -> Self {
        let rows = padded_rows(text);
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let tiles = rows
            .iter()
            .flat_map(|row| row.iter().map(|&c| TileKind::from_symbol(c)))
            .collect();
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * TILE_SIZE
    }

    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * TILE_SIZE
    }

    /// Tile at an in-bounds index
    pub fn get(&self, tx: i32, ty: i32) -> Option<TileKind> {
        if tx < 0 || ty < 0 || tx as usize >= self.width || ty as usize >= self.height {
            return None;
        }
        Some(self.tiles[ty as usize * self.width + tx as usize])
    }

    /// Left, above and right of the grid count as solid so nothing escapes
    /// sideways or over the top. Below the grid is open: that is how
    /// falling to death works.
    pub fn is_solid_at_tile(&self, tx: i32, ty: i32) -> bool {
        if tx < 0 || tx as usize >= self.width || ty < 0 {
            return true;
        }
        if ty as usize >= self.height {
            return false;
        }
        self.tiles[ty as usize * self.width + tx as usize].is_solid()
    }

    pub fn is_solid_at_pixel(&self, x: f32, y: f32) -> bool {
        if x < 0.0 || y < 0.0 {
            return true;
        }
        self.is_solid_at_tile(tile_index(x), tile_index(y))
    }

    pub fn is_hazard_at_tile(&self, tx: i32, ty: i32) -> bool {
        self.get(tx, ty).is_some_and(TileKind::is_hazard)
    }

    /// True if any tile under the body's box is lava
    pub fn overlaps_hazard(&self, body: &MotionBody) -> bool {
        let min_tx = tile_index(body.left());
        let max_tx = tile_index(body.right() - 1.0);
        let min_ty = tile_index(body.top());
        let max_ty = tile_index(body.bottom() - 1.0);
        (min_ty..=max_ty).any(|ty| (min_tx..=max_tx).any(|tx| self.is_hazard_at_tile(tx, ty)))
    }

    /// Push `body` out of every solid tile it overlaps.
    ///
    /// Each overlapping tile is separated along the axis of least
    /// penetration (ties go to the vertical axis), in the direction needing
    /// the smaller push. Returns whether any correction happened.
    pub fn resolve_collisions(&self, body: &mut MotionBody) -> bool {
        let mut collided = false;
        let min_tx = tile_index(body.left()) - 1;
        let max_tx = tile_index(body.right()) + 1;
        let min_ty = tile_index(body.top()) - 1;
        let max_ty = tile_index(body.bottom()) + 1;

        for ty in min_ty..=max_ty {
            for tx in min_tx..=max_tx {
                if !self.is_solid_at_tile(tx, ty) {
                    continue;
                }
                let tile_left = tx as f32 * TILE_SIZE;
                let tile_top = ty as f32 * TILE_SIZE;
                let tile_right = tile_left + TILE_SIZE;
                let tile_bottom = tile_top + TILE_SIZE;
                if body.right() <= tile_left
                    || body.left() >= tile_right
                    || body.bottom() <= tile_top
                    || body.top() >= tile_bottom
                {
                    continue;
                }

                let push_right = tile_right - body.left();
                let push_left = body.right() - tile_left;
                let push_down = tile_bottom - body.top();
                let push_up = body.bottom() - tile_top;

                if push_right.min(push_left) < push_down.min(push_up) {
                    body.pos.x = if push_right < push_left {
                        tile_right
                    } else {
                        tile_left - body.size.x
                    };
                } else {
                    body.pos.y = if push_down < push_up {
                        tile_bottom
                    } else {
                        tile_top - body.size.y
                    };
                }
                collided = true;
            }
        }
        collided
    }
}

fn padded_rows(text: &str) -> Vec<Vec<char>> {
    let mut rows: Vec<Vec<char>> = text.lines().map(|l| l.chars().collect()).collect();
    if rows.is_empty() {
        rows.push(Vec::new());
    }
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in rows.iter_mut() {
        row.resize(width, EMPTY_SYMBOL);
    }
    rows
}

/// Which marker produced an emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmitterKind {
    /// Implicit emitter under every lava tile with room above
    Lava,
    /// `F`: faster, bigger, stronger
    Fast,
    /// `f`: slower, smaller
    Slow,
}

/// Periodic fireball source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardEmitter {
    pub kind: EmitterKind,
    /// Fireball spawn position (top-left)
    pub pos: Vec2,
    /// Seconds between launches
    pub interval: f32,
    /// Phase offset in seconds, in [0, interval)
    pub offset: f32,
    pub size: f32,
    /// Launch strength and its variance; explicit emitters only
    pub power: Option<f32>,
    pub randomness: Option<f32>,
    last_phase: Option<i64>,
}

impl HazardEmitter {
    fn new(kind: EmitterKind, tx: usize, ty: usize, rng: &mut SimRng) -> Self {
        let (interval, size, power, randomness) = match kind {
            EmitterKind::Lava => (LAVA_EMITTER_INTERVAL, FIREBALL_SIZE, None, None),
            EmitterKind::Fast => (
                FAST_EMITTER_INTERVAL,
                FAST_EMITTER_SIZE,
                Some(FAST_EMITTER_POWER),
                Some(FAST_EMITTER_RANDOMNESS),
            ),
            EmitterKind::Slow => (
                SLOW_EMITTER_INTERVAL,
                SLOW_EMITTER_SIZE,
                Some(SLOW_EMITTER_POWER),
                Some(SLOW_EMITTER_RANDOMNESS),
            ),
        };
        let pos = Vec2::new(
            tx as f32 * TILE_SIZE + TILE_SIZE / 2.0 - 3.0,
            ty as f32 * TILE_SIZE + TILE_SIZE - 6.0,
        );
        Self {
            kind,
            pos,
            interval,
            offset: rng.next_f32() * interval,
            size,
            power,
            randomness,
            last_phase: None,
        }
    }

    /// Index of the interval `elapsed` falls in; monotonic in time
    pub fn phase_index(&self, elapsed: f32) -> i64 {
        ((elapsed + self.offset) / self.interval).floor() as i64
    }

    /// True exactly once per interval
    fn should_fire(&mut self, elapsed: f32) -> bool {
        let phase = self.phase_index(elapsed);
        if self.last_phase == Some(phase) {
            return false;
        }
        self.last_phase = Some(phase);
        true
    }
}

/// A playable level: geometry plus spawn data and the live entity roster
#[derive(Debug, Clone)]
pub struct TileLevel {
    pub map: TileMap,
    pub player_start: Vec2,
    pub goal: Rect,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    enemy_spawns: Vec<Vec2>,
    boss_spawn: Option<Vec2>,
    emitters: Vec<HazardEmitter>,
}

impl TileLevel {
    /// Parse a level. Never fails: ragged rows are padded, unknown symbols
    /// become decor. `rng` seeds the emitter phase offsets.
    pub fn parse(text: &str, rng: &mut SimRng) -> Self {
        let map = TileMap::parse(text);
        let rows = padded_rows(text);

        let (w, h) = (map.width() as f32, map.height() as f32);
        let mut level = Self {
            player_start: Vec2::splat(TILE_SIZE),
            goal: Rect::new(
                (w - 3.0) * TILE_SIZE,
                (h - 3.0) * TILE_SIZE,
                GOAL_WIDTH,
                GOAL_HEIGHT,
            ),
            map,
            enemies: Vec::new(),
            boss: None,
            enemy_spawns: Vec::new(),
            boss_spawn: None,
            emitters: Vec::new(),
        };

        for (ty, row) in rows.iter().enumerate() {
            for (tx, &c) in row.iter().enumerate() {
                let px = tx as f32 * TILE_SIZE;
                let py = ty as f32 * TILE_SIZE;
                let spawn = Vec2::new(px + SPAWN_INSET, py + SPAWN_INSET);
                match c {
                    'P' => level.player_start = spawn,
                    'E' => {
                        level.enemy_spawns.push(spawn);
                        level.enemies.push(Enemy::new(spawn.x, spawn.y));
                    }
                    'G' => {
                        level.goal = Rect::new(
                            px + SPAWN_INSET,
                            py + TILE_SIZE - GOAL_HEIGHT,
                            GOAL_WIDTH,
                            GOAL_HEIGHT,
                        );
                    }
                    'K' => {
                        level.boss_spawn = Some(spawn);
                        level.boss = Some(Boss::new(spawn.x, spawn.y));
                    }
                    'L' if ty >= 1 => {
                        level.emitters.push(HazardEmitter::new(EmitterKind::Lava, tx, ty, rng));
                    }
                    'F' => {
                        level.emitters.push(HazardEmitter::new(EmitterKind::Fast, tx, ty, rng));
                    }
                    'f' => {
                        level.emitters.push(HazardEmitter::new(EmitterKind::Slow, tx, ty, rng));
                    }
                    _ => {}
                }
            }
        }

        log::debug!(
            "Parsed level {}x{}: {} enemies, boss: {}, {} emitters",
            level.map.width(),
            level.map.height(),
            level.enemies.len(),
            level.boss.is_some(),
            level.emitters.len()
        );
        level
    }

    pub fn enemy_spawns(&self) -> &[Vec2] {
        &self.enemy_spawns
    }

    pub fn emitters(&self) -> &[HazardEmitter] {
        &self.emitters
    }

    pub fn boss_alive(&self) -> bool {
        self.boss.as_ref().is_some_and(Boss::is_alive)
    }

    /// Put enemies and the boss back on their spawn points. Geometry is
    /// untouched; with `preserve_boss_hp` the boss keeps its damage.
    pub fn reset_entities(&mut self, preserve_boss_hp: bool) {
        self.enemies = self
            .enemy_spawns
            .iter()
            .map(|s| Enemy::new(s.x, s.y))
            .collect();

        self.boss = self.boss_spawn.map(|spawn| {
            let mut boss = Boss::new(spawn.x, spawn.y);
            if preserve_boss_hp {
                if let Some(prev) = &self.boss {
                    boss.hp = prev.hp;
                    if prev.hp == 0 {
                        boss.body.alive = false;
                    }
                }
            }
            boss
        });
    }

    /// Launch a fireball from every emitter whose interval rolled over.
    ///
    /// The apex is randomized between half and 95% of the view height; the
    /// launch speed is the projectile-motion inverse `sqrt(2 g h)`.
    pub fn spawn_hazard_projectiles(
        &mut self,
        projectiles: &mut Vec<Projectile>,
        elapsed: f32,
        view_height: f32,
        rng: &mut SimRng,
    ) {
        for emitter in self.emitters.iter_mut() {
            if !emitter.should_fire(elapsed) {
                continue;
            }
            let target_height = rng.range(view_height * 0.5, view_height * 0.95);
            let v0 = (2.0 * GRAVITY * target_height).sqrt();
            projectiles.push(Projectile::fireball(emitter.pos, -v0, emitter.size));
        }
    }
}
