//! Read-only view of a session for renderers and the HUD

use glam::Vec2;
use serde::Serialize;

use super::body::MotionBody;
use super::state::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Boss,
    Projectile,
    Fireball,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Player facing, enemy/boss walking direction (±1); 0 otherwise
    pub facing: f32,
    /// Boss phase (1-3); 0 otherwise
    pub phase: u8,
}

impl EntityView {
    fn new(kind: EntityKind, body: &MotionBody, facing: f32) -> Self {
        Self {
            kind,
            pos: body.pos,
            size: body.size,
            facing,
            phase: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: &'static str,
    pub score: u64,
    /// Never negative, even on the final death
    pub lives: u32,
    pub level: usize,
    pub level_count: usize,
    pub boss_hp: Option<u8>,
    /// Camera top-left including shake
    pub camera: Vec2,
    pub name_entry: Option<String>,
    /// Draw order: enemies, boss, projectiles, player
    pub entities: Vec<EntityView>,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        let level = &session.level;
        let mut entities = Vec::with_capacity(
            1 + level.enemies.len() + level.boss.is_some() as usize + session.projectiles.len(),
        );

        entities.extend(
            level
                .enemies
                .iter()
                .filter(|e| e.body.alive)
                .map(|e| EntityView::new(EntityKind::Enemy, &e.body, e.dir)),
        );
        if let Some(boss) = level.boss.as_ref().filter(|b| b.is_alive()) {
            let mut view = EntityView::new(EntityKind::Boss, &boss.body, boss.dir);
            view.phase = boss.phase() as u8;
            entities.push(view);
        }
        entities.extend(session.projectiles.iter().filter(|p| p.body.alive).map(|p| {
            let kind = if p.is_fireball() {
                EntityKind::Fireball
            } else {
                EntityKind::Projectile
            };
            EntityView::new(kind, &p.body, 0.0)
        }));
        if session.player.body.alive {
            entities.push(EntityView::new(
                EntityKind::Player,
                &session.player.body,
                session.player.facing,
            ));
        }

        Self {
            state: session.state.as_str(),
            score: session.score,
            lives: session.lives.max(0) as u32,
            level: session.level_index + 1,
            level_count: session.level_count(),
            boss_hp: level.boss.as_ref().map(|b| b.hp),
            name_entry: session
                .is_entering_name()
                .then(|| session.name_entry.initials.clone()),
            entities,
            camera: session.camera.offset(),
        }
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}
