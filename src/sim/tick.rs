//! Fixed timestep simulation tick
//!
//! The session state machine: TITLE → PLAY → DEAD/LEVEL_COMPLETE → ... →
//! WIN/GAME_OVER → TITLE. During PLAY the actors update in a fixed order,
//! then player contacts are resolved, then hazard, death and goal checks
//! run. Dead entities are dropped once, at the end of the PLAY tick.

use glam::Vec2;

use super::particles::{CONFETTI_PALETTE, ParticleKind};
use super::state::{GameState, Session};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::input::{Action, InputSnapshot, TextKey};
use crate::persistence::ScoreStore;

/// Collaborators the orchestrator talks to during a tick
pub struct Services<'a> {
    pub audio: &'a mut dyn AudioSink,
    pub scores: &'a mut dyn ScoreStore,
}

/// Confetti columns spawned across the view on WIN
const WIN_CONFETTI_COLUMNS: usize = 12;

/// Advance the session by one fixed timestep
pub fn tick(
    session: &mut Session,
    input: &dyn InputSnapshot,
    services: &mut Services<'_>,
    dt: f32,
) {
    session.elapsed += dt;
    session.time_ticks += 1;

    match session.state {
        GameState::Title => {
            if input.pressed(Action::Start) {
                session.set_state(GameState::Play, 0.0);
                services.audio.play(SoundEffect::Coin);
            }
        }
        GameState::Play => update_play(session, input, &mut *services.audio, dt),
        GameState::Dead => {
            session.state_timer -= dt;
            if session.state_timer <= 0.0 {
                respawn_or_game_over(session);
            }
        }
        GameState::LevelComplete => {
            session.state_timer -= dt;
            if session.state_timer <= 0.0 {
                next_level(session);
            }
        }
        GameState::Win | GameState::GameOver => {
            // Decided before this tick's keys are read, so the Enter that
            // confirms the initials doesn't also restart
            let entering = session.is_entering_name();
            handle_name_entry(session, input, &mut *services.scores);
            if input.pressed(Action::Start) && !entering {
                session.reset();
            }
        }
    }

    // Particles run in every state (confetti keeps falling on WIN)
    session.particles.update(dt);
}

fn update_play(
    session: &mut Session,
    input: &dyn InputSnapshot,
    audio: &mut dyn AudioSink,
    dt: f32,
) {
    // Actor motion
    session
        .player
        .update(input, &session.level.map, &mut *audio, dt);

    let level = &mut session.level;
    for enemy in level.enemies.iter_mut() {
        enemy.update(&level.map, dt);
    }
    if let Some(boss) = level.boss.as_mut().filter(|b| b.is_alive()) {
        boss.update(
            &level.map,
            dt,
            &session.player.body,
            &mut session.projectiles,
            &mut *audio,
        );
    }
    for projectile in session.projectiles.iter_mut() {
        projectile.update(&session.level.map, dt, &mut session.particles, &mut session.rng);
    }

    // Contacts
    resolve_enemy_contacts(session, &mut *audio);
    resolve_boss_contact(session, &mut *audio);
    resolve_projectile_contacts(session);

    let target = session.player.body.center();
    session.camera.update(target, dt);

    let view_height = session.view_size().y;
    session.level.spawn_hazard_projectiles(
        &mut session.projectiles,
        session.elapsed,
        view_height,
        &mut session.rng,
    );

    if !session.player.is_invincible() && session.level.map.overlaps_hazard(&session.player.body) {
        session.player.body.alive = false;
    }

    session.level.enemies.retain(|e| e.body.alive);
    session.projectiles.retain(|p| p.body.alive);

    // Death wins over a same-tick goal touch
    if !session.player.body.alive {
        session.lives -= 1;
        audio.play(SoundEffect::Hit);
        session.camera.add_shake(SHAKE_DEATH.0, SHAKE_DEATH.1);
        log::info!("Player died, {} lives left", session.lives.max(0));
        session.set_state(GameState::Dead, DEAD_DISPLAY_TIME);
        return;
    }

    if session.player.body.touches(&session.level.goal) && !session.level.boss_alive() {
        session.score += SCORE_GOAL;
        audio.play(SoundEffect::Goal);
        session.camera.add_shake(SHAKE_GOAL.0, SHAKE_GOAL.1);
        session.set_state(GameState::LevelComplete, LEVEL_COMPLETE_DISPLAY_TIME);
    }
}

/// Stomp when falling fast enough with only a shallow overlap of the top
/// edge; any other touch kills the player unless invincible.
fn resolve_enemy_contacts(session: &mut Session, audio: &mut dyn AudioSink) {
    let player = &mut session.player;
    for enemy in session.level.enemies.iter_mut() {
        if !enemy.body.alive || !player.body.overlaps(&enemy.body) {
            continue;
        }
        let stomp = player.body.vel.y > STOMP_MIN_FALL_SPEED
            && player.body.bottom() - enemy.body.top() < ENEMY_STOMP_DEPTH;
        if stomp {
            enemy.body.alive = false;
            session.score += SCORE_STOMP;
            player.body.vel.y = -JUMP_VELOCITY * ENEMY_STOMP_BOUNCE;
            audio.play(SoundEffect::Stomp);
            session.particles.burst(
                &mut session.rng,
                enemy.body.center(),
                ParticleKind::Enemy,
                14,
                160.0,
            );
            session.camera.add_shake(SHAKE_STOMP.0, SHAKE_STOMP.1);
            log::debug!("Enemy stomped, score {}", session.score);
        } else if !player.is_invincible() {
            player.body.alive = false;
        }
    }
}

fn resolve_boss_contact(session: &mut Session, audio: &mut dyn AudioSink) {
    let Some(boss) = session.level.boss.as_mut().filter(|b| b.is_alive()) else {
        return;
    };
    let player = &mut session.player;
    if !player.body.overlaps(&boss.body) {
        return;
    }
    let stomp = player.body.vel.y > STOMP_MIN_FALL_SPEED
        && player.body.bottom() - boss.body.top() < BOSS_STOMP_DEPTH;
    if stomp {
        // Hits during invulnerability neither score nor bounce
        if boss.take_hit(audio, &mut session.particles, &mut session.camera, &mut session.rng) {
            session.score += SCORE_BOSS_HIT;
            player.body.vel.y = -JUMP_VELOCITY * BOSS_STOMP_BOUNCE;
        }
    } else if !player.is_invincible() {
        player.body.alive = false;
    }
}

fn resolve_projectile_contacts(session: &mut Session) {
    let player = &mut session.player;
    for projectile in session.projectiles.iter_mut() {
        if !projectile.body.alive || !player.body.overlaps(&projectile.body) {
            continue;
        }
        projectile.body.alive = false;
        if !player.is_invincible() {
            player.body.alive = false;
        }
    }
}

fn respawn_or_game_over(session: &mut Session) {
    if session.lives < 0 {
        session.name_entry.clear();
        session.show_scoreboard = false;
        session.set_state(GameState::GameOver, 0.0);
        return;
    }
    session.level.reset_entities(true);
    session.projectiles.clear();
    session.player.respawn();
    session.set_state(GameState::Play, 0.0);
}

fn next_level(session: &mut Session) {
    let next = session.level_index + 1;
    if next >= session.level_count() {
        session.score += SCORE_COMPLETION_BONUS;
        spawn_win_confetti(session);
        session.name_entry.clear();
        session.show_scoreboard = false;
        log::info!("All levels cleared, final score {}", session.score);
        session.set_state(GameState::Win, 0.0);
        return;
    }
    session.load_level(next);
    session.set_state(GameState::Play, 0.0);
}

fn spawn_win_confetti(session: &mut Session) {
    let view = session.view_size();
    let origin = session.camera.pos;
    let column_width = view.x / WIN_CONFETTI_COLUMNS as f32;
    for i in 0..WIN_CONFETTI_COLUMNS {
        let at = Vec2::new(
            origin.x + (i as f32 + 0.5) * column_width,
            origin.y + view.y - 4.0,
        );
        let kind = CONFETTI_PALETTE[i % CONFETTI_PALETTE.len()];
        let count = 18 + (session.rng.next_f32() * 10.0) as usize;
        let speed = 420.0 + session.rng.next_f32() * 220.0;
        session.particles.confetti_up(&mut session.rng, at, kind, count, speed);
    }
}

/// Letters and digits append, backspace deletes, confirm records. The third
/// character confirms on its own.
fn handle_name_entry(
    session: &mut Session,
    input: &dyn InputSnapshot,
    scores: &mut dyn ScoreStore,
) {
    if !session.is_entering_name() {
        return;
    }
    for key in input.text() {
        match *key {
            TextKey::Char(c) => {
                session.name_entry.initials.push(c.to_ascii_uppercase());
                if session.name_entry.is_full() {
                    confirm_name(session, scores);
                    return;
                }
            }
            TextKey::Backspace => {
                session.name_entry.initials.pop();
            }
            TextKey::Confirm if !session.name_entry.initials.is_empty() => {
                confirm_name(session, scores);
                return;
            }
            TextKey::Confirm => {}
        }
    }
}

fn confirm_name(session: &mut Session, scores: &mut dyn ScoreStore) {
    session.high_scores = scores.record_score(&session.name_entry.initials, session.score);
    session.name_entry.confirmed = true;
    session.show_scoreboard = true;
    log::info!(
        "Score {} recorded as {}, rank {}",
        session.score,
        session.name_entry.initials,
        session.high_scores.rank_for(session.score) + 1
    );
}
