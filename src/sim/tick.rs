//! Per-tick simulation step
//!
//! One tick per scheduled frame while Playing. Step order is
//! load-bearing: later steps consume the results of earlier ones within
//! the same tick (a bullet spawned in the player step moves and collides
//! this tick; the difficulty recompute sees this tick's scoring).

use glam::Vec2;

use super::collision::{aabb_overlap, beam_hits_rect};
use super::state::{Bullet, Enemy, GameEvent, GamePhase, GameState, UltimateLaser};
use crate::consts::*;
use crate::input::{Button, InputState};

/// Advance the world by one tick.
///
/// `now_ms` is the driver's clock (wall time in the browser, synthetic in
/// tests); the simulation never reads time on its own. Rising edges on
/// `input` are left in place for the driver to clear after the frame.
pub fn tick(state: &mut GameState, input: &InputState, now_ms: f64) {
    // Lifecycle: a Start edge (re)starts a round from the title or
    // game-over screen and is ignored while playing.
    if input.was_pressed(Button::Start)
        && matches!(state.phase, GamePhase::Menu | GamePhase::GameOver)
    {
        state.reset_round();
        return;
    }

    if state.phase != GamePhase::Playing {
        return;
    }
    // Surface not laid out yet
    if !state.bounds.is_valid() {
        return;
    }

    state.time_ms = now_ms;

    update_player(state, input, now_ms);
    update_ultimate(state, now_ms);
    update_bullets(state);
    update_enemies(state);
    if resolve_collisions(state) {
        // Player was destroyed; nothing else mutates this tick.
        return;
    }

    state.game_speed = 1 + (state.score / DIFFICULTY_SCORE_STEP) as u32;
}

/// Movement, shooting, ultimate trigger.
fn update_player(state: &mut GameState, input: &InputState, now_ms: f64) {
    let bounds = state.bounds;
    let player = &mut state.player;

    // Each axis move is applied only if the resulting position stays
    // inside the play area; an overstepping move is skipped outright, so
    // the craft stops short of the edge instead of snapping to it.
    if input.is_held(Button::Up) && player.pos.y - player.speed >= 0.0 {
        player.pos.y -= player.speed;
    }
    if input.is_held(Button::Down)
        && player.pos.y + player.height + player.speed <= bounds.height
    {
        player.pos.y += player.speed;
    }
    if input.is_held(Button::Left) && player.pos.x - player.speed >= 0.0 {
        player.pos.x -= player.speed;
    }
    if input.is_held(Button::Right)
        && player.pos.x + player.width + player.speed <= bounds.width
    {
        player.pos.x += player.speed;
    }

    if input.is_held(Button::Fire) && player.can_shoot(now_ms) {
        let bullet = Bullet::from_player(player);
        player.last_shot_ms = Some(now_ms);
        state.bullets.push(bullet);
    }

    if input.is_held(Button::Ultimate)
        && state.ultimate_charge >= CHARGE_MAX
        && state.ultimate.is_none()
    {
        activate_ultimate(state, now_ms);
    }
}

/// Fire the beam: geometry from the player, meter spent, sound cued.
fn activate_ultimate(state: &mut GameState, now_ms: f64) {
    state.ultimate = Some(UltimateLaser::aim(&state.player, &state.bounds, now_ms));
    state.ultimate_charge = 0;
    state.push_event(GameEvent::UltimateFired);
}

/// Expire the beam or sweep enemies caught in it.
fn update_ultimate(state: &mut GameState, now_ms: f64) {
    let Some(beam) = state.ultimate.clone() else {
        return;
    };
    if beam.is_expired(now_ms) {
        state.ultimate = None;
        return;
    }

    let before = state.enemies.len();
    state.enemies.retain(|e| !beam_hits_rect(&beam, &e.rect()));
    let killed = (before - state.enemies.len()) as u64;
    // Beam kills never feed the charge meter.
    state.score += killed * SCORE_PER_KILL;
}

fn update_bullets(state: &mut GameState) {
    let right = state.bounds.width;
    for bullet in &mut state.bullets {
        bullet.pos.x += bullet.speed;
    }
    state.bullets.retain(|b| b.pos.x + b.width <= right);
}

/// Spawn roll, drift, and escape scoring.
fn update_enemies(state: &mut GameState) {
    use rand::Rng;

    let p = state.spawn.base + state.spawn.per_level * state.game_speed as f32;
    if state.rng.random::<f32>() < p {
        spawn_enemy(state);
    }

    for enemy in &mut state.enemies {
        enemy.pos.x -= enemy.speed;
    }

    let before = state.enemies.len();
    state.enemies.retain(|e| e.pos.x + e.width >= 0.0);
    let escaped = (before - state.enemies.len()) as u64;
    state.score += escaped * SCORE_PER_ESCAPE;
}

/// New enemy at the right edge, random row, difficulty-scaled speed.
fn spawn_enemy(state: &mut GameState) {
    use rand::Rng;

    let max_y = state.bounds.height - ENEMY_SIZE;
    let y = if max_y > 0.0 {
        state.rng.random_range(0.0..max_y)
    } else {
        0.0
    };
    state.enemies.push(Enemy {
        pos: Vec2::new(state.bounds.width, y),
        width: ENEMY_SIZE,
        height: ENEMY_SIZE,
        speed: ENEMY_BASE_SPEED + ENEMY_SPEED_PER_LEVEL * state.game_speed as f32,
    });
}

/// Bullet-enemy then player-enemy. Returns true if the player died.
fn resolve_collisions(state: &mut GameState) -> bool {
    let mut i = 0;
    while i < state.bullets.len() {
        let brect = state.bullets[i].rect();
        let hit = state
            .enemies
            .iter()
            .position(|e| aabb_overlap(&brect, &e.rect()));
        if let Some(j) = hit {
            state.bullets.remove(i);
            state.enemies.remove(j);
            state.score += SCORE_PER_KILL;
            state.ultimate_charge = (state.ultimate_charge + CHARGE_PER_KILL).min(CHARGE_MAX);
            state.push_event(GameEvent::EnemySplatted);
        } else {
            i += 1;
        }
    }

    let prect = state.player.rect();
    if state.enemies.iter().any(|e| aabb_overlap(&prect, &e.rect())) {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::PlayerDestroyed);
        return true;
    }
    false
}
