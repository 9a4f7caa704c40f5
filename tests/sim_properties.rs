//! Property tests for the simulation core
//!
//! Random input scripts and entity populations against the invariants
//! the game promises: monotone projectile motion, the player boxed into
//! the play area, and a charge meter that only moves in legal steps.

use glam::Vec2;
use proptest::prelude::*;

use star_strafe::consts::*;
use star_strafe::input::{Button, InputState};
use star_strafe::sim::{tick, Bullet, Enemy, GameEvent, GameState, SpawnTuning};

/// Hold buttons according to a bitmask (bit 0 = Up .. bit 5 = Ultimate).
fn set_held(input: &mut InputState, mask: u8) {
    const BITS: [Button; 6] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Fire,
        Button::Ultimate,
    ];
    for (bit, button) in BITS.iter().enumerate() {
        if mask & (1 << bit) != 0 {
            input.press(*button);
        } else {
            input.release(*button);
        }
    }
}

fn quiet_world(seed: u64) -> GameState {
    let mut state = GameState::new(seed);
    state.set_bounds(400.0, 300.0);
    state.reset_round();
    state.spawn = SpawnTuning {
        base: 0.0,
        per_level: 0.0,
    };
    state
}

proptest! {
    /// Surviving bullets advance by exactly their speed and leave in
    /// order; surviving enemies retreat by exactly theirs. Populations
    /// are placed in disjoint rows so no collision interferes.
    #[test]
    fn bullets_advance_and_enemies_retreat(
        bullet_xs in proptest::collection::vec(0.0f32..400.0, 0..8),
        enemy_xs in proptest::collection::vec(100.0f32..500.0, 0..8),
    ) {
        let mut state = quiet_world(9);
        state.player.pos = Vec2::new(30.0, 10.0);
        for &x in &bullet_xs {
            state.bullets.push(Bullet {
                pos: Vec2::new(x, 50.0),
                width: BULLET_WIDTH,
                height: BULLET_HEIGHT,
                speed: BULLET_SPEED,
            });
        }
        for &x in &enemy_xs {
            state.enemies.push(Enemy {
                pos: Vec2::new(x, 200.0),
                width: ENEMY_SIZE,
                height: ENEMY_SIZE,
                speed: 2.5,
            });
        }

        let input = InputState::new();
        tick(&mut state, &input, 0.0);

        let expected_bullets: Vec<f32> = bullet_xs
            .iter()
            .map(|x| x + BULLET_SPEED)
            .filter(|nx| nx + BULLET_WIDTH <= 400.0)
            .collect();
        let got_bullets: Vec<f32> = state.bullets.iter().map(|b| b.pos.x).collect();
        prop_assert_eq!(got_bullets, expected_bullets);

        let expected_enemies: Vec<f32> = enemy_xs.iter().map(|x| x - 2.5).collect();
        let got_enemies: Vec<f32> = state.enemies.iter().map(|e| e.pos.x).collect();
        prop_assert_eq!(got_enemies, expected_enemies);
    }

    /// Whatever is held for however long, the player never leaves
    /// `[0, w - pw] x [0, h - ph]`.
    #[test]
    fn player_never_leaves_the_play_area(
        masks in proptest::collection::vec(0u8..16, 1..300),
        w in 100.0f32..800.0,
        h in 60.0f32..600.0,
    ) {
        let mut state = GameState::new(11);
        state.set_bounds(w, h);
        state.reset_round();
        state.spawn = SpawnTuning { base: 0.0, per_level: 0.0 };

        let mut input = InputState::new();
        for (i, mask) in masks.iter().enumerate() {
            set_held(&mut input, *mask);
            tick(&mut state, &input, i as f64 * 16.0);
            input.clear_edges();

            let p = &state.player;
            prop_assert!(p.pos.x >= 0.0 && p.pos.x + p.width <= w);
            prop_assert!(p.pos.y >= 0.0 && p.pos.y + p.height <= h);
        }
    }

    /// The charge meter stays in 0..=100 and only ever moves by +10 per
    /// direct kill (capped) or a reset to zero on activation. An active
    /// beam is never older than its duration at the end of a tick.
    #[test]
    fn charge_moves_only_in_legal_steps(
        masks in proptest::collection::vec(0u8..64, 1..300),
    ) {
        let mut state = GameState::new(13);
        state.set_bounds(400.0, 300.0);
        state.reset_round();
        // Constant traffic so kills actually happen
        state.spawn = SpawnTuning { base: 1.0, per_level: 0.0 };

        let mut input = InputState::new();
        let mut prev = state.ultimate_charge;
        for (i, mask) in masks.iter().enumerate() {
            let now_ms = i as f64 * 16.0;
            set_held(&mut input, *mask);
            tick(&mut state, &input, now_ms);
            input.clear_edges();

            let events = state.take_events();
            let splats = events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemySplatted))
                .count() as u32;
            let fired = events
                .iter()
                .any(|e| matches!(e, GameEvent::UltimateFired));

            let charge = state.ultimate_charge;
            prop_assert!(charge <= CHARGE_MAX);

            // Activation empties the meter before this tick's kills refill it.
            let base = if fired { 0 } else { prev as u32 };
            let expected = (base + u32::from(CHARGE_PER_KILL) * splats)
                .min(u32::from(CHARGE_MAX)) as u8;
            prop_assert_eq!(charge, expected);

            if let Some(beam) = &state.ultimate {
                prop_assert!(now_ms - beam.started_at_ms <= beam.duration_ms);
            }

            prev = charge;
        }
    }
}
