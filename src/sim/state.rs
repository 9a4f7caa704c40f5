//! Game state and core simulation types
//!
//! One mutable world owned by the simulation. All gameplay time is the
//! driver-supplied millisecond clock, never wall time read from inside.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for Start
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended by a player-enemy collision
    GameOver,
}

/// Side-effect commands emitted by the tick, drained by the driver.
///
/// The simulation never waits on or observes their outcome; the audio
/// sink may drop them on the floor (muted, asset missing, autoplay
/// rejection) without the game noticing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The ultimate beam fired
    UltimateFired,
    /// A bullet destroyed an enemy
    EnemySplatted,
    /// The player collided with an enemy
    PlayerDestroyed,
}

/// Rectangular simulation/render bounds, origin top-left.
///
/// Resized by the host; a zero-sized area means the surface has not been
/// laid out yet and the simulation must idle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// The player craft
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Clock stamp of the last shot; `None` means the cooldown is clear.
    pub last_shot_ms: Option<f64>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, 0.0),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            last_shot_ms: None,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.width, self.height)
    }

    /// Re-center vertically in `bounds` (spawn position).
    pub fn center_vertically(&mut self, bounds: &PlayArea) {
        self.pos.y = bounds.height / 2.0 - self.height / 2.0;
    }

    /// Whether the shot cooldown has elapsed at `now_ms`.
    pub fn can_shoot(&self, now_ms: f64) -> bool {
        match self.last_shot_ms {
            None => true,
            Some(t) => now_ms - t > SHOT_COOLDOWN_MS,
        }
    }
}

/// A player bullet, moving right at fixed speed
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Bullet {
    /// Spawn at the player's right edge, centered on the craft.
    pub fn from_player(player: &Player) -> Self {
        Self {
            pos: Vec2::new(
                player.pos.x + player.width,
                player.pos.y + player.height / 2.0,
            ),
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
            speed: BULLET_SPEED,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.width, self.height)
    }
}

/// An enemy, drifting left at difficulty-scaled speed
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.width, self.height)
    }
}

/// The ultimate beam: a transient trapezoid volume.
///
/// Narrow end anchored at the player's right edge, wide end at the play
/// area's right edge. At most one exists at a time.
#[derive(Debug, Clone)]
pub struct UltimateLaser {
    pub start_x: f32,
    pub end_x: f32,
    /// Top of the narrow end
    pub start_y: f32,
    pub start_height: f32,
    /// Top of the wide end
    pub end_y: f32,
    pub end_height: f32,
    pub started_at_ms: f64,
    pub duration_ms: f64,
}

impl UltimateLaser {
    /// Compute beam geometry from the firing player and current bounds.
    pub fn aim(player: &Player, bounds: &PlayArea, now_ms: f64) -> Self {
        let start_height = player.height * ULTIMATE_START_HEIGHT_FRAC;
        let end_height = bounds.height * ULTIMATE_END_HEIGHT_FRAC;
        let center_y = player.pos.y + player.height / 2.0;
        Self {
            start_x: player.pos.x + player.width,
            end_x: bounds.width,
            start_y: center_y - start_height / 2.0,
            start_height,
            end_y: center_y - end_height / 2.0,
            end_height,
            started_at_ms: now_ms,
            duration_ms: ULTIMATE_DURATION_MS,
        }
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms - self.started_at_ms > self.duration_ms
    }
}

/// Enemy spawn-rate tunables; the per-tick spawn probability is
/// `base + per_level * game_speed`.
///
/// The reduced capability profile halves the pressure; this is a
/// performance knob, not a gameplay contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTuning {
    pub base: f32,
    pub per_level: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base: SPAWN_BASE,
            per_level: SPAWN_PER_LEVEL,
        }
    }
}

impl SpawnTuning {
    /// Tuning for hosts that struggle with a full spawn rate.
    pub fn reduced() -> Self {
        Self {
            base: SPAWN_BASE_REDUCED,
            per_level: SPAWN_PER_LEVEL_REDUCED,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u64,
    /// 0-100, fills in steps of 10 per direct bullet kill
    pub ultimate_charge: u8,
    /// Difficulty level derived from score, starts at 1
    pub game_speed: u32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub ultimate: Option<UltimateLaser>,
    pub bounds: PlayArea,
    /// Clock stamp of the last executed tick, for scene building
    pub time_ms: f64,
    /// Spawn-rate tunables for the active capability profile
    pub spawn: SpawnTuning,
    /// Spawn RNG, seeded per process for reproducible runs
    pub rng: Pcg32,
    /// Pending side effects, drained by the driver each frame
    events: Vec<GameEvent>,
    /// The player is re-centered once, at the first positive-size resize
    centered_once: bool,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            ultimate_charge: 0,
            game_speed: 1,
            player: Player::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            ultimate: None,
            bounds: PlayArea::default(),
            time_ms: 0.0,
            spawn: SpawnTuning::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            centered_once: false,
        }
    }

    /// Recompute play-area bounds after a host resize.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = PlayArea::new(width, height);
        if !self.centered_once && self.bounds.is_valid() {
            self.player.center_vertically(&self.bounds);
            self.centered_once = true;
        }
    }

    /// Full reset into the Playing phase.
    pub fn reset_round(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.game_speed = 1;
        self.ultimate_charge = 0;
        self.ultimate = None;
        self.bullets.clear();
        self.enemies.clear();
        self.player.pos.x = PLAYER_START_X;
        if self.bounds.is_valid() {
            self.player.center_vertically(&self.bounds);
        }
        self.player.last_shot_ms = None;
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain pending side effects (driver, once per frame).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[cfg(test)]
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_valid_resize_centers_player_once() {
        let mut state = GameState::new(1);
        state.set_bounds(0.0, 0.0);
        assert_eq!(state.player.pos.y, 0.0);

        state.set_bounds(400.0, 300.0);
        assert_eq!(state.player.pos.y, 150.0 - PLAYER_HEIGHT / 2.0);

        // Later resizes update bounds without re-centering
        state.player.pos.y = 10.0;
        state.set_bounds(400.0, 600.0);
        assert_eq!(state.player.pos.y, 10.0);
        assert_eq!(state.bounds.height, 600.0);
    }

    #[test]
    fn reset_round_restores_a_fresh_session() {
        let mut state = GameState::new(7);
        state.set_bounds(400.0, 300.0);
        state.score = 990;
        state.game_speed = 2;
        state.ultimate_charge = 70;
        state.bullets.push(Bullet::from_player(&state.player));
        state.enemies.push(Enemy {
            pos: Vec2::new(100.0, 100.0),
            width: ENEMY_SIZE,
            height: ENEMY_SIZE,
            speed: 2.0,
        });
        state.player.last_shot_ms = Some(123.0);
        state.phase = GamePhase::GameOver;

        state.reset_round();

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.game_speed, 1);
        assert_eq!(state.ultimate_charge, 0);
        assert!(state.ultimate.is_none());
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.pos.x, PLAYER_START_X);
        assert_eq!(state.player.pos.y, 150.0 - PLAYER_HEIGHT / 2.0);
        assert_eq!(state.player.last_shot_ms, None);
    }

    #[test]
    fn beam_geometry_matches_player_and_bounds() {
        let bounds = PlayArea::new(400.0, 300.0);
        let mut player = Player::default();
        player.pos = Vec2::new(30.0, 100.0);
        let beam = UltimateLaser::aim(&player, &bounds, 500.0);

        assert_eq!(beam.start_x, 30.0 + PLAYER_WIDTH);
        assert_eq!(beam.end_x, 400.0);
        // Narrow end: 80% of player height, centered on the craft
        assert_eq!(beam.start_height, PLAYER_HEIGHT * 0.8);
        assert_eq!(beam.start_y, 115.0 - beam.start_height / 2.0);
        // Wide end: 50% of play-area height, same center line
        assert_eq!(beam.end_height, 150.0);
        assert_eq!(beam.end_y, 115.0 - 75.0);
        assert!(!beam.is_expired(1500.0));
        assert!(beam.is_expired(1500.1));
    }
}
