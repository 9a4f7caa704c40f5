//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per scheduled frame, driven by a caller-supplied clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{aabb_overlap, beam_hits_rect, Rect};
pub use state::{
    Bullet, Enemy, GameEvent, GamePhase, GameState, PlayArea, Player, SpawnTuning, UltimateLaser,
};
pub use tick::tick;
