//! Rendering module
//!
//! `scene` is the pure half: world state in, draw commands out. The
//! `canvas` executor is the only part that knows about the browser.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::{build_scene, palette, DrawCmd, ImageId, SpriteStatus, TextAlign};

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasPainter, SpriteImages};
