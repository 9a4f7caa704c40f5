//! Scene builder
//!
//! Pure function from world state to an ordered list of draw commands.
//! The presentation layer owns the surface and executes the list; nothing
//! here touches the world or the platform.

use std::f32::consts::FRAC_PI_2;

use crate::consts::*;
use crate::sim::{GamePhase, GameState, Rect};

/// Fixed palette (canvas color strings).
pub mod palette {
    /// Play-area background
    pub const BACKGROUND: &str = "#8b9a46";
    /// HUD text and meter backing
    pub const CHROME: &str = "#2c3e50";
    /// Player fallback rectangle
    pub const PLAYER: &str = "#e74c3c";
    pub const BULLET: &str = "#ffffff";
    /// Enemy fallback rectangle
    pub const ENEMY: &str = "#3498db";
    pub const METER_FILL: &str = "#3498db";
    pub const METER_READY: &str = "#f39c12";
    pub const METER_BORDER: &str = "#ecf0f1";
    pub const BEAM_GLOW: &str = "rgba(255, 0, 0, 0.4)";
    pub const BEAM_BODY: &str = "rgba(255, 255, 255, 0.9)";
    pub const BEAM_CORE: &str = "rgba(255, 255, 255, 1)";
}

const TITLE_FONT: &str = "bold 20px monospace";
const GAME_OVER_FONT: &str = "bold 18px monospace";
const HUD_FONT: &str = "12px monospace";
const SMALL_FONT: &str = "10px monospace";

/// Charge meter footprint (top-right corner)
const METER_WIDTH: f32 = 80.0;
const METER_HEIGHT: f32 = 8.0;
const METER_MARGIN: f32 = 5.0;

/// Image assets the scene may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageId {
    Player,
    Enemy,
}

/// Which sprite images are currently usable.
///
/// Assets load in the background and may never arrive; the builder falls
/// back to solid rectangles for whatever is missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteStatus {
    pub player: bool,
    pub enemy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// One drawing operation against the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        color: &'static str,
    },
    Rect {
        rect: Rect,
        color: &'static str,
    },
    StrokeRect {
        rect: Rect,
        color: &'static str,
        line_width: f32,
    },
    /// Image drawn into `rect`, rotated clockwise about the rect center.
    Sprite {
        image: ImageId,
        rect: Rect,
        rotation: f32,
    },
    /// Horizontal trapezoid: two vertical edges joined top and bottom.
    Trapezoid {
        left_x: f32,
        right_x: f32,
        left_top: f32,
        left_bottom: f32,
        right_top: f32,
        right_bottom: f32,
        color: &'static str,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        color: &'static str,
        font: &'static str,
        align: TextAlign,
    },
}

/// Build the draw list for the current frame.
pub fn build_scene(state: &GameState, sprites: SpriteStatus) -> Vec<DrawCmd> {
    // Nothing to draw until the surface has a size.
    if !state.bounds.is_valid() {
        return Vec::new();
    }

    let w = state.bounds.width;
    let h = state.bounds.height;
    let mut cmds = vec![DrawCmd::Clear {
        color: palette::BACKGROUND,
    }];

    match state.phase {
        GamePhase::Menu => {
            cmds.push(text_centered("STAR STRAFE", w / 2.0, h / 2.0 - 20.0, TITLE_FONT));
            cmds.push(text_centered("Press START", w / 2.0, h / 2.0 + 10.0, HUD_FONT));
        }
        GamePhase::GameOver => {
            cmds.push(text_centered("GAME OVER", w / 2.0, h / 2.0 - 20.0, GAME_OVER_FONT));
            cmds.push(text_centered(
                &format!("Score: {}", state.score),
                w / 2.0,
                h / 2.0 + 5.0,
                HUD_FONT,
            ));
            cmds.push(text_centered("Press START", w / 2.0, h / 2.0 + 25.0, HUD_FONT));
        }
        GamePhase::Playing => {
            push_playing(state, sprites, &mut cmds);
        }
    }

    cmds
}

fn push_playing(state: &GameState, sprites: SpriteStatus, cmds: &mut Vec<DrawCmd>) {
    let w = state.bounds.width;
    let h = state.bounds.height;

    // Player craft. Sprite art is authored nose-up; a quarter turn lays
    // it along the flight axis.
    if sprites.player {
        cmds.push(DrawCmd::Sprite {
            image: ImageId::Player,
            rect: state.player.rect(),
            rotation: FRAC_PI_2,
        });
    } else {
        cmds.push(DrawCmd::Rect {
            rect: state.player.rect(),
            color: palette::PLAYER,
        });
    }

    for bullet in &state.bullets {
        cmds.push(DrawCmd::Rect {
            rect: bullet.rect(),
            color: palette::BULLET,
        });
    }

    for enemy in &state.enemies {
        if sprites.enemy {
            cmds.push(DrawCmd::Sprite {
                image: ImageId::Enemy,
                rect: enemy.rect(),
                rotation: 0.0,
            });
        } else {
            cmds.push(DrawCmd::Rect {
                rect: enemy.rect(),
                color: palette::ENEMY,
            });
        }
    }

    if let Some(beam) = &state.ultimate {
        push_beam(beam, cmds);
    }

    // Charge meter, top-right
    let meter = Rect::new(w - METER_WIDTH - METER_MARGIN, METER_MARGIN, METER_WIDTH, METER_HEIGHT);
    cmds.push(DrawCmd::Rect {
        rect: meter,
        color: palette::CHROME,
    });
    let fill = METER_WIDTH * state.ultimate_charge as f32 / CHARGE_MAX as f32;
    cmds.push(DrawCmd::Rect {
        rect: Rect::new(meter.x, meter.y, fill, METER_HEIGHT),
        color: if state.ultimate_charge >= CHARGE_MAX {
            palette::METER_READY
        } else {
            palette::METER_FILL
        },
    });
    cmds.push(DrawCmd::StrokeRect {
        rect: meter,
        color: palette::METER_BORDER,
        line_width: 1.0,
    });

    cmds.push(DrawCmd::Text {
        text: format!("Score: {}", state.score),
        x: 5.0,
        y: 15.0,
        color: palette::CHROME,
        font: HUD_FONT,
        align: TextAlign::Left,
    });

    if state.ultimate_charge >= CHARGE_MAX {
        cmds.push(DrawCmd::Text {
            text: "ULTIMATE READY (B)".to_owned(),
            x: w - 5.0,
            y: h - 5.0,
            color: palette::METER_READY,
            font: SMALL_FONT,
            align: TextAlign::Right,
        });
    }
}

/// Outer glow, solid body, bright core.
fn push_beam(beam: &crate::sim::UltimateLaser, cmds: &mut Vec<DrawCmd>) {
    let start_top = beam.start_y;
    let start_bottom = beam.start_y + beam.start_height;
    let end_top = beam.end_y;
    let end_bottom = beam.end_y + beam.end_height;

    cmds.push(DrawCmd::Trapezoid {
        left_x: beam.start_x - 3.0,
        right_x: beam.end_x + 2.0,
        left_top: start_top - 2.0,
        left_bottom: start_bottom + 2.0,
        right_top: end_top - 2.0,
        right_bottom: end_bottom + 2.0,
        color: palette::BEAM_GLOW,
    });
    cmds.push(DrawCmd::Trapezoid {
        left_x: beam.start_x,
        right_x: beam.end_x,
        left_top: start_top,
        left_bottom: start_bottom,
        right_top: end_top,
        right_bottom: end_bottom,
        color: palette::BEAM_BODY,
    });
    // Core insets vertically by a quarter of the local beam height.
    cmds.push(DrawCmd::Trapezoid {
        left_x: beam.start_x,
        right_x: beam.end_x,
        left_top: start_top + beam.start_height * 0.25,
        left_bottom: start_bottom - beam.start_height * 0.25,
        right_top: end_top + beam.end_height * 0.25,
        right_bottom: end_bottom - beam.end_height * 0.25,
        color: palette::BEAM_CORE,
    });
}

fn text_centered(text: &str, x: f32, y: f32, font: &'static str) -> DrawCmd {
    DrawCmd::Text {
        text: text.to_owned(),
        x,
        y,
        color: palette::CHROME,
        font,
        align: TextAlign::Center,
    }
}
