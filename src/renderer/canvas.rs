//! Canvas2D executor
//!
//! Walks a draw-command list against a 2D rendering context. Pure
//! consumer: game state is never touched, and drawing failures (a sprite
//! that decoded badly, a context call rejected mid-resize) degrade to
//! the fallback rectangle or are dropped.

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::scene::{palette, DrawCmd, ImageId, TextAlign};
use crate::sim::Rect;

/// Borrowed sprite handles for one frame; either may be absent.
#[derive(Clone, Copy, Default)]
pub struct SpriteImages<'a> {
    pub player: Option<&'a HtmlImageElement>,
    pub enemy: Option<&'a HtmlImageElement>,
}

impl<'a> SpriteImages<'a> {
    fn get(&self, id: ImageId) -> Option<&'a HtmlImageElement> {
        match id {
            ImageId::Player => self.player,
            ImageId::Enemy => self.enemy,
        }
    }
}

/// Executes draw commands against one canvas context.
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    pub fn paint(&self, cmds: &[DrawCmd], images: SpriteImages<'_>) {
        for cmd in cmds {
            match cmd {
                DrawCmd::Clear { color } => self.clear(color),
                DrawCmd::Rect { rect, color } => self.fill_rect(rect, color),
                DrawCmd::StrokeRect {
                    rect,
                    color,
                    line_width,
                } => {
                    self.ctx.set_stroke_style_str(color);
                    self.ctx.set_line_width(*line_width as f64);
                    self.ctx
                        .stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
                }
                DrawCmd::Sprite {
                    image,
                    rect,
                    rotation,
                } => self.sprite(*image, rect, *rotation, images),
                DrawCmd::Trapezoid {
                    left_x,
                    right_x,
                    left_top,
                    left_bottom,
                    right_top,
                    right_bottom,
                    color,
                } => {
                    self.ctx.set_fill_style_str(color);
                    self.ctx.begin_path();
                    self.ctx.move_to(*left_x as f64, *left_top as f64);
                    self.ctx.line_to(*right_x as f64, *right_top as f64);
                    self.ctx.line_to(*right_x as f64, *right_bottom as f64);
                    self.ctx.line_to(*left_x as f64, *left_bottom as f64);
                    self.ctx.close_path();
                    self.ctx.fill();
                }
                DrawCmd::Text {
                    text,
                    x,
                    y,
                    color,
                    font,
                    align,
                } => {
                    self.ctx.set_fill_style_str(color);
                    self.ctx.set_font(font);
                    self.ctx.set_text_align(match align {
                        TextAlign::Left => "left",
                        TextAlign::Center => "center",
                        TextAlign::Right => "right",
                    });
                    let _ = self.ctx.fill_text(text, *x as f64, *y as f64);
                }
            }
        }
    }

    fn clear(&self, color: &str) {
        let Some(canvas) = self.ctx.canvas() else {
            return;
        };
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    }

    fn fill_rect(&self, rect: &Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    /// Draw a sprite, falling back to the entity rectangle when the
    /// image handle is missing or the context rejects the draw.
    fn sprite(&self, id: ImageId, rect: &Rect, rotation: f32, images: SpriteImages<'_>) {
        let fallback = match id {
            ImageId::Player => palette::PLAYER,
            ImageId::Enemy => palette::ENEMY,
        };
        let Some(img) = images.get(id) else {
            self.fill_rect(rect, fallback);
            return;
        };

        let drawn = if rotation == 0.0 {
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    rect.x as f64,
                    rect.y as f64,
                    rect.w as f64,
                    rect.h as f64,
                )
                .is_ok()
        } else {
            // Rotate about the rect center; the image is laid out with
            // swapped extents so the rotated result fills the rect.
            let center = rect.center();
            self.ctx.save();
            let ok = self
                .ctx
                .translate(center.x as f64, center.y as f64)
                .and_then(|_| self.ctx.rotate(rotation as f64))
                .and_then(|_| {
                    self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        -(rect.h as f64) / 2.0,
                        -(rect.w as f64) / 2.0,
                        rect.h as f64,
                        rect.w as f64,
                    )
                })
                .is_ok();
            self.ctx.restore();
            ok
        };

        if !drawn {
            self.fill_rect(rect, fallback);
        }
    }
}
