//! Canvas2D backend

use std::f64::consts::PI;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::scene::{DrawCommand, mirrored_x};
use crate::consts::GARBAGE_LINE_WIDTH;
use crate::sim::SpriteFrame;

/// Walk-cycle images, relative to the page
const SPRITE_PATHS: [&str; 2] = ["Images/man1.png", "Images/man2.png"];

/// Draws scenes onto a 2D canvas
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sprites: [Option<HtmlImageElement>; 2],
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        let sprites = SPRITE_PATHS.map(|path| {
            let image = HtmlImageElement::new().ok()?;
            image.set_src(path);
            Some(image)
        });
        if sprites.iter().any(Option::is_none) {
            log::warn!("Could not create sprite images");
        }
        Self { ctx, sprites }
    }

    /// True once the first walk frame has finished loading
    pub fn sprites_ready(&self) -> bool {
        self.sprites[0]
            .as_ref()
            .is_some_and(|img| img.complete() && img.natural_width() > 0)
    }

    /// Call `callback` as each sprite image finishes loading
    pub fn on_sprites_loaded(&self, callback: &js_sys::Function) {
        for image in self.sprites.iter().flatten() {
            image.set_onload(Some(callback));
        }
    }

    pub fn draw(&self, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::Clear { size } => {
                    self.ctx
                        .clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
                }
                DrawCommand::HalfDisc {
                    center,
                    radius,
                    fill,
                    stroke,
                    line_width,
                } => {
                    self.ctx.set_fill_style_str(fill);
                    self.ctx.set_stroke_style_str(stroke);
                    self.ctx.set_line_width(*line_width as f64);
                    self.ctx.begin_path();
                    self.ctx
                        .arc_with_anticlockwise(
                            center.x as f64,
                            center.y as f64,
                            *radius as f64,
                            0.0,
                            PI,
                            true,
                        )
                        .ok();
                    self.ctx.close_path();
                    self.ctx.fill();
                    self.ctx.stroke();
                }
                DrawCommand::Rect {
                    pos,
                    size,
                    fill,
                    stroke,
                } => {
                    let (x, y, w, h) = (pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                    self.ctx.set_fill_style_str(fill);
                    self.ctx.set_stroke_style_str(stroke);
                    self.ctx.set_line_width(GARBAGE_LINE_WIDTH as f64);
                    self.ctx.fill_rect(x, y, w, h);
                    self.ctx.stroke_rect(x, y, w, h);
                }
                DrawCommand::Sprite {
                    frame,
                    pos,
                    size,
                    mirrored,
                } => self.draw_sprite(*frame, *pos, *size, *mirrored),
            }
        }
    }

    fn draw_sprite(&self, frame: SpriteFrame, pos: glam::Vec2, size: glam::Vec2, mirrored: bool) {
        let index = match frame {
            SpriteFrame::First => 0,
            SpriteFrame::Second => 1,
        };
        let Some(image) = &self.sprites[index] else {
            return;
        };

        self.ctx.save();
        let result = if mirrored {
            self.ctx.scale(-1.0, 1.0).ok();
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    mirrored_x(pos, size) as f64,
                    pos.y as f64,
                    size.x as f64,
                    size.y as f64,
                )
        } else {
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    pos.x as f64,
                    pos.y as f64,
                    size.x as f64,
                    size.y as f64,
                )
        };
        if let Err(e) = result {
            log::warn!("Sprite draw failed: {:?}", e);
        }
        self.ctx.restore();
    }
}
