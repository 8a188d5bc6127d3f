//! [`Renderer`] over an SDL2 window canvas.

use sdl2::pixels::Color as SdlColor;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;
use tracing::trace;

use crate::render::{font, Color, Renderer, TextAlign};

pub struct SdlRenderer {
    canvas: Canvas<Window>,
}

fn sdl_color(color: Color) -> SdlColor {
    SdlColor::RGBA(color.r, color.g, color.b, color.a)
}

impl SdlRenderer {
    pub fn new(mut canvas: Canvas<Window>) -> Self {
        canvas.set_blend_mode(BlendMode::Blend);
        Self { canvas }
    }

    pub fn present(&mut self) {
        self.canvas.present();
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let rect = Rect::new(x.round() as i32, y.round() as i32, w.round().max(1.0) as u32, h.round().max(1.0) as u32);
        if let Err(error) = self.canvas.fill_rect(rect) {
            trace!(%error, "fill_rect failed");
        }
    }
}

impl Renderer for SdlRenderer {
    fn clear(&mut self, color: Color) {
        self.canvas.set_draw_color(sdl_color(color));
        self.canvas.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.canvas.set_draw_color(sdl_color(color));
        self.rect(x, y, w, h);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.canvas.set_draw_color(sdl_color(color));
        // One horizontal span per row
        let rows = radius.ceil() as i32;
        for dy in -rows..=rows {
            let dy = dy as f32;
            let half = (radius * radius - dy * dy).max(0.0).sqrt();
            if half > 0.0 {
                self.rect(cx - half, cy + dy, half * 2.0, 1.0);
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color, align: TextAlign) {
        let width = self.text_width(text, size);
        let left = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        self.canvas.set_draw_color(sdl_color(color));
        let mut pixels = Vec::new();
        font::rasterize(text, left, y, size, |px, py, side| pixels.push((px, py, side)));
        for (px, py, side) in pixels {
            self.rect(px, py, side, side);
        }
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        font::text_width(text, size)
    }
}
