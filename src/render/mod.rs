//! Drawing for every screen, expressed against a minimal primitive interface.
//!
//! The core computes every coordinate itself and only asks the [`Renderer`] to
//! fill rectangles and circles and to draw text. State is read through a
//! [`Frame`] snapshot; nothing here mutates the simulation.

pub mod font;
mod hud;
mod menu;
mod scene;

use crate::game::Game;
use crate::systems::state::ScreenState;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::hex(0xffffff);
    pub const BLACK: Color = Color::hex(0x000000);
    pub const GOLD: Color = Color::hex(0xffd700);
    pub const RED: Color = Color::hex(0xff4444);
    pub const GREY: Color = Color::hex(0x888888);
    pub const CYAN: Color = Color::hex(0x00aaff);
    pub const MINT: Color = Color::hex(0x00ff88);

    /// Builds an opaque color from `0xRRGGBB`.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 0xff,
        }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Same color with its alpha scaled by `opacity` in `0.0..=1.0`.
    pub fn fade(self, opacity: f32) -> Self {
        let a = (f32::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        self.with_alpha(a)
    }

    /// Moves each channel towards white (`amount > 0`) or black (`amount < 0`).
    pub fn shade(self, amount: f32) -> Self {
        let adjust = |c: u8| {
            let c = f32::from(c);
            let target = if amount >= 0.0 { 255.0 } else { 0.0 };
            (c + (target - c) * amount.abs().min(1.0)).round() as u8
        };
        Self {
            r: adjust(self.r),
            g: adjust(self.g),
            b: adjust(self.b),
            a: self.a,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Drawing primitives a host must provide.
pub trait Renderer {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color, align: TextAlign);
    fn text_width(&self, text: &str, size: f32) -> f32;

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.fill_rect(x, y, w, 1.0, color);
        self.fill_rect(x, y + h - 1.0, w, 1.0, color);
        self.fill_rect(x, y, 1.0, h, color);
        self.fill_rect(x + w - 1.0, y, 1.0, h, color);
    }

    /// An approximated ring made from small squares along the circumference.
    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let steps = (radius * 1.5).clamp(8.0, 64.0) as usize;
        for i in 0..steps {
            let angle = i as f32 / steps as f32 * std::f32::consts::TAU;
            self.fill_rect(cx + angle.cos() * radius - 1.0, cy + angle.sin() * radius - 1.0, 2.0, 2.0, color);
        }
    }
}

/// Read-only per-frame context handed to every draw routine.
pub struct Frame<'a> {
    pub game: &'a Game,
    /// Seconds since the game started, for cosmetic animation.
    pub time: f32,
}

/// Renders the active screen followed by the transition overlay.
pub fn draw(game: &Game, renderer: &mut dyn Renderer) {
    let frame = Frame { game, time: game.clock() };

    match game.screen() {
        ScreenState::Title => menu::draw_title(&frame, renderer),
        ScreenState::DifficultySelect => menu::draw_difficulty_select(&frame, renderer),
        ScreenState::CharSelect => menu::draw_char_select(&frame, renderer),
        ScreenState::StageSelect => menu::draw_stage_select(&frame, renderer),
        ScreenState::Playing => {
            if let Some(session) = game.session() {
                scene::draw_session(&frame, session, renderer);
                hud::draw_hud(session, renderer);
            }
        }
        ScreenState::StageCleared => {
            if let Some(session) = game.session() {
                scene::draw_session(&frame, session, renderer);
            }
            menu::draw_stage_cleared(&frame, renderer);
        }
        ScreenState::GameOver => {
            if let Some(session) = game.session() {
                scene::draw_session(&frame, session, renderer);
            }
            menu::draw_game_over(&frame, renderer);
        }
    }

    draw_overlay(game, renderer);
}

fn draw_overlay(game: &Game, renderer: &mut dyn Renderer) {
    let transition = game.transition();
    let size = crate::constants::CANVAS_SIZE;

    let opacity = transition.opacity();
    if opacity > 0.0 {
        renderer.fill_rect(0.0, 0.0, size.x, size.y, Color::BLACK.fade(opacity));
    }

    if let Some((color, strength)) = transition.flash() {
        renderer.fill_rect(0.0, 0.0, size.x, size.y, color.fade(strength * 0.6));
    }
}
