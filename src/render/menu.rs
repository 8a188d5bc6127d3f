use thousands::Separable;

use crate::constants::{CANVAS_SIZE, GROUND_Y};
use crate::render::{Color, Frame, Renderer, TextAlign};
use crate::stage::{Difficulty, CHARACTERS, MOON_FACTS, STAGES};

const BACKDROP: Color = Color::hex(0x0d0d1f);
const CENTER: f32 = CANVAS_SIZE.x / 2.0;

fn backdrop(frame: &Frame, r: &mut dyn Renderer) {
    r.clear(BACKDROP);
    // A fixed sprinkle of stars, twinkling with the clock
    for i in 0..40u32 {
        let x = (i.wrapping_mul(97) % 400) as f32;
        let y = (i.wrapping_mul(53) % 500) as f32;
        let twinkle = 0.5 + 0.5 * (frame.time * 2.0 + i as f32).sin();
        r.fill_rect(x, y, 1.5, 1.5, Color::WHITE.fade(0.2 + 0.6 * twinkle));
    }
    r.fill_rect(0.0, GROUND_Y, CANVAS_SIZE.x, CANVAS_SIZE.y - GROUND_Y, Color::hex(0x4a4a5a));
}

fn hint(text: &str, frame: &Frame, r: &mut dyn Renderer) {
    let pulse = 0.5 + 0.5 * (frame.time * 3.0).sin();
    r.draw_text(text, CENTER, CANVAS_SIZE.y - 60.0, 10.0, Color::WHITE.fade(0.4 + 0.6 * pulse), TextAlign::Center);
}

pub fn draw_title(frame: &Frame, r: &mut dyn Renderer) {
    backdrop(frame, r);
    r.fill_circle(300.0, 140.0, 34.0, Color::hex(0x2a6fdb));
    r.draw_text("MOON", CENTER, 220.0, 48.0, Color::WHITE, TextAlign::Center);
    r.draw_text("RUNNER", CENTER, 280.0, 48.0, Color::GOLD, TextAlign::Center);

    let x = frame.game.title_rover_x();
    r.fill_rect(x - 13.0, GROUND_Y - 22.0, 26.0, 12.0, Color::hex(0xdddddd));
    r.fill_circle(x - 8.0, GROUND_Y - 5.0, 5.0, Color::hex(0x333333));
    r.fill_circle(x + 8.0, GROUND_Y - 5.0, 5.0, Color::hex(0x333333));

    hint("PRESS SPACE TO START", frame, r);
    if frame.game.is_muted() {
        r.draw_text("MUTED", CANVAS_SIZE.x - 10.0, 10.0, 8.0, Color::GREY, TextAlign::Right);
    }
}

pub fn draw_difficulty_select(frame: &Frame, r: &mut dyn Renderer) {
    backdrop(frame, r);
    r.draw_text("DIFFICULTY", CENTER, 120.0, 24.0, Color::WHITE, TextAlign::Center);

    let selected = frame.game.menu().difficulty;
    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let y = 200.0 + i as f32 * 60.0;
        let active = *difficulty == selected;
        let color = if active { Color::GOLD } else { Color::GREY.shade(0.3) };
        if active {
            r.stroke_rect(60.0, y - 10.0, CANVAS_SIZE.x - 120.0, 40.0, Color::GOLD);
        }
        r.draw_text(&format!("{} {}", i + 1, difficulty), CENTER, y, 18.0, color, TextAlign::Center);
        r.draw_text(
            &format!("SPEED x{:.2}", difficulty.speed_multiplier()),
            CENTER,
            y + 20.0,
            8.0,
            color.fade(0.7),
            TextAlign::Center,
        );
    }
    hint("< > TO CHOOSE, SPACE TO CONFIRM", frame, r);
}

pub fn draw_char_select(frame: &Frame, r: &mut dyn Renderer) {
    backdrop(frame, r);
    r.draw_text("CHOOSE YOUR RUNNER", CENTER, 100.0, 20.0, Color::WHITE, TextAlign::Center);

    let lifetime = frame.game.save().lifetime_distance;
    let selected = frame.game.menu().character;
    for (i, character) in CHARACTERS.iter().enumerate() {
        let column = (i % 2) as f32;
        let row = (i / 2) as f32;
        let x = 60.0 + column * 150.0;
        let y = 160.0 + row * 110.0;
        let unlocked = lifetime >= character.unlock_distance;

        let frame_color = if i == selected { Color::GOLD } else { Color::GREY.fade(0.5) };
        r.stroke_rect(x, y, 130.0, 90.0, frame_color);
        if unlocked {
            r.draw_text(character.name, x + 65.0, y + 66.0, 10.0, Color::WHITE, TextAlign::Center);
            r.fill_rect(x + 50.0, y + 20.0, 30.0, 30.0, Color::hex(0xdddddd));
        } else {
            r.draw_text("LOCKED", x + 65.0, y + 30.0, 12.0, Color::GREY, TextAlign::Center);
            r.draw_text(
                &format!("{}m", character.unlock_distance.separate_with_commas()),
                x + 65.0,
                y + 56.0,
                10.0,
                Color::GREY,
                TextAlign::Center,
            );
        }
    }

    r.draw_text(
        &format!("TOTAL DISTANCE {}m", lifetime.separate_with_commas()),
        CENTER,
        500.0,
        10.0,
        Color::MINT,
        TextAlign::Center,
    );
    hint("< > TO CHOOSE, SPACE TO CONFIRM", frame, r);
}

pub fn draw_stage_select(frame: &Frame, r: &mut dyn Renderer) {
    backdrop(frame, r);
    r.draw_text("SELECT STAGE", CENTER, 70.0, 22.0, Color::WHITE, TextAlign::Center);

    let save = frame.game.save();
    let cursor = frame.game.menu().stage;
    for (i, stage) in STAGES.iter().enumerate() {
        let y = 120.0 + i as f32 * 80.0;
        let unlocked = save.is_unlocked(i);
        let border = if i == cursor { Color::GOLD } else { Color::GREY.fade(0.5) };

        r.fill_rect(30.0, y, CANVAS_SIZE.x - 60.0, 68.0, stage.theme.sky.with_alpha(220));
        r.stroke_rect(30.0, y, CANVAS_SIZE.x - 60.0, 68.0, border);

        if !unlocked {
            r.draw_text(&format!("{} LOCKED", stage.id), CENTER, y + 28.0, 14.0, Color::GREY, TextAlign::Center);
            continue;
        }

        r.draw_text(&format!("{} {}", stage.id, stage.name), 44.0, y + 12.0, 12.0, Color::WHITE, TextAlign::Left);
        r.draw_text(
            &format!("{}m", stage.target_distance as u32),
            CANVAS_SIZE.x - 44.0,
            y + 12.0,
            10.0,
            Color::MINT,
            TextAlign::Right,
        );
        r.draw_text(stage.description, 44.0, y + 32.0, 7.0, Color::GREY.shade(0.4), TextAlign::Left);

        let best = save.best_score(i);
        if best > 0 {
            r.draw_text(&format!("BEST {}", best.separate_with_commas()), 44.0, y + 48.0, 8.0, Color::GOLD, TextAlign::Left);
        }
        if save.badges.contains(&stage.id) {
            r.fill_circle(CANVAS_SIZE.x - 52.0, y + 48.0, 7.0, Color::GOLD);
        }
    }
    hint("1-5 OR SPACE TO LAUNCH", frame, r);
}

pub fn draw_stage_cleared(frame: &Frame, r: &mut dyn Renderer) {
    let Some(summary) = frame.game.last_run() else {
        return;
    };
    r.fill_rect(0.0, 0.0, CANVAS_SIZE.x, CANVAS_SIZE.y, Color::BLACK.fade(0.55));
    r.fill_rect(40.0, 180.0, CANVAS_SIZE.x - 80.0, 300.0, Color::hex(0x1a1a2e));
    r.stroke_rect(40.0, 180.0, CANVAS_SIZE.x - 80.0, 300.0, Color::GOLD);

    r.draw_text("STAGE CLEAR!", CENTER, 210.0, 24.0, Color::GOLD, TextAlign::Center);
    if let Some(stage) = STAGES.get(summary.stage) {
        r.draw_text(stage.name, CENTER, 250.0, 12.0, Color::WHITE, TextAlign::Center);
    }
    r.draw_text(&summary.score.separate_with_commas(), CENTER, 290.0, 30.0, Color::WHITE, TextAlign::Center);
    if summary.new_best {
        r.draw_text("NEW BEST!", CENTER, 335.0, 12.0, Color::MINT, TextAlign::Center);
    }
    r.draw_text(&format!("COINS {}", summary.coins), CENTER, 365.0, 10.0, Color::GOLD, TextAlign::Center);
    r.fill_circle(CENTER, 410.0, 14.0, Color::GOLD);

    let next = if summary.stage + 1 < STAGES.len() { "> NEXT STAGE   SPACE MENU" } else { "SPACE MENU" };
    hint(next, frame, r);
}

pub fn draw_game_over(frame: &Frame, r: &mut dyn Renderer) {
    let Some(summary) = frame.game.last_run() else {
        return;
    };
    r.fill_rect(0.0, 0.0, CANVAS_SIZE.x, CANVAS_SIZE.y, Color::BLACK.fade(0.6));
    r.fill_rect(40.0, 160.0, CANVAS_SIZE.x - 80.0, 340.0, Color::hex(0x1a1a2e));
    r.stroke_rect(40.0, 160.0, CANVAS_SIZE.x - 80.0, 340.0, Color::RED);

    r.draw_text("GAME OVER", CENTER, 190.0, 26.0, Color::RED, TextAlign::Center);
    r.draw_text(&summary.score.separate_with_commas(), CENTER, 240.0, 28.0, Color::WHITE, TextAlign::Center);
    if summary.new_best {
        r.draw_text("NEW BEST!", CENTER, 282.0, 12.0, Color::MINT, TextAlign::Center);
    }
    r.draw_text(
        &format!("{}m", summary.distance.floor() as u32),
        CENTER,
        305.0,
        12.0,
        Color::GREY.shade(0.4),
        TextAlign::Center,
    );

    if let Some((title, fact)) = MOON_FACTS.get(summary.fact) {
        r.draw_text("MOON FACT", CENTER, 350.0, 10.0, Color::GOLD, TextAlign::Center);
        r.draw_text(title, CENTER, 372.0, 10.0, Color::WHITE, TextAlign::Center);
        for (i, line) in wrap(fact, 34).iter().enumerate() {
            r.draw_text(line, CENTER, 396.0 + i as f32 * 14.0, 7.0, Color::GREY.shade(0.5), TextAlign::Center);
        }
    }
    hint("SPACE RETRY   ESC MENU", frame, r);
}

/// Greedy word wrap to at most `width` characters per line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
