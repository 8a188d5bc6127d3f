use thousands::Separable;

use crate::constants::CANVAS_SIZE;
use crate::render::{Color, Renderer, TextAlign};
use crate::systems::session::Session;

pub fn draw_hud(session: &Session, r: &mut dyn Renderer) {
    let player = &session.player;

    for i in 0..crate::constants::player::LIVES {
        let color = if i < player.lives { Color::RED } else { Color::GREY.fade(0.4) };
        let x = 16.0 + f32::from(i) * 18.0;
        r.fill_circle(x, 20.0, 4.0, color);
        r.fill_circle(x + 6.0, 20.0, 4.0, color);
        r.fill_rect(x - 3.0, 21.0, 12.0, 5.0, color);
    }

    for i in 0..player.max_booster {
        let x = 16.0 + f32::from(i) * 14.0;
        let filled = i < player.booster;
        r.fill_rect(x, 34.0, 10.0, 8.0, if filled { Color::CYAN } else { Color::GREY.fade(0.3) });
    }
    if player.booster < player.max_booster && !player.airborne {
        let charge = player.booster_timer / crate::constants::player::BOOSTER_RECHARGE;
        r.fill_rect(16.0, 44.0, 38.0 * charge.clamp(0.0, 1.0), 2.0, Color::CYAN.fade(0.6));
    }

    let score = session.final_score().separate_with_commas();
    r.draw_text(&score, CANVAS_SIZE.x - 16.0, 14.0, 18.0, Color::WHITE, TextAlign::Right);
    r.draw_text(
        &format!("{}m", session.run.distance.floor() as u32),
        CANVAS_SIZE.x - 16.0,
        38.0,
        12.0,
        Color::GREY.shade(0.4),
        TextAlign::Right,
    );
    r.draw_text(
        &format!("COINS {}", session.run.coins),
        CANVAS_SIZE.x - 16.0,
        54.0,
        10.0,
        Color::GOLD,
        TextAlign::Right,
    );

    let bar_width = CANVAS_SIZE.x - 120.0;
    let bar_x = 60.0;
    r.fill_rect(bar_x, CANVAS_SIZE.y - 30.0, bar_width, 6.0, Color::GREY.fade(0.35));
    r.fill_rect(bar_x, CANVAS_SIZE.y - 30.0, bar_width * session.progress(), 6.0, Color::MINT);
    r.draw_text(session.stage.name, CANVAS_SIZE.x / 2.0, CANVAS_SIZE.y - 48.0, 10.0, Color::GREY.shade(0.5), TextAlign::Center);

    let combo = session.run.combo;
    if combo.count >= 2 {
        let fade = (combo.timer / crate::constants::scoring::COMBO_WINDOW).clamp(0.0, 1.0);
        r.draw_text(
            &format!("COMBO x{}", combo.count),
            CANVAS_SIZE.x / 2.0,
            80.0,
            16.0,
            Color::CYAN.fade(0.4 + 0.6 * fade),
            TextAlign::Center,
        );
    }

    if session.run.spawner.is_resting() && session.run.distance > 1.0 {
        r.draw_text("BREATHE", CANVAS_SIZE.x / 2.0, 110.0, 10.0, Color::MINT.fade(0.5), TextAlign::Center);
    }
}
