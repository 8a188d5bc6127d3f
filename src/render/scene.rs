use glam::Vec2;

use crate::constants::{player as player_consts, CANVAS_SIZE, GROUND_Y};
use crate::render::{Color, Frame, Renderer, TextAlign};
use crate::stage::CharacterKind;
use crate::systems::pools::{Decoration, DecorationKind, Obstacle, ObstacleKind, ParticleKind, Pickup, PickupKind};
use crate::systems::session::Session;

/// Draws the world of a run: sky, backdrop, ground, obstacles, pickups, the player and effects.
pub fn draw_session(frame: &Frame, session: &Session, r: &mut dyn Renderer) {
    let theme = &session.stage.theme;
    let cam = session.camera;

    r.clear(theme.sky);

    for star in &session.pools.stars {
        let alpha = 0.5 + 0.5 * star.twinkle.sin();
        r.fill_rect(star.pos.x, star.pos.y, star.size, star.size, Color::WHITE.fade(0.3 + 0.7 * alpha));
    }

    let mut decorations: Vec<&Decoration> = session.pools.decorations.iter().collect();
    decorations.sort_by_key(|d| d.layer().unwrap_or(4));
    for decoration in decorations {
        draw_decoration(decoration, cam, theme.ground.shade(-0.35), frame.time, r);
    }

    r.fill_rect(0.0, GROUND_Y + cam.y, CANVAS_SIZE.x, CANVAS_SIZE.y - GROUND_Y, theme.ground);
    for tile in &session.pools.ground {
        let color = if tile.dark { theme.ground_accent } else { theme.ground.shade(0.08) };
        r.fill_rect(tile.x + cam.x, GROUND_Y - tile.bump + cam.y, 20.0, tile.bump + 3.0, color);
    }

    for obstacle in &session.pools.obstacles {
        draw_obstacle(obstacle, cam, theme.ground_accent, frame.time, r);
    }

    for pickup in &session.pools.pickups {
        draw_pickup(pickup, cam, r);
    }

    if session.player.is_visible() {
        draw_player(session, cam, r);
    }

    for particle in &session.pools.particles {
        let color = particle.color.fade(particle.opacity());
        let pos = particle.pos + cam;
        match particle.kind {
            ParticleKind::Sparkle | ParticleKind::Ember => r.fill_circle(pos.x, pos.y, particle.size, color),
            ParticleKind::Dust | ParticleKind::Boost | ParticleKind::Hit => {
                r.fill_rect(pos.x, pos.y, particle.size, particle.size, color)
            }
        }
    }

    for ring in &session.pools.rings {
        r.stroke_circle(ring.pos.x + cam.x, ring.pos.y + cam.y, ring.radius, ring.color.fade(ring.opacity()));
    }

    for text in &session.pools.texts {
        r.draw_text(&text.text, text.pos.x, text.pos.y, 12.0, text.color.fade(text.opacity()), TextAlign::Center);
    }
}

fn draw_decoration(decoration: &Decoration, cam: Vec2, silhouette: Color, time: f32, r: &mut dyn Renderer) {
    // Background objects only take a fraction of the shake
    let pos = decoration.pos + cam * 0.3;
    match decoration.kind {
        DecorationKind::Mountain { width, height } => {
            let steps = 6;
            for i in 0..steps {
                let t = i as f32 / steps as f32;
                let w = width * (1.0 - t);
                let h = height / steps as f32;
                r.fill_rect(pos.x + (width - w) / 2.0, pos.y - h * (i + 1) as f32, w, h + 1.0, silhouette);
            }
        }
        DecorationKind::Volcano { width, height, .. } => {
            let steps = 5;
            for i in 0..steps {
                let t = i as f32 / steps as f32;
                let w = width * (1.0 - t * 0.7);
                let h = height / steps as f32;
                r.fill_rect(pos.x + (width - w) / 2.0, pos.y - h * (i + 1) as f32, w, h + 1.0, silhouette.shade(0.1));
            }
            let glow = 0.5 + 0.5 * (time * 4.0).sin();
            r.fill_rect(pos.x + width * 0.4, pos.y - height - 2.0, width * 0.2, 4.0, Color::hex(0xff5522).fade(glow));
        }
        DecorationKind::Earth { size } => {
            r.fill_circle(pos.x, pos.y, size, Color::hex(0x2a6fdb));
            r.fill_circle(pos.x - size * 0.3, pos.y - size * 0.2, size * 0.35, Color::hex(0x3c9d4e));
            r.fill_circle(pos.x + size * 0.35, pos.y + size * 0.3, size * 0.25, Color::hex(0x3c9d4e));
        }
        DecorationKind::Planet { size, color } => {
            r.fill_circle(pos.x, pos.y, size, color);
            r.fill_rect(pos.x - size * 1.6, pos.y - 1.0, size * 3.2, 2.0, color.shade(0.4).fade(0.6));
        }
        DecorationKind::Sun { size } => {
            r.fill_circle(pos.x, pos.y, size * 1.4, Color::hex(0xfff3b0).fade(0.2));
            r.fill_circle(pos.x, pos.y, size, Color::hex(0xfff3b0));
        }
        DecorationKind::Rocket => {
            r.fill_rect(pos.x - 3.0, pos.y - 14.0, 6.0, 14.0, Color::WHITE);
            r.fill_rect(pos.x - 2.0, pos.y, 4.0, 6.0 + (time * 30.0).sin().abs() * 4.0, Color::hex(0xff8800));
        }
        DecorationKind::Spaceship => {
            r.fill_rect(pos.x - 14.0, pos.y - 3.0, 28.0, 6.0, Color::GREY.shade(0.3));
            r.fill_circle(pos.x, pos.y - 4.0, 6.0, Color::CYAN.fade(0.7));
        }
        DecorationKind::DustStorm { width, life } => {
            let opacity = (life / 60.0).min(1.0) * 0.25;
            r.fill_rect(pos.x, pos.y, width, 60.0, Color::hex(0xb0a080).fade(opacity));
        }
        DecorationKind::ShootingStar { length, life } => {
            let opacity = (life / 30.0).clamp(0.0, 1.0);
            let steps = (length / 4.0) as usize;
            for i in 0..steps {
                let t = i as f32 * 4.0;
                let fade = opacity * (1.0 - i as f32 / steps as f32);
                r.fill_rect(pos.x + t, pos.y - t * 0.4, 2.0, 2.0, Color::WHITE.fade(fade));
            }
        }
        DecorationKind::Meteor { size } => {
            r.fill_circle(pos.x, pos.y, size, Color::hex(0xffaa66));
            r.fill_circle(pos.x + size, pos.y - size * 1.6, size * 0.6, Color::hex(0xff6633).fade(0.5));
        }
    }
}

fn draw_obstacle(obstacle: &Obstacle, cam: Vec2, accent: Color, time: f32, r: &mut dyn Renderer) {
    let x = obstacle.x - obstacle.width / 2.0 + cam.x;
    let y = obstacle.top() + cam.y;
    match obstacle.kind {
        ObstacleKind::Rock { .. } => {
            let rock = Color::hex(0x8a8a9a);
            r.fill_rect(x + obstacle.width * 0.15, y, obstacle.width * 0.7, obstacle.height * 0.4, rock.shade(0.1));
            r.fill_rect(x, y + obstacle.height * 0.3, obstacle.width, obstacle.height * 0.7, rock);
            r.fill_rect(x + 2.0, y + obstacle.height * 0.5, obstacle.width * 0.3, 2.0, rock.shade(-0.3));
        }
        ObstacleKind::Crater => {
            r.fill_rect(x, y, obstacle.width, obstacle.height, accent.shade(-0.4));
            r.fill_rect(x - 3.0, y - 2.0, obstacle.width + 6.0, 3.0, accent.shade(0.15));
        }
        ObstacleKind::Floating { phase } => {
            let pulse = 0.7 + 0.3 * (phase * 0.15).sin();
            r.fill_rect(x, y, obstacle.width, obstacle.height, Color::hex(0xaa44ff).fade(pulse));
            r.stroke_rect(x, y, obstacle.width, obstacle.height, Color::WHITE.fade(0.5));
        }
        ObstacleKind::Laser { warning, active } => {
            if active {
                r.fill_rect(0.0, y - 2.0, CANVAS_SIZE.x, obstacle.height + 4.0, Color::RED.fade(0.35));
                r.fill_rect(0.0, y, CANVAS_SIZE.x, obstacle.height, Color::hex(0xff8888));
            } else {
                let blink = ((time * 12.0) as u32 % 2 == 0) as u8 as f32;
                let urgency = 1.0 - warning;
                r.fill_rect(0.0, y + obstacle.height / 2.0 - 1.0, CANVAS_SIZE.x, 2.0, Color::RED.fade(0.2 + 0.5 * blink * urgency));
                r.draw_text("!", CANVAS_SIZE.x - 16.0, y - 14.0, 12.0, Color::RED.fade(0.5 + 0.5 * blink), TextAlign::Center);
            }
        }
    }
}

fn draw_pickup(pickup: &Pickup, cam: Vec2, r: &mut dyn Renderer) {
    let bob = (pickup.phase * 0.1).sin() * 3.0;
    let pos = pickup.pos + cam + Vec2::new(0.0, bob);
    match pickup.kind {
        PickupKind::Coin => {
            let squeeze = (pickup.phase * 0.08).cos().abs().max(0.2);
            r.fill_circle(pos.x, pos.y, 7.0 * squeeze.max(0.6), Color::GOLD);
            r.fill_rect(pos.x - 1.0, pos.y - 4.0, 2.0, 8.0, Color::GOLD.shade(-0.3));
        }
        PickupKind::Energy => {
            r.fill_circle(pos.x, pos.y, 11.0, Color::CYAN.fade(0.25));
            r.fill_rect(pos.x - 5.0, pos.y - 8.0, 10.0, 16.0, Color::CYAN);
            r.fill_rect(pos.x - 2.0, pos.y - 10.0, 4.0, 2.0, Color::CYAN.shade(0.4));
        }
    }
}

fn draw_player(session: &Session, cam: Vec2, r: &mut dyn Renderer) {
    let player = &session.player;
    let w = player_consts::HITBOX_WIDTH * player.squash.x;
    let h = player_consts::HITBOX_HEIGHT * player.squash.y;
    let feet = Vec2::new(player.x, player.y) + cam;
    let left = feet.x - w / 2.0;

    match session.character.kind {
        CharacterKind::Rover => {
            let body = Color::hex(0xdddddd);
            r.fill_rect(left, feet.y - h * 0.6, w, h * 0.35, body);
            r.fill_rect(left + w * 0.55, feet.y - h * 0.85, w * 0.3, h * 0.25, Color::CYAN.fade(0.8));
            r.fill_rect(left + w * 0.2, feet.y - h, 2.0, h * 0.4, Color::GREY);
            let spin = player.stride * 0.3;
            for wheel in [left + w * 0.2, left + w * 0.8] {
                r.fill_circle(wheel, feet.y - 5.0, 5.0, Color::hex(0x333333));
                r.fill_rect(wheel + spin.cos() * 3.0 - 1.0, feet.y - 5.0 + spin.sin() * 3.0 - 1.0, 2.0, 2.0, Color::GREY);
            }
        }
        CharacterKind::Astronaut => {
            let suit = Color::WHITE;
            let step = if player.airborne { 0.0 } else { (player.stride * 0.25).sin() * 3.0 };
            r.fill_rect(left + w * 0.2 + step, feet.y - h * 0.3, w * 0.2, h * 0.3, suit.shade(-0.1));
            r.fill_rect(left + w * 0.6 - step, feet.y - h * 0.3, w * 0.2, h * 0.3, suit.shade(-0.1));
            r.fill_rect(left + w * 0.15, feet.y - h * 0.7, w * 0.7, h * 0.42, suit);
            r.fill_rect(left, feet.y - h * 0.68, w * 0.2, h * 0.3, Color::GREY);
            r.fill_circle(feet.x, feet.y - h * 0.8, w * 0.32, suit);
            r.fill_circle(feet.x + 2.0, feet.y - h * 0.8, w * 0.2, Color::GOLD.shade(-0.2));
        }
    }
}
