//! Particle emitters and screen shake. Everything here is cosmetic.

use glam::Vec2;
use rand::Rng;

use crate::constants::effects;
use crate::render::Color;
use crate::systems::pools::{ImpactRing, Particle, ParticleKind, Pools};

fn particle(kind: ParticleKind, pos: Vec2, vel: Vec2, size: f32, color: Color, life: f32) -> Particle {
    Particle {
        kind,
        pos,
        vel,
        size,
        color,
        life,
        max_life: life,
    }
}

/// Dust kicked up on landing or by a meteor strike.
pub fn dust_burst(pools: &mut Pools, rng: &mut impl Rng, pos: Vec2, count: usize, color: Color) {
    for _ in 0..count {
        let vel = Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(-1.5..-0.2));
        let life = rng.random_range(20.0..40.0);
        pools.particles.push(particle(ParticleKind::Dust, pos, vel, rng.random_range(1.5..3.5), color, life));
    }
}

/// Exhaust left behind by a mid-air boost.
pub fn boost_trail(pools: &mut Pools, rng: &mut impl Rng, pos: Vec2) {
    for _ in 0..8 {
        let vel = Vec2::new(rng.random_range(-2.5..-0.5), rng.random_range(0.5..2.5));
        let color = if rng.random_bool(0.5) { Color::hex(0xff8800) } else { Color::hex(0xffdd44) };
        pools.particles.push(particle(ParticleKind::Boost, pos, vel, rng.random_range(2.0..4.0), color, 18.0));
    }
}

/// Debris, a ring and screen shake for a collision.
pub fn hit_burst(pools: &mut Pools, rng: &mut impl Rng, pos: Vec2, shake: &mut f32) {
    for _ in 0..14 {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(1.0..4.0);
        let vel = Vec2::from_angle(angle) * speed;
        pools.particles.push(particle(ParticleKind::Hit, pos, vel, rng.random_range(2.0..4.0), Color::RED, 30.0));
    }
    pools.rings.push(ImpactRing::new(pos, Color::RED));
    *shake = effects::SHAKE_ON_HIT;
}

/// Glitter around a collected pickup.
pub fn sparkle(pools: &mut Pools, rng: &mut impl Rng, pos: Vec2, color: Color) {
    for _ in 0..6 {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let vel = Vec2::from_angle(angle) * rng.random_range(0.5..2.0);
        pools.particles.push(particle(ParticleKind::Sparkle, pos, vel, 2.0, color, 24.0));
    }
}

/// A single glowing ember thrown up by a volcano.
pub fn ember(pools: &mut Pools, rng: &mut impl Rng, pos: Vec2) {
    let vel = Vec2::new(rng.random_range(-0.6..0.6), rng.random_range(-2.2..-1.2));
    pools.particles.push(particle(ParticleKind::Ember, pos, vel, rng.random_range(1.5..2.5), Color::hex(0xff5522), 70.0));
}

/// Decays the shake amplitude, snapping to zero below the floor.
pub fn decay_shake(shake: f32, frames: f32) -> f32 {
    let next = shake * effects::SHAKE_DECAY.powf(frames);
    if next < effects::SHAKE_FLOOR {
        0.0
    } else {
        next
    }
}

/// The camera offset for a given shake amplitude.
pub fn shake_offset(shake: f32, rng: &mut impl Rng) -> Vec2 {
    if shake <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(rng.random_range(-shake..shake), rng.random_range(-shake..shake))
}
