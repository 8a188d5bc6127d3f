//! Transient entity pools and their per-frame update rules.
//!
//! A pool is a plain `Vec`; members are created by the spawner or the effect
//! emitters, mutated only by their own update pass, and removed once their
//! retirement rule fires.

use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;

use crate::constants::{effects, retire, spawn, CANVAS_SIZE, GROUND_Y};
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleKind {
    Rock { size: f32 },
    Crater,
    /// Hovering hazard; `phase` drives a cosmetic pulse.
    Floating { phase: f32 },
    /// A beam that warns for `warning` seconds, then arms and starts scrolling.
    Laser { warning: f32, active: bool },
}

/// An obstacle in world space.
///
/// `lift` is the height of the obstacle's bottom edge above the ground line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub x: f32,
    pub lift: f32,
    pub width: f32,
    pub height: f32,
    /// Set once the near-miss judgement has been made.
    pub scored: bool,
}

impl Obstacle {
    pub fn rock(x: f32, size: f32) -> Self {
        Self {
            kind: ObstacleKind::Rock { size },
            x,
            lift: 0.0,
            width: 20.0 * size * 1.3,
            height: 16.0 * size * 1.3,
            scored: false,
        }
    }

    pub fn crater(x: f32, width: f32) -> Self {
        Self {
            kind: ObstacleKind::Crater,
            x,
            lift: -2.0,
            width,
            height: 10.0,
            scored: false,
        }
    }

    pub fn floating(x: f32, lift: f32, width: f32, height: f32) -> Self {
        Self {
            kind: ObstacleKind::Floating { phase: 0.0 },
            x,
            lift,
            width,
            height,
            scored: false,
        }
    }

    pub fn laser(x: f32, lift: f32) -> Self {
        Self {
            kind: ObstacleKind::Laser {
                warning: spawn::LASER_WARNING,
                active: false,
            },
            x,
            lift,
            width: CANVAS_SIZE.x,
            height: spawn::LASER_THICKNESS,
            scored: false,
        }
    }

    pub fn is_laser(&self) -> bool {
        matches!(self.kind, ObstacleKind::Laser { .. })
    }

    /// Whether the obstacle can currently hurt the player. Lasers are harmless while warning.
    pub fn is_armed(&self) -> bool {
        !matches!(self.kind, ObstacleKind::Laser { active: false, .. })
    }

    /// Screen-space y of the top edge.
    pub fn top(&self) -> f32 {
        GROUND_Y - self.lift - self.height
    }

    pub fn bottom(&self) -> f32 {
        GROUND_Y - self.lift
    }

    /// Scrolls the obstacle by `shift` pixels. Lasers hold still until their warning runs out.
    pub fn advance(&mut self, shift: f32, dt: f32, frames: f32) {
        match &mut self.kind {
            ObstacleKind::Laser { warning, active } => {
                if *active {
                    self.x -= shift;
                } else {
                    *warning -= dt;
                    if *warning <= 0.0 {
                        *warning = 0.0;
                        *active = true;
                    }
                }
            }
            ObstacleKind::Floating { phase } => {
                *phase += frames;
                self.x -= shift;
            }
            ObstacleKind::Rock { .. } | ObstacleKind::Crater => self.x -= shift,
        }
    }

    pub fn is_retired(&self) -> bool {
        self.x < retire::OBSTACLE_X
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Coin,
    /// Restores one booster charge.
    Energy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    /// Cosmetic bob and spin.
    pub phase: f32,
}

impl Pickup {
    pub fn new(kind: PickupKind, pos: Vec2) -> Self {
        Self { kind, pos, phase: 0.0 }
    }

    pub fn advance(&mut self, shift: f32, frames: f32) {
        self.pos.x -= shift;
        self.phase += frames;
    }

    pub fn is_retired(&self) -> bool {
        self.pos.x < retire::PICKUP_X
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecorationKind {
    Mountain { width: f32, height: f32 },
    Earth { size: f32 },
    Planet { size: f32, color: Color },
    Rocket,
    Spaceship,
    Sun { size: f32 },
    Volcano { width: f32, height: f32, ember_timer: f32 },
    DustStorm { width: f32, life: f32 },
    ShootingStar { length: f32, life: f32 },
    Meteor { size: f32 },
}

/// Something the backdrop update asks the effect emitters to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecorationEffect {
    /// A meteor struck the ground here.
    Impact(Vec2),
    /// A volcano vented an ember from here.
    Ember(Vec2),
}

/// A purely cosmetic background object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub pos: Vec2,
}

impl Decoration {
    /// Parallax layer the object scrolls with, or `None` for objects with their own motion.
    pub fn layer(&self) -> Option<usize> {
        match self.kind {
            DecorationKind::Sun { .. } | DecorationKind::Earth { .. } | DecorationKind::Planet { .. } => Some(0),
            DecorationKind::Spaceship => Some(1),
            DecorationKind::Mountain { .. } | DecorationKind::Volcano { .. } => Some(2),
            DecorationKind::DustStorm { .. } => Some(3),
            DecorationKind::Rocket | DecorationKind::ShootingStar { .. } | DecorationKind::Meteor { .. } => None,
        }
    }

    fn advance(&mut self, speed: f32, frames: f32, effects: &mut SmallVec<[DecorationEffect; 4]>) -> bool {
        if let Some(layer) = self.layer() {
            self.pos.x -= speed * crate::constants::scroll::PARALLAX[layer] * frames;
        }

        match &mut self.kind {
            DecorationKind::Rocket => {
                self.pos.x -= 0.5 * frames;
                self.pos.y -= 1.2 * frames;
                self.pos.y > -60.0
            }
            DecorationKind::ShootingStar { life, .. } => {
                self.pos += Vec2::new(-5.0, 2.0) * frames;
                *life -= frames;
                *life > 0.0
            }
            DecorationKind::Meteor { .. } => {
                self.pos += Vec2::new(-1.5, 2.5) * frames;
                if self.pos.y >= GROUND_Y {
                    effects.push(DecorationEffect::Impact(Vec2::new(self.pos.x, GROUND_Y)));
                    return false;
                }
                true
            }
            DecorationKind::DustStorm { life, .. } => {
                *life -= frames;
                *life > 0.0
            }
            DecorationKind::Volcano {
                width,
                height,
                ember_timer,
            } => {
                *ember_timer -= frames;
                if *ember_timer <= 0.0 {
                    *ember_timer += 6.0;
                    let crater = Vec2::new(self.pos.x + *width / 2.0, GROUND_Y - *height);
                    effects.push(DecorationEffect::Ember(crater));
                }
                true
            }
            _ => true,
        }
    }

    pub fn is_retired(&self) -> bool {
        let width = match self.kind {
            DecorationKind::Mountain { width, .. } | DecorationKind::Volcano { width, .. } => width,
            DecorationKind::DustStorm { width, .. } => width,
            _ => 0.0,
        };
        self.pos.x + width < retire::BACKDROP_X
    }
}

/// Moves every decoration and drops the finished or off-screen ones.
pub fn update_decorations(decorations: &mut Vec<Decoration>, speed: f32, frames: f32) -> SmallVec<[DecorationEffect; 4]> {
    let mut effects = SmallVec::new();
    decorations.retain_mut(|decoration| decoration.advance(speed, frames, &mut effects) && !decoration.is_retired());
    effects
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Dust,
    Boost,
    Hit,
    Sparkle,
    Ember,
}

impl ParticleKind {
    fn gravity(self) -> f32 {
        match self {
            ParticleKind::Dust | ParticleKind::Ember => effects::DUST_GRAVITY,
            ParticleKind::Hit => effects::DUST_GRAVITY * 4.0,
            ParticleKind::Boost | ParticleKind::Sparkle => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Color,
    /// Remaining life in frames.
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    pub fn opacity(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

pub fn update_particles(particles: &mut Vec<Particle>, frames: f32) {
    particles.retain_mut(|p| {
        p.pos += p.vel * frames;
        p.vel.y += p.kind.gravity() * frames;
        p.life -= frames;
        p.life > 0.0
    });
}

/// A score popup rising from where it was earned.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingText {
    pub text: String,
    pub pos: Vec2,
    pub color: Color,
    pub life: f32,
}

impl FloatingText {
    pub fn new(text: impl Into<String>, pos: Vec2, color: Color) -> Self {
        Self {
            text: text.into(),
            pos,
            color,
            life: effects::TEXT_LIFE,
        }
    }

    pub fn opacity(&self) -> f32 {
        (self.life / effects::TEXT_LIFE).clamp(0.0, 1.0)
    }
}

pub fn update_texts(texts: &mut Vec<FloatingText>, frames: f32) {
    texts.retain_mut(|t| {
        t.pos.y -= effects::TEXT_RISE * frames;
        t.life -= frames;
        t.life > 0.0
    });
}

/// An expanding shockwave ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactRing {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub life: f32,
}

impl ImpactRing {
    pub fn new(pos: Vec2, color: Color) -> Self {
        Self {
            pos,
            radius: 4.0,
            color,
            life: effects::RING_LIFE,
        }
    }

    pub fn opacity(&self) -> f32 {
        (self.life / effects::RING_LIFE).clamp(0.0, 1.0)
    }
}

pub fn update_rings(rings: &mut Vec<ImpactRing>, frames: f32) {
    rings.retain_mut(|r| {
        r.radius += effects::RING_GROWTH * frames;
        r.life -= frames;
        r.life > 0.0
    });
}

/// A strip of ground texture that wraps around once it leaves the left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundTile {
    pub x: f32,
    /// Height of the tile's bump above the ground line.
    pub bump: f32,
    pub dark: bool,
}

/// Builds enough tiles to cover the viewport plus one spare.
pub fn ground_tiles(rng: &mut impl Rng) -> Vec<GroundTile> {
    let count = (CANVAS_SIZE.x / effects::GROUND_TILE_WIDTH) as usize + 2;
    (0..count)
        .map(|i| GroundTile {
            x: i as f32 * effects::GROUND_TILE_WIDTH,
            bump: rng.random_range(0.0..3.0),
            dark: rng.random_bool(0.5),
        })
        .collect()
}

pub fn update_ground(tiles: &mut [GroundTile], shift: f32) {
    let span = tiles.len() as f32 * effects::GROUND_TILE_WIDTH;
    for tile in tiles {
        tile.x -= shift;
        while tile.x < retire::GROUND_TILE_X {
            tile.x += span;
        }
    }
}

/// A background star; stars never scroll, only twinkle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub twinkle: f32,
}

pub fn starfield(rng: &mut impl Rng) -> Vec<Star> {
    (0..effects::STAR_COUNT)
        .map(|_| Star {
            pos: Vec2::new(rng.random_range(0.0..CANVAS_SIZE.x), rng.random_range(0.0..GROUND_Y - 150.0)),
            size: rng.random_range(0.5..2.0),
            twinkle: rng.random_range(0.0..std::f32::consts::TAU),
        })
        .collect()
}

/// Every transient pool a run owns.
#[derive(Debug, Clone, Default)]
pub struct Pools {
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    pub decorations: Vec<Decoration>,
    pub particles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
    pub rings: Vec<ImpactRing>,
    pub ground: Vec<GroundTile>,
    pub stars: Vec<Star>,
}

impl Pools {
    pub fn energy_alive(&self) -> usize {
        self.pickups.iter().filter(|p| p.kind == PickupKind::Energy).count()
    }
}
