//! Obstacle pacing: distance cooldowns between patterns, rest intervals, energy
//! cells and backdrop events.

use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::constants::{spawn, CANVAS_SIZE, GROUND_Y};
use crate::render::Color;
use crate::stage::{BackdropEvent, Difficulty, Stage};
use crate::systems::pattern::{pattern, ObstacleShape, Pattern, PatternId};
use crate::systems::pools::{Decoration, DecorationKind, Obstacle, Pickup, PickupKind, Pools};

/// Pixels of scroll before the first pattern of a run.
const OPENING_COOLDOWN: f32 = 150.0;

/// Base pixel gap between consecutive patterns of a stage, before difficulty scaling.
pub fn base_gap(stage_index: usize) -> f32 {
    (spawn::BASE_GAP - spawn::GAP_STEP_PER_STAGE * stage_index as f32).max(spawn::MIN_GAP)
}

/// Seconds of calm after a group of patterns.
pub fn rest_duration(stage_index: usize) -> f32 {
    (spawn::BASE_REST - spawn::REST_STEP_PER_STAGE * stage_index as f32).max(spawn::MIN_REST)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    /// Pixels of scroll left before the next pattern.
    pub cooldown: f32,
    /// Seconds of rest left; no patterns are placed while positive.
    pub rest: f32,
    /// Patterns left in the current group before a rest.
    pub until_rest: u32,
    /// Total patterns placed this run.
    pub delivered: u32,
}

impl Spawner {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            cooldown: OPENING_COOLDOWN,
            rest: 0.0,
            until_rest: rng.random_range(spawn::PATTERNS_PER_REST),
            delivered: 0,
        }
    }

    pub fn is_resting(&self) -> bool {
        self.rest > 0.0
    }

    /// Advances pacing by one tick in which the world scrolled `shift` pixels.
    ///
    /// # Returns
    /// The pattern placed this tick, if any.
    pub fn tick(
        &mut self,
        stage: &Stage,
        difficulty: Difficulty,
        shift: f32,
        dt: f32,
        pools: &mut Pools,
        rng: &mut impl Rng,
    ) -> Option<PatternId> {
        if self.is_resting() {
            self.rest = (self.rest - dt).max(0.0);
            return None;
        }

        self.cooldown -= shift;
        if self.cooldown > 0.0 {
            return None;
        }

        let id = *stage.patterns.choose(rng)?;
        let pattern = pattern(id);
        let gap_multiplier = difficulty.gap_multiplier();
        instantiate(pattern, spawn::ANCHOR_X, gap_multiplier, pools);

        self.delivered += 1;
        self.cooldown = (pattern.span() + base_gap(stage.index())) * gap_multiplier + rng.random_range(0.0..=spawn::GAP_JITTER);
        trace!(pattern = %id, cooldown = self.cooldown, "Pattern placed");

        self.until_rest = self.until_rest.saturating_sub(1);
        if self.until_rest == 0 {
            self.rest = rest_duration(stage.index());
            self.until_rest = rng.random_range(spawn::PATTERNS_PER_REST);
            debug!(rest = self.rest, delivered = self.delivered, "Spawner resting");
        }

        Some(id)
    }
}

/// Places every member of a pattern relative to `anchor_x`.
pub fn instantiate(pattern: &Pattern, anchor_x: f32, gap_multiplier: f32, pools: &mut Pools) {
    for spec in pattern.obstacles {
        let x = anchor_x + spec.dx * gap_multiplier;
        let obstacle = match spec.shape {
            ObstacleShape::Rock { size } => Obstacle::rock(x, size),
            ObstacleShape::Crater { width } => Obstacle::crater(x, width * 1.3),
            ObstacleShape::Floating { width, height } => Obstacle::floating(x, spec.dy, width, height),
            ObstacleShape::Laser => Obstacle::laser(x, spec.dy),
        };
        pools.obstacles.push(obstacle);
    }

    for spec in pattern.pickups {
        let pos = Vec2::new(anchor_x + spec.dx * gap_multiplier, GROUND_Y - spec.dy);
        pools.pickups.push(Pickup::new(PickupKind::Coin, pos));
    }
}

/// Occasionally drops an energy cell, keeping only a few alive at once.
pub fn maybe_spawn_energy(pools: &mut Pools, rng: &mut impl Rng, frames: f32) -> bool {
    if pools.energy_alive() >= spawn::MAX_ENERGY_ALIVE || rng.random::<f32>() >= spawn::ENERGY_CHANCE * frames {
        return false;
    }
    let pos = Vec2::new(spawn::ANCHOR_X - 10.0, GROUND_Y - 50.0 - rng.random_range(0.0..60.0));
    pools.pickups.push(Pickup::new(PickupKind::Energy, pos));
    true
}

const PLANET_COLORS: [Color; 4] = [Color::hex(0xcc6644), Color::hex(0x88aacc), Color::hex(0xddbb77), Color::hex(0x9977cc)];

/// Keeps the mountain range filled and rolls for the stage's background events.
pub fn spawn_backdrop(stage: &Stage, pools: &mut Pools, rng: &mut impl Rng, frames: f32) {
    refill_mountains(pools, rng);

    if rng.random::<f32>() >= spawn::BACKDROP_EVENT_CHANCE * frames {
        return;
    }

    let candidates: Vec<BackdropEvent> = stage
        .theme
        .events
        .iter()
        .copied()
        .filter(|e| !matches!(e, BackdropEvent::Stars | BackdropEvent::Earth))
        .collect();
    let Some(&event) = candidates.choose(rng) else {
        return;
    };

    if let Some(decoration) = backdrop_event(event, pools, rng) {
        trace!(?event, "Backdrop event");
        pools.decorations.push(decoration);
    }
}

fn backdrop_event(event: BackdropEvent, pools: &Pools, rng: &mut impl Rng) -> Option<Decoration> {
    let alive = |pred: fn(&DecorationKind) -> bool| pools.decorations.iter().any(|d| pred(&d.kind));
    let offscreen = CANVAS_SIZE.x + 60.0;

    let decoration = match event {
        BackdropEvent::Stars | BackdropEvent::Earth => return None,
        BackdropEvent::ShootingStar => Decoration {
            kind: DecorationKind::ShootingStar {
                length: rng.random_range(30.0..60.0),
                life: 30.0,
            },
            pos: Vec2::new(rng.random_range(50.0..CANVAS_SIZE.x), rng.random_range(20.0..200.0)),
        },
        BackdropEvent::Meteor => Decoration {
            kind: DecorationKind::Meteor {
                size: rng.random_range(3.0..6.0),
            },
            pos: Vec2::new(rng.random_range(150.0..CANVAS_SIZE.x + 50.0), -20.0),
        },
        BackdropEvent::Planets => {
            if alive(|k| matches!(k, DecorationKind::Planet { .. })) {
                return None;
            }
            Decoration {
                kind: DecorationKind::Planet {
                    size: rng.random_range(15.0..35.0),
                    color: *PLANET_COLORS.choose(rng)?,
                },
                pos: Vec2::new(offscreen, rng.random_range(60.0..200.0)),
            }
        }
        BackdropEvent::Volcano => Decoration {
            kind: DecorationKind::Volcano {
                width: 70.0,
                height: 45.0,
                ember_timer: 0.0,
            },
            pos: Vec2::new(offscreen, GROUND_Y),
        },
        BackdropEvent::Rocket => Decoration {
            kind: DecorationKind::Rocket,
            pos: Vec2::new(rng.random_range(100.0..CANVAS_SIZE.x - 50.0), GROUND_Y - 40.0),
        },
        BackdropEvent::Spaceship => Decoration {
            kind: DecorationKind::Spaceship,
            pos: Vec2::new(offscreen, rng.random_range(80.0..220.0)),
        },
        BackdropEvent::DustStorm => {
            if alive(|k| matches!(k, DecorationKind::DustStorm { .. })) {
                return None;
            }
            Decoration {
                kind: DecorationKind::DustStorm {
                    width: 200.0,
                    life: 400.0,
                },
                pos: Vec2::new(CANVAS_SIZE.x + 20.0, GROUND_Y - 60.0),
            }
        }
        BackdropEvent::Sun => {
            if alive(|k| matches!(k, DecorationKind::Sun { .. })) {
                return None;
            }
            Decoration {
                kind: DecorationKind::Sun { size: 30.0 },
                pos: Vec2::new(CANVAS_SIZE.x + 40.0, 90.0),
            }
        }
    };
    Some(decoration)
}

fn refill_mountains(pools: &mut Pools, rng: &mut impl Rng) {
    let mut edge = pools
        .decorations
        .iter()
        .filter_map(|d| match d.kind {
            DecorationKind::Mountain { width, .. } => Some(d.pos.x + width),
            _ => None,
        })
        .fold(f32::MIN, f32::max);
    if edge == f32::MIN {
        edge = -50.0;
    }

    while edge < CANVAS_SIZE.x + 50.0 {
        let width = rng.random_range(80.0..160.0);
        let height = rng.random_range(30.0..80.0);
        let x = edge - width * 0.3;
        pools.decorations.push(Decoration {
            kind: DecorationKind::Mountain { width, height },
            pos: Vec2::new(x, GROUND_Y),
        });
        edge = x + width;
    }
}
