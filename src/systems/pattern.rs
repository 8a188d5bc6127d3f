//! The library of spawnable obstacle and pickup arrangements.
//!
//! Offsets are relative to the spawn anchor: `dx` grows to the right, `dy` is
//! height above the ground line. Horizontal offsets are scaled by the
//! difficulty's gap multiplier when instantiated.

use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum PatternId {
    SingleRock,
    RockPair,
    Crater,
    CoinArc,
    FloatingGate,
    RockThenFloat,
    CraterRock,
    LaserHigh,
    TripleRock,
    LaserGauntlet,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleShape {
    /// A ground rock; footprint scales with `size`.
    Rock { size: f32 },
    /// A shallow dip in the ground.
    Crater { width: f32 },
    /// A hazard hovering above the ground.
    Floating { width: f32, height: f32 },
    /// A horizontal beam spanning the viewport once armed.
    Laser,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSpec {
    pub shape: ObstacleShape,
    pub dx: f32,
    pub dy: f32,
}

/// A coin placement; `dy` is the height of the coin's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupSpec {
    pub dx: f32,
    pub dy: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    pub id: PatternId,
    pub obstacles: &'static [ObstacleSpec],
    pub pickups: &'static [PickupSpec],
}

impl Pattern {
    /// Horizontal extent of the arrangement, before gap scaling.
    pub fn span(&self) -> f32 {
        let obstacles = self.obstacles.iter().map(|o| o.dx + o.shape.width());
        let pickups = self.pickups.iter().map(|p| p.dx);
        obstacles.chain(pickups).fold(0.0, f32::max)
    }
}

impl ObstacleShape {
    /// Unscaled footprint width. Lasers contribute nothing to a pattern's span.
    pub fn width(&self) -> f32 {
        match *self {
            ObstacleShape::Rock { size } => 20.0 * size * 1.3,
            ObstacleShape::Crater { width } => width,
            ObstacleShape::Floating { width, .. } => width,
            ObstacleShape::Laser => 0.0,
        }
    }
}

const fn rock(dx: f32, size: f32) -> ObstacleSpec {
    ObstacleSpec {
        shape: ObstacleShape::Rock { size },
        dx,
        dy: 0.0,
    }
}

const fn crater(dx: f32, width: f32) -> ObstacleSpec {
    ObstacleSpec {
        shape: ObstacleShape::Crater { width },
        dx,
        dy: -2.0,
    }
}

const fn floating(dx: f32) -> ObstacleSpec {
    ObstacleSpec {
        shape: ObstacleShape::Floating { width: 30.0, height: 20.0 },
        dx,
        dy: 48.0,
    }
}

/// Lasers at this height can be passed under with a short jump but not a long one.
const fn laser(dx: f32) -> ObstacleSpec {
    ObstacleSpec {
        shape: ObstacleShape::Laser,
        dx,
        dy: 100.0,
    }
}

const fn coin(dx: f32, dy: f32) -> PickupSpec {
    PickupSpec { dx, dy }
}

pub static PATTERNS: [Pattern; 10] = [
    Pattern {
        id: PatternId::SingleRock,
        obstacles: &[rock(0.0, 1.0)],
        pickups: &[coin(0.0, 70.0)],
    },
    Pattern {
        id: PatternId::RockPair,
        obstacles: &[rock(0.0, 1.0), rock(220.0, 1.2)],
        pickups: &[coin(110.0, 40.0)],
    },
    Pattern {
        id: PatternId::Crater,
        obstacles: &[crater(0.0, 55.0)],
        pickups: &[coin(15.0, 70.0)],
    },
    Pattern {
        id: PatternId::CoinArc,
        obstacles: &[],
        pickups: &[coin(0.0, 20.0), coin(30.0, 50.0), coin(60.0, 70.0), coin(90.0, 50.0), coin(120.0, 20.0)],
    },
    Pattern {
        id: PatternId::FloatingGate,
        obstacles: &[floating(0.0)],
        pickups: &[coin(-20.0, 15.0), coin(20.0, 15.0)],
    },
    Pattern {
        id: PatternId::RockThenFloat,
        obstacles: &[rock(0.0, 1.1), floating(240.0)],
        pickups: &[coin(120.0, 60.0)],
    },
    Pattern {
        id: PatternId::CraterRock,
        obstacles: &[crater(0.0, 45.0), rock(190.0, 1.0)],
        pickups: &[],
    },
    Pattern {
        id: PatternId::LaserHigh,
        obstacles: &[laser(0.0), rock(120.0, 0.9)],
        pickups: &[coin(240.0, 15.0)],
    },
    Pattern {
        id: PatternId::TripleRock,
        obstacles: &[rock(0.0, 0.9), rock(160.0, 1.0), rock(320.0, 1.1)],
        pickups: &[coin(80.0, 50.0), coin(240.0, 50.0)],
    },
    Pattern {
        id: PatternId::LaserGauntlet,
        obstacles: &[laser(0.0), rock(100.0, 0.9), rock(260.0, 0.9), rock(420.0, 0.9)],
        pickups: &[],
    },
];

pub fn pattern(id: PatternId) -> &'static Pattern {
    // PATTERNS is declared in PatternId order
    &PATTERNS[id as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_catalogue_matches_ids() {
        for id in PatternId::iter() {
            assert_eq!(pattern(id).id, id);
        }
    }

    #[test]
    fn test_span_covers_last_rock() {
        let span = pattern(PatternId::RockPair).span();
        assert!((span - (220.0 + 20.0 * 1.2 * 1.3)).abs() < 1e-4);
    }
}
