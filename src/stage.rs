//! Static course data: stages, difficulty tiers, the character roster and moon facts.

use strum_macros::{Display, EnumCount, EnumIter};

use crate::render::Color;
use crate::systems::pattern::PatternId;

pub const STAGE_COUNT: usize = 5;

/// Decorative background happenings a stage may feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum BackdropEvent {
    Stars,
    Earth,
    DustStorm,
    ShootingStar,
    Meteor,
    Planets,
    Volcano,
    Rocket,
    Spaceship,
    Sun,
}

/// Cosmetic palette and scenery of a stage.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub sky: Color,
    pub ground: Color,
    pub ground_accent: Color,
    pub events: &'static [BackdropEvent],
}

/// One tier of the course. Immutable during a run.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub id: u8,
    pub name: &'static str,
    pub description: &'static str,
    /// Base scroll speed before difficulty and distance scaling.
    pub speed: f32,
    /// Distance at which the stage is cleared.
    pub target_distance: f32,
    /// Patterns the spawner may draw from.
    pub patterns: &'static [PatternId],
    pub theme: Theme,
}

impl Stage {
    /// Zero-based position of the stage in [`STAGES`].
    pub fn index(&self) -> usize {
        usize::from(self.id) - 1
    }

    pub fn has_event(&self, event: BackdropEvent) -> bool {
        self.theme.events.contains(&event)
    }
}

use PatternId::*;

pub static STAGES: [Stage; STAGE_COUNT] = [
    Stage {
        id: 1,
        name: "Mare Tranquillitatis",
        description: "The Apollo 11 landing site. Mostly flat ground.",
        speed: 2.5,
        target_distance: 600.0,
        patterns: &[SingleRock, CoinArc, Crater, RockPair],
        theme: Theme {
            sky: Color::hex(0x1a1a2e),
            ground: Color::hex(0x4a4a5a),
            ground_accent: Color::hex(0x3a3a4a),
            events: &[BackdropEvent::Stars, BackdropEvent::Earth],
        },
    },
    Stage {
        id: 2,
        name: "Oceanus Procellarum",
        description: "The largest mare on the moon. Dust storms roll through.",
        speed: 2.9,
        target_distance: 900.0,
        patterns: &[SingleRock, CoinArc, Crater, RockPair, FloatingGate, RockThenFloat],
        theme: Theme {
            sky: Color::hex(0x151528),
            ground: Color::hex(0x555568),
            ground_accent: Color::hex(0x454558),
            events: &[BackdropEvent::Stars, BackdropEvent::DustStorm, BackdropEvent::ShootingStar],
        },
    },
    Stage {
        id: 3,
        name: "Mare Imbrium",
        description: "A field of giant craters. Watch for falling meteors!",
        speed: 3.3,
        target_distance: 1200.0,
        patterns: &[SingleRock, Crater, RockPair, FloatingGate, RockThenFloat, CraterRock, LaserHigh],
        theme: Theme {
            sky: Color::hex(0x121225),
            ground: Color::hex(0x606075),
            ground_accent: Color::hex(0x505065),
            events: &[BackdropEvent::Stars, BackdropEvent::Meteor, BackdropEvent::Planets],
        },
    },
    Stage {
        id: 4,
        name: "Tycho Crater",
        description: "Rugged crater country with traces of volcanic activity.",
        speed: 3.7,
        target_distance: 1500.0,
        patterns: &[RockPair, FloatingGate, RockThenFloat, CraterRock, LaserHigh, TripleRock],
        theme: Theme {
            sky: Color::hex(0x0e0e20),
            ground: Color::hex(0x6a6a80),
            ground_accent: Color::hex(0x5a5a70),
            events: &[
                BackdropEvent::Stars,
                BackdropEvent::Volcano,
                BackdropEvent::ShootingStar,
                BackdropEvent::Rocket,
            ],
        },
    },
    Stage {
        id: 5,
        name: "Mare Frigoris",
        description: "The polar sea. Survive the harshest terrain of all!",
        speed: 4.1,
        target_distance: 1800.0,
        patterns: &[RockThenFloat, CraterRock, LaserHigh, TripleRock, LaserGauntlet],
        theme: Theme {
            sky: Color::hex(0x0a0a1a),
            ground: Color::hex(0x7a7a90),
            ground_accent: Color::hex(0x6a6a80),
            events: &[
                BackdropEvent::Stars,
                BackdropEvent::Meteor,
                BackdropEvent::Volcano,
                BackdropEvent::Spaceship,
                BackdropEvent::Sun,
            ],
        },
    },
];

/// Looks up a stage by its zero-based index.
pub fn stage(index: usize) -> Option<&'static Stage> {
    STAGES.get(index)
}

/// Difficulty tiers, selected once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumCount)]
pub enum Difficulty {
    #[strum(to_string = "EASY")]
    Easy,
    #[default]
    #[strum(to_string = "NORMAL")]
    Normal,
    #[strum(to_string = "HARD")]
    Hard,
    #[strum(to_string = "HELL")]
    Hell,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard, Difficulty::Hell];

    pub fn speed_multiplier(self) -> f32 {
        match self {
            Difficulty::Easy => 0.85,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.15,
            Difficulty::Hell => 1.3,
        }
    }

    pub fn gap_multiplier(self) -> f32 {
        match self {
            Difficulty::Easy => 1.3,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.85,
            Difficulty::Hell => 0.7,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Out-of-range indices (e.g. from an old save) fall back to the default tier.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterKind {
    Rover,
    Astronaut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    pub id: &'static str,
    pub name: &'static str,
    /// Lifetime distance required before the character can be picked.
    pub unlock_distance: u64,
    pub kind: CharacterKind,
}

pub static CHARACTERS: [Character; 6] = [
    Character { id: "rover", name: "Luna Rover", unlock_distance: 0, kind: CharacterKind::Rover },
    Character { id: "astro", name: "Astronaut", unlock_distance: 0, kind: CharacterKind::Astronaut },
    Character { id: "rover2", name: "Heavy Rover", unlock_distance: 3_000, kind: CharacterKind::Rover },
    Character { id: "astro2", name: "Commander", unlock_distance: 5_000, kind: CharacterKind::Astronaut },
    Character { id: "rover3", name: "Speed Rover", unlock_distance: 10_000, kind: CharacterKind::Rover },
    Character { id: "astro3", name: "Explorer", unlock_distance: 15_000, kind: CharacterKind::Astronaut },
];

pub fn character(id: &str) -> Option<&'static Character> {
    CHARACTERS.iter().find(|c| c.id == id)
}

/// Characters available at the given lifetime distance, in roster order.
pub fn unlocked_characters(lifetime_distance: u64) -> impl Iterator<Item = &'static Character> {
    CHARACTERS.iter().filter(move |c| lifetime_distance >= c.unlock_distance)
}

/// Shown on the game-over card.
pub static MOON_FACTS: [(&str, &str); 8] = [
    ("LUNAR GRAVITY", "Gravity on the moon is about one sixth of Earth's."),
    ("DISTANCE", "The moon is on average 384,400 km from Earth."),
    ("TEMPERATURE", "The surface swings from 127 C by day to -173 C at night."),
    ("ORBIT", "The moon circles Earth once every 29.5 days."),
    ("SIZE", "At 3,474 km across, the moon is about a quarter of Earth's width."),
    ("ATMOSPHERE", "There is almost no air, so the sky is always black."),
    ("APOLLO 11", "Apollo 11 landed on the moon on 20 July 1969."),
    ("ICE", "Craters near the poles hold water ice."),
];
