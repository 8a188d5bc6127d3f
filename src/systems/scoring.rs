//! Near-miss judgement, combo chains and distance milestones.

use smallvec::SmallVec;

use crate::constants::scoring;
use crate::systems::collision::clearance;
use crate::systems::physics::Player;
use crate::systems::pools::Obstacle;

/// A consecutive chain of perfect clears. Decays after a quiet window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Combo {
    pub count: u32,
    /// Seconds left before the chain resets.
    pub timer: f32,
}

impl Combo {
    /// Extends the chain and refreshes its window.
    pub fn extend(&mut self) -> u32 {
        self.count += 1;
        self.timer = scoring::COMBO_WINDOW;
        self.count
    }

    /// Refreshes the window of a running chain without lengthening it.
    pub fn refresh(&mut self) {
        if self.count > 0 {
            self.timer = scoring::COMBO_WINDOW;
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.timer = 0.0;
    }

    /// Counts the window down. Returns `true` on the tick the chain decays.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.count == 0 {
            return false;
        }
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.reset();
            return true;
        }
        false
    }
}

/// A scored clearance of an obstacle the player never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NearMiss {
    /// Cleared with clearance above the perfect threshold; carries the points and the new chain length.
    Perfect { points: u32, combo: u32 },
    Close { points: u32 },
}

impl NearMiss {
    pub fn points(&self) -> u32 {
        match *self {
            NearMiss::Perfect { points, .. } | NearMiss::Close { points } => points,
        }
    }
}

/// Points for a perfect clear made while the chain already holds `combo` entries.
pub fn perfect_points(combo: u32) -> u32 {
    scoring::PERFECT_BASE
        .saturating_add(combo.saturating_mul(scoring::PERFECT_PER_COMBO))
        .min(scoring::PERFECT_CAP)
}

/// Judges an obstacle as it passes the trailing edge. A perfect clear extends the combo, a close one
/// refreshes its window.
///
/// Only airborne passes count. Lasers and obstacles passed with little or negative clearance earn nothing.
pub fn judge_near_miss(player: &Player, obstacle: &Obstacle, combo: &mut Combo) -> Option<NearMiss> {
    if obstacle.is_laser() || !player.airborne {
        return None;
    }

    let clearance = clearance(player, obstacle);
    if clearance > scoring::PERFECT_CLEARANCE {
        let points = perfect_points(combo.count);
        let combo = combo.extend();
        Some(NearMiss::Perfect { points, combo })
    } else if clearance > scoring::CLOSE_CLEARANCE {
        combo.refresh();
        Some(NearMiss::Close {
            points: scoring::CLOSE_BONUS,
        })
    } else {
        None
    }
}

/// Tracks which distance thresholds have been crossed this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Milestones {
    /// Index of the next threshold in [`scoring::MILESTONES`].
    next: usize,
}

impl Milestones {
    pub fn reached(&self) -> usize {
        self.next
    }

    /// Returns each threshold crossed since the last call, at most once per run.
    pub fn cross(&mut self, distance: f32) -> SmallVec<[f32; 2]> {
        let mut crossed = SmallVec::new();
        while let Some(&threshold) = scoring::MILESTONES.get(self.next) {
            if distance < threshold {
                break;
            }
            crossed.push(threshold);
            self.next += 1;
        }
        crossed
    }
}
