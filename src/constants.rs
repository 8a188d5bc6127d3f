//! This module contains all the tuning constants used in the game.

use std::time::Duration;

use glam::Vec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The duration of one nominal frame, in seconds. Per-frame motion rates are scaled by `dt / NOMINAL_FRAME`.
pub const NOMINAL_FRAME: f32 = 1.0 / 60.0;
/// Upper bound for a single tick's delta time, in seconds.
pub const MAX_DELTA: f32 = 0.05;

/// The size of the logical canvas, in pixels.
pub const CANVAS_SIZE: Vec2 = Vec2::new(400.0, 700.0);
/// The vertical position of the ground line.
pub const GROUND_Y: f32 = 560.0;

pub mod player {
    /// The fixed horizontal position of the runner.
    pub const X: f32 = 80.0;
    pub const LIVES: u8 = 3;
    pub const MAX_BOOSTER: u8 = 3;
    /// Seconds spent grounded before one booster unit is regained.
    pub const BOOSTER_RECHARGE: f32 = 3.0;
    /// Seconds of immunity after taking a hit.
    pub const INVINCIBILITY: f32 = 2.0;
    pub const BLINK_INTERVAL: f32 = 0.1;

    /// Downward acceleration, in pixels per frame squared.
    pub const GRAVITY: f32 = 0.35;
    pub const SHORT_JUMP: f32 = -6.5;
    pub const LONG_JUMP: f32 = -9.0;
    pub const BOOST_JUMP: f32 = -5.5;
    /// Holding the input at least this long (milliseconds) turns a short jump into a long one.
    pub const LONG_PRESS_MS: f64 = 150.0;

    pub const HITBOX_WIDTH: f32 = 26.0;
    pub const HITBOX_HEIGHT: f32 = 36.0;
    /// How far the hitbox extends below the player's anchor.
    pub const HITBOX_DROP: f32 = 4.0;
}

pub mod scroll {
    /// Scroll speed grows by this fraction per unit of distance travelled.
    pub const DISTANCE_RAMP: f32 = 0.000_03;
    /// World entities move this many pixels per unit of scroll speed.
    pub const WORLD_FACTOR: f32 = 2.0;
    /// Distance gained per unit of scroll speed.
    pub const DISTANCE_FACTOR: f32 = 0.5;
    pub const PARALLAX: [f32; 4] = [0.1, 0.3, 0.6, 1.0];
}

pub mod spawn {
    use super::CANVAS_SIZE;

    /// The x position pattern anchors are placed at.
    pub const ANCHOR_X: f32 = CANVAS_SIZE.x + 30.0;
    pub const BASE_GAP: f32 = 200.0;
    pub const GAP_STEP_PER_STAGE: f32 = 15.0;
    pub const MIN_GAP: f32 = 110.0;
    pub const GAP_JITTER: f32 = 40.0;
    /// Patterns delivered between rests are drawn uniformly from this range.
    pub const PATTERNS_PER_REST: std::ops::RangeInclusive<u32> = 3..=4;
    pub const BASE_REST: f32 = 2.2;
    pub const REST_STEP_PER_STAGE: f32 = 0.35;
    pub const MIN_REST: f32 = 0.6;
    /// Per-frame chance of an energy cell appearing.
    pub const ENERGY_CHANCE: f32 = 0.004;
    pub const MAX_ENERGY_ALIVE: usize = 2;
    pub const LASER_WARNING: f32 = 1.0;
    pub const LASER_THICKNESS: f32 = 8.0;
    /// Per-frame chance of a background event.
    pub const BACKDROP_EVENT_CHANCE: f32 = 0.002;
}

pub mod retire {
    pub const OBSTACLE_X: f32 = -80.0;
    pub const PICKUP_X: f32 = -40.0;
    pub const BACKDROP_X: f32 = -100.0;
    pub const GROUND_TILE_X: f32 = -25.0;
    /// Obstacles are judged for near-misses once their center passes this line.
    pub const TRAILING_EDGE_X: f32 = 0.0;
}

pub mod scoring {
    pub const PERFECT_CLEARANCE: f32 = 30.0;
    pub const CLOSE_CLEARANCE: f32 = 8.0;
    pub const PERFECT_BASE: u32 = 50;
    pub const PERFECT_PER_COMBO: u32 = 25;
    pub const PERFECT_CAP: u32 = 300;
    pub const CLOSE_BONUS: u32 = 20;
    pub const COMBO_WINDOW: f32 = 3.0;
    pub const COIN_POINTS: u32 = 10;
    pub const MILESTONE_POINTS: u32 = 100;
    pub const MILESTONES: [f32; 6] = [100.0, 250.0, 500.0, 1000.0, 1500.0, 2000.0];
    pub const COLLECT_RADIUS: f32 = 25.0;
    /// The collection center sits this far above the player's anchor.
    pub const COLLECT_CENTER_LIFT: f32 = 12.0;
}

pub mod effects {
    pub const SHAKE_ON_HIT: f32 = 10.0;
    pub const SHAKE_DECAY: f32 = 0.85;
    pub const SHAKE_FLOOR: f32 = 0.5;
    pub const DUST_GRAVITY: f32 = 0.015;
    pub const TEXT_RISE: f32 = 0.6;
    pub const TEXT_LIFE: f32 = 60.0;
    pub const RING_GROWTH: f32 = 2.0;
    pub const RING_LIFE: f32 = 20.0;
    pub const STAR_COUNT: usize = 100;
    pub const GROUND_TILE_WIDTH: f32 = 20.0;
}

pub mod transition {
    pub const TITLE: f32 = 0.35;
    pub const MENU: f32 = 0.3;
    pub const PLAYING: f32 = 0.4;
    pub const RESULT: f32 = 0.5;
    /// Fraction of the out phase during which result screens flash.
    pub const FLASH_FRACTION: f32 = 0.3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        // 60 FPS = 16.67ms per frame
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_nominal_frame_matches_loop_time() {
        assert!((NOMINAL_FRAME * 60.0 - 1.0).abs() < 1e-6);
        assert!((LOOP_TIME.as_secs_f32() - NOMINAL_FRAME).abs() < 1e-6);
        assert!(MAX_DELTA > NOMINAL_FRAME);
    }

    #[test]
    fn test_jump_impulses_are_ordered() {
        assert!(player::LONG_JUMP < player::SHORT_JUMP);
        assert!(player::SHORT_JUMP < player::BOOST_JUMP);
        assert!(player::BOOST_JUMP < 0.0);
    }

    #[test]
    fn test_milestones_ascend() {
        assert!(scoring::MILESTONES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_retirement_lines_are_offscreen() {
        assert!(retire::OBSTACLE_X < retire::TRAILING_EDGE_X);
        assert!(retire::PICKUP_X < 0.0);
        assert!(spawn::ANCHOR_X > CANVAS_SIZE.x);
    }

    #[test]
    fn test_clearance_thresholds() {
        assert!(scoring::CLOSE_CLEARANCE < scoring::PERFECT_CLEARANCE);
    }
}
