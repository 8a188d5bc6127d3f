//! Player motion: press/release jump resolution, mid-air boosts and gravity.
//!
//! Velocities are in pixels per nominal frame. Vertical motion is integrated
//! exactly for constant gravity, so one tick of `n` frames lands in the same
//! place as `n` ticks of one frame.

use glam::Vec2;
use tracing::trace;

use crate::constants::{player, GROUND_Y};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Short,
    Long,
}

impl JumpKind {
    /// Resolves a grounded hold into a jump. The boundary duration counts as long.
    pub fn from_hold(held_ms: f64) -> Self {
        if held_ms < player::LONG_PRESS_MS {
            JumpKind::Short
        } else {
            JumpKind::Long
        }
    }

    pub fn impulse(self) -> f32 {
        match self {
            JumpKind::Short => player::SHORT_JUMP,
            JumpKind::Long => player::LONG_JUMP,
        }
    }
}

/// Things the physics step reports back so the session can react with audio and particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsEvent {
    Jumped(JumpKind),
    Boosted,
    Landed,
    Recharged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    /// Feet position; the ground line when standing.
    pub y: f32,
    pub vy: f32,
    pub airborne: bool,
    pub lives: u8,
    /// Remaining immunity in seconds.
    pub invincible: f32,
    pub booster: u8,
    pub max_booster: u8,
    /// Seconds spent towards the next booster unit.
    pub booster_timer: f32,
    /// Cosmetic squash-and-stretch scale, relaxing towards one.
    pub squash: Vec2,
    /// Set by a boost; the session consumes it to emit a trail.
    pub boost_trail: bool,
    /// Timestamp of an unresolved grounded press.
    pub pending_press: Option<f64>,
    /// Cosmetic wheel/leg animation clock, in frames.
    pub stride: f32,
}

impl Player {
    pub fn new(max_booster: u8) -> Self {
        Self {
            x: player::X,
            y: GROUND_Y,
            vy: 0.0,
            airborne: false,
            lives: player::LIVES,
            invincible: 0.0,
            booster: max_booster,
            max_booster,
            booster_timer: 0.0,
            squash: Vec2::ONE,
            boost_trail: false,
            pending_press: None,
            stride: 0.0,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible > 0.0
    }

    /// Whether the sprite is drawn this frame; it blinks while invincible.
    pub fn is_visible(&self) -> bool {
        !self.is_invincible() || (self.invincible / player::BLINK_INTERVAL) as u32 % 2 == 0
    }

    /// Handles the input going down at `at_ms`.
    ///
    /// On the ground this only starts a hold. In the air it spends a booster charge, if any.
    pub fn press(&mut self, at_ms: f64) -> Option<PhysicsEvent> {
        if !self.airborne {
            if self.pending_press.is_none() {
                self.pending_press = Some(at_ms);
            }
            return None;
        }

        if self.booster == 0 {
            trace!("Boost requested with an empty booster");
            return None;
        }

        self.booster -= 1;
        self.booster_timer = 0.0;
        self.vy = player::BOOST_JUMP;
        self.boost_trail = true;
        self.squash = Vec2::new(0.85, 1.15);
        Some(PhysicsEvent::Boosted)
    }

    /// Handles the input going up at `at_ms`, resolving a pending grounded press into a jump.
    pub fn release(&mut self, at_ms: f64) -> Option<PhysicsEvent> {
        let pressed_at = self.pending_press.take()?;
        if self.airborne {
            return None;
        }

        let kind = JumpKind::from_hold(at_ms - pressed_at);
        self.vy = kind.impulse();
        self.airborne = true;
        self.squash = Vec2::new(0.8, 1.2);
        Some(PhysicsEvent::Jumped(kind))
    }

    /// Applies gravity over `frames` nominal frames and resolves landing.
    pub fn integrate(&mut self, frames: f32) -> Option<PhysicsEvent> {
        self.stride += frames;
        self.relax_squash(frames);

        if !self.airborne {
            return None;
        }

        self.y += self.vy * frames + 0.5 * player::GRAVITY * frames * frames;
        self.vy += player::GRAVITY * frames;

        if self.y >= GROUND_Y {
            self.y = GROUND_Y;
            self.vy = 0.0;
            self.airborne = false;
            self.squash = Vec2::new(1.3, 0.7);
            return Some(PhysicsEvent::Landed);
        }
        None
    }

    /// Counts down invincibility and regenerates booster charges while grounded.
    pub fn tick_timers(&mut self, dt: f32) -> Option<PhysicsEvent> {
        self.invincible = (self.invincible - dt).max(0.0);

        if self.airborne || self.booster >= self.max_booster {
            return None;
        }

        self.booster_timer += dt;
        if self.booster_timer >= player::BOOSTER_RECHARGE {
            self.booster_timer = 0.0;
            self.booster += 1;
            return Some(PhysicsEvent::Recharged);
        }
        None
    }

    fn relax_squash(&mut self, frames: f32) {
        let keep = 0.85_f32.powf(frames);
        self.squash = Vec2::ONE + (self.squash - Vec2::ONE) * keep;
    }
}
