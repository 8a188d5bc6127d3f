use glam::Vec2;

use crate::constants::{player, scoring, CANVAS_SIZE};
use crate::systems::physics::Player;
use crate::systems::pools::{Obstacle, Pickup};

/// An axis-aligned box in screen space; `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap; boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.right() && self.right() > other.x && self.y < other.bottom() && self.bottom() > other.y
    }
}

/// The player's collision box, centered on `x` and extending slightly below the anchor.
pub fn player_box(p: &Player) -> Aabb {
    Aabb::new(
        p.x - player::HITBOX_WIDTH / 2.0,
        p.y + player::HITBOX_DROP - player::HITBOX_HEIGHT,
        player::HITBOX_WIDTH,
        player::HITBOX_HEIGHT,
    )
}

/// The obstacle's collision box. Armed lasers span the whole viewport width.
pub fn obstacle_box(o: &Obstacle) -> Aabb {
    if o.is_laser() {
        return Aabb::new(0.0, o.top(), CANVAS_SIZE.x, o.height);
    }
    Aabb::new(o.x - o.width / 2.0, o.top(), o.width, o.height)
}

pub fn collides(p: &Player, o: &Obstacle) -> bool {
    o.is_armed() && player_box(p).overlaps(&obstacle_box(o))
}

/// Vertical distance between the player's feet and the obstacle's top edge.
///
/// Negative when the player is lower than the top.
pub fn clearance(p: &Player, o: &Obstacle) -> f32 {
    o.top() - player_box(p).bottom()
}

/// The point pickups are collected around.
pub fn collect_center(p: &Player) -> Vec2 {
    Vec2::new(p.x, p.y - scoring::COLLECT_CENTER_LIFT)
}

pub fn collects(p: &Player, pickup: &Pickup) -> bool {
    collect_center(p).distance(pickup.pos) < scoring::COLLECT_RADIUS
}
