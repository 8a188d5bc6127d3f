//! The per-tick simulation.
//!
//! Each submodule owns one concern of a run (physics, spawning, collision,
//! scoring, pools) and [`session::Session`] drives them in a fixed order.

pub mod collision;
pub mod effects;
pub mod pattern;
pub mod physics;
pub mod pools;
pub mod scoring;
pub mod session;
pub mod spawner;
pub mod state;

pub use collision::Aabb;
pub use physics::{JumpKind, PhysicsEvent, Player};
pub use pools::{Obstacle, ObstacleKind, Pickup, PickupKind, Pools};
pub use scoring::{Combo, Milestones, NearMiss};
pub use session::{RunOutcome, RunState, Session};
pub use spawner::Spawner;
pub use state::{ScreenMachine, ScreenState, Transition};
