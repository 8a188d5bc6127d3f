//! Moon Runner game library crate.

#[cfg(feature = "sdl")]
pub mod app;
pub mod audio;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod platform;
pub mod render;
pub mod save;
pub mod stage;
pub mod synth;
pub mod systems;
