//! Centralized error types for Moon Runner.
//!
//! The simulation itself never fails. These types cover the peripherals around it
//! (configuration, the save file, the desktop host), most of which are recovered
//! locally and only logged.

use std::io;

/// Main error type for the game.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl From<figment::Error> for GameError {
    fn from(error: figment::Error) -> Self {
        GameError::Config(Box::new(error))
    }
}

/// Errors raised while reading or writing the save record.
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt save payload: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Save record has {found} best scores, expected {expected}")]
    ShapeMismatch { expected: usize, found: usize },
}

/// Errors from the desktop host.
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Audio device error: {0}")]
    Audio(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
