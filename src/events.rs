//! Input events consumed by the game core.
//!
//! Host adapters (keyboard, pointer, touch) translate their native events into
//! these before handing them to [`crate::game::Game::handle_event`].

/// Discrete menu and session commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Confirm,
    Back,
    Left,
    Right,
    /// A direct numeric choice, one-based as printed on the key.
    Choose(u8),
    ToggleMute,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Command(GameCommand),
    /// The jump input went down. `at_ms` is a monotonic timestamp in milliseconds.
    Press { at_ms: f64 },
    /// The jump input came back up.
    Release { at_ms: f64 },
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}
