use std::io;

use moon_runner::error::{GameError, GameResult, PersistenceError, PlatformError};
use moon_runner::events::{GameCommand, GameEvent};
use moon_runner::formatter::{increment_tick, tick_count, tick_label};

#[test]
fn test_persistence_error_converts() {
    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
    let persistence: PersistenceError = io_error.into();
    assert!(matches!(persistence, PersistenceError::Io(_)));

    let game_error: GameError = persistence.into();
    assert!(matches!(game_error, GameError::Persistence(_)));
}

#[test]
fn test_corrupt_payload_converts() {
    let json_error = serde_json::from_str::<u32>("nope").unwrap_err();
    let persistence: PersistenceError = json_error.into();
    assert!(persistence.to_string().starts_with("Corrupt save payload"));
}

#[test]
fn test_config_error_converts() {
    let figment_error = figment::Error::from("bad value".to_string());
    let game_error: GameError = figment_error.into();
    assert!(matches!(game_error, GameError::Config(_)));
}

#[test]
fn test_platform_error_display() {
    let error: GameError = PlatformError::Audio("no device".into()).into();
    assert_eq!(error.to_string(), "Platform error: Audio device error: no device");
}

#[test]
fn test_question_mark_propagates() {
    fn fails() -> GameResult<()> {
        Err(io::Error::other("disk"))?;
        Ok(())
    }
    assert!(matches!(fails(), Err(GameError::Io(_))));
}

#[test]
fn test_command_wraps_into_event() {
    let event: GameEvent = GameCommand::Choose(3).into();
    assert_eq!(event, GameEvent::Command(GameCommand::Choose(3)));
}

#[test]
fn test_tick_counter_advances() {
    let before = tick_count();
    increment_tick();
    assert!(tick_count() > before);
}

#[test]
fn test_tick_label_is_masked_hex() {
    assert_eq!(tick_label(0), "0x0000");
    assert_eq!(tick_label(0x2A), "0x002A");
    assert_eq!(tick_label(0xFFFF), "0xFFFF");
    assert_eq!(tick_label(0x1_0003), "0x0003");
}
