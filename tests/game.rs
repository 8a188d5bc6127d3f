mod common;

use common::{command, game, game_with_save, playing, settle, to_stage_select};
use moon_runner::audio::{AudioEvent, RecordingAudio, Track};
use moon_runner::constants::{player, MAX_DELTA, NOMINAL_FRAME};
use moon_runner::events::{GameCommand, GameEvent};
use moon_runner::stage::Difficulty;
use moon_runner::systems::pools::Obstacle;
use moon_runner::systems::session::RunOutcome;
use moon_runner::systems::state::ScreenState;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

/// Puts the active run one tick away from clearing.
fn almost_cleared(game: &mut moon_runner::game::Game) {
    let session = game.session_mut().expect("active run");
    session.run.distance = session.stage.target_distance - 0.01;
}

/// Puts the active run one tick away from its last life.
fn almost_dead(game: &mut moon_runner::game::Game) {
    let session = game.session_mut().expect("active run");
    session.player.lives = 1;
    session.player.invincible = 0.0;
    session.pools.obstacles.clear();
    session.pools.obstacles.push(Obstacle::rock(player::X, 1.0));
}

#[test]
fn test_starts_on_title_with_title_track() {
    let mut game = game();
    assert_eq!(game.screen(), ScreenState::Title);
    assert_eq!(game.pending_audio(), &[AudioEvent::Track(Track::Title)]);

    let mut sink = RecordingAudio::default();
    game.flush_audio(&mut sink);
    assert_eq!(sink.tracks, vec![Track::Title]);
    assert!(game.pending_audio().is_empty());
}

#[test]
fn test_menu_flow_reaches_stage_select() {
    let mut game = game();
    to_stage_select(&mut game);
    assert!(game.session().is_none());
}

#[test]
fn test_commands_ignored_during_transition() {
    let mut game = game();
    game.handle_event(GameCommand::Confirm.into());
    assert!(game.transition().in_flight());

    // Swallowed: the first fade is still running
    game.handle_event(GameCommand::Confirm.into());
    settle(&mut game);
    assert_eq!(game.screen(), ScreenState::DifficultySelect);
}

#[test]
fn test_press_outside_run_confirms() {
    let mut game = game();
    game.handle_event(GameEvent::Press { at_ms: 0.0 });
    settle(&mut game);
    assert_eq!(game.screen(), ScreenState::DifficultySelect);

    game.handle_event(GameEvent::Release { at_ms: 10.0 });
    assert!(!game.transition().in_flight());
}

#[test]
fn test_back_walks_menus_backwards() {
    let mut game = game();
    to_stage_select(&mut game);
    command(&mut game, GameCommand::Back);
    assert_eq!(game.screen(), ScreenState::CharSelect);
    command(&mut game, GameCommand::Back);
    assert_eq!(game.screen(), ScreenState::DifficultySelect);
    command(&mut game, GameCommand::Back);
    assert_eq!(game.screen(), ScreenState::Title);
}

#[test]
fn test_difficulty_choice_is_persisted() {
    let mut game = game();
    command(&mut game, GameCommand::Confirm);
    command(&mut game, GameCommand::Right);
    assert_eq!(game.menu().difficulty, Difficulty::Hard);
    command(&mut game, GameCommand::Left);
    command(&mut game, GameCommand::Left);
    command(&mut game, GameCommand::Left);
    assert_eq!(game.menu().difficulty, Difficulty::Hell);
    command(&mut game, GameCommand::Choose(1));
    assert_eq!(game.menu().difficulty, Difficulty::Easy);

    command(&mut game, GameCommand::Confirm);
    assert_eq!(game.screen(), ScreenState::CharSelect);
    assert_eq!(game.save().difficulty(), Difficulty::Easy);
}

#[test]
fn test_saved_difficulty_seeds_menu() {
    let game = game_with_save(r#"{"last_difficulty":3}"#);
    assert_eq!(game.menu().difficulty, Difficulty::Hell);
}

#[test]
fn test_character_cycles_unlocked_only() {
    let mut game = game();
    command(&mut game, GameCommand::Confirm);
    command(&mut game, GameCommand::Confirm);
    assert_eq!(game.screen(), ScreenState::CharSelect);

    command(&mut game, GameCommand::Right);
    assert_eq!(game.menu().character, 1);
    // Only two characters are free on a fresh save
    command(&mut game, GameCommand::Right);
    assert_eq!(game.menu().character, 0);
    command(&mut game, GameCommand::Left);
    command(&mut game, GameCommand::Confirm);
    assert_eq!(game.save().selected_character, "astro");
}

#[test]
fn test_locked_stage_is_rejected() {
    let mut game = game();
    to_stage_select(&mut game);

    assert!(!game.start_stage(1));
    game.handle_event(GameCommand::Choose(3).into());
    assert!(!game.transition().in_flight());
    assert_eq!(game.screen(), ScreenState::StageSelect);
}

#[test]
fn test_starting_a_stage_begins_a_run() {
    let mut game = game();
    to_stage_select(&mut game);
    let mut sink = RecordingAudio::default();
    game.flush_audio(&mut sink);

    command(&mut game, GameCommand::Choose(1));
    assert_eq!(game.screen(), ScreenState::Playing);
    game.flush_audio(&mut sink);
    assert_eq!(sink.tracks, vec![Track::Title, Track::Gameplay]);

    let session = game.session().expect("active run");
    assert_eq!(session.stage.id, 1);
    assert_eq!(session.character.id, "rover");
}

#[test]
fn test_clear_is_recorded_and_shown() {
    let mut game = game();
    playing(&mut game);
    almost_cleared(&mut game);

    game.tick(NOMINAL_FRAME);
    let summary = *game.last_run().expect("summary");
    assert_eq!(summary.outcome, RunOutcome::Cleared);
    assert!(summary.new_best);
    assert!(game.save().is_cleared(0));
    assert!(game.save().is_unlocked(1));
    assert_that(&game.save().lifetime_distance).is_greater_than_or_equal_to(600);

    settle(&mut game);
    assert_eq!(game.screen(), ScreenState::StageCleared);
    assert!(game.pending_audio().contains(&AudioEvent::Track(Track::Clear)));
}

#[test]
fn test_first_stage_cleared_from_the_start_line() {
    let mut game = game();
    playing(&mut game);
    assert_eq!(game.menu().difficulty, Difficulty::Normal);
    {
        let session = game.session_mut().expect("active run");
        assert_eq!(session.stage.speed, 2.5);
        assert_eq!(session.stage.target_distance, 600.0);
        assert_eq!(session.player.lives, player::LIVES);
        assert_eq!(session.player.booster, player::MAX_BOOSTER);
        session.run.distance = 0.0;
        session.player.invincible = f32::MAX;
    }

    let mut ticks = 0;
    while game.last_run().is_none() {
        game.tick(NOMINAL_FRAME);
        ticks += 1;
        assert_that(&ticks).is_less_than(1000);
    }

    // 1.25 px per frame at the base speed, a little faster as the ramp builds
    assert_that(&ticks).is_greater_than_or_equal_to(465);
    assert_that(&ticks).is_less_than_or_equal_to(481);

    let summary = *game.last_run().expect("summary");
    assert_eq!(summary.outcome, RunOutcome::Cleared);
    assert_eq!(game.session().map(|s| s.player.lives), Some(player::LIVES));
    assert!(game.save().cleared_stages.contains(&1));
    assert!(game.save().is_unlocked(1));
    assert!(!game.save().is_unlocked(2));
}

#[test]
fn test_clear_then_next_stage() {
    let mut game = game();
    playing(&mut game);
    almost_cleared(&mut game);
    game.tick(NOMINAL_FRAME);
    settle(&mut game);

    command(&mut game, GameCommand::Right);
    assert_eq!(game.screen(), ScreenState::Playing);
    assert_eq!(game.session().map(|s| s.stage.id), Some(2));
}

#[test]
fn test_game_over_then_retry() {
    let mut game = game();
    playing(&mut game);
    almost_dead(&mut game);

    game.tick(NOMINAL_FRAME);
    let summary = *game.last_run().expect("summary");
    assert_eq!(summary.outcome, RunOutcome::GameOver);
    assert!(!game.save().is_unlocked(1));

    settle(&mut game);
    assert_eq!(game.screen(), ScreenState::GameOver);

    command(&mut game, GameCommand::Confirm);
    assert_eq!(game.screen(), ScreenState::Playing);
    let session = game.session().expect("fresh run");
    assert_eq!(session.player.lives, player::LIVES);
    assert!(!session.is_finished());
}

#[test]
fn test_finished_run_is_recorded_once() {
    let mut game = game();
    playing(&mut game);
    almost_cleared(&mut game);

    game.tick(NOMINAL_FRAME);
    let lifetime = game.save().lifetime_distance;
    for _ in 0..5 {
        game.tick(NOMINAL_FRAME);
    }
    assert_eq!(game.save().lifetime_distance, lifetime);
}

#[test]
fn test_abandoning_a_run() {
    let mut game = game();
    playing(&mut game);
    command(&mut game, GameCommand::Back);
    assert_eq!(game.screen(), ScreenState::StageSelect);
    assert!(game.session().is_none());
    assert!(game.last_run().is_none());
}

#[test]
fn test_abandoned_run_is_never_recorded() {
    let mut game = game();
    playing(&mut game);
    almost_dead(&mut game);
    if let Some(session) = game.session_mut() {
        session.run.distance = 300.0;
    }

    // The rock would land its hit during the fade out
    command(&mut game, GameCommand::Back);
    for _ in 0..60 {
        game.tick(NOMINAL_FRAME);
    }

    assert_eq!(game.screen(), ScreenState::StageSelect);
    assert!(game.last_run().is_none());
    assert_eq!(game.save().lifetime_distance, 0);
    assert_eq!(game.save().best_score(0), 0);
}

#[test]
fn test_mute_toggles_in_any_state() {
    let mut game = game();
    let mut sink = RecordingAudio::default();

    game.handle_event(GameCommand::ToggleMute.into());
    assert!(game.is_muted());
    game.set_muted(true);
    assert_eq!(game.pending_audio(), &[AudioEvent::Track(Track::Title), AudioEvent::Mute(true)]);

    game.flush_audio(&mut sink);
    assert!(sink.muted);

    playing(&mut game);
    game.handle_event(GameCommand::ToggleMute.into());
    game.flush_audio(&mut sink);
    assert!(!sink.muted);
    assert!(!game.is_muted());
}

#[test]
fn test_tick_clamps_delta() {
    let mut game = game();
    game.tick(1.0);
    assert_eq!(game.clock(), MAX_DELTA);
    game.tick(f32::NAN);
    game.tick(-3.0);
    assert_eq!(game.clock(), MAX_DELTA);
}

#[test]
fn test_title_rover_wraps() {
    let mut game = game();
    let start = game.title_rover_x();
    game.tick(NOMINAL_FRAME);
    assert_that(&game.title_rover_x()).is_greater_than(start);

    for _ in 0..2000 {
        game.tick(NOMINAL_FRAME);
    }
    assert_that(&game.title_rover_x()).is_less_than_or_equal_to(440.0);
}
