use moon_runner::audio::Track;
use moon_runner::constants::transition;
use moon_runner::render::Color;
use moon_runner::systems::state::{Commit, ScreenMachine, ScreenState, Transition, TransitionPhase};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

#[test]
fn test_second_request_rejected_in_flight() {
    let mut t = Transition::default();
    assert!(t.request(ScreenState::DifficultySelect));
    assert!(!t.request(ScreenState::GameOver));
    assert_eq!(t.target(), ScreenState::DifficultySelect);
}

#[test]
fn test_commits_once_when_opaque() {
    let mut t = Transition::default();
    t.request(ScreenState::StageSelect);

    assert_eq!(t.tick(0.2), None);
    assert_eq!(t.tick(0.2), Some(ScreenState::StageSelect));
    assert!(matches!(t.phase(), TransitionPhase::In { .. }));
    assert_eq!(t.tick(0.1), None);
    assert_eq!(t.tick(0.25), None);
    assert_eq!(t.phase(), TransitionPhase::Idle);
    assert!(!t.in_flight());
}

#[test]
fn test_large_tick_still_commits_once() {
    let mut t = Transition::default();
    t.request(ScreenState::Playing);

    let commits = (0..10).filter_map(|_| t.tick(5.0)).count();
    assert_eq!(commits, 1);
    assert!(!t.in_flight());
}

#[test]
fn test_idle_tick_does_nothing() {
    let mut t = Transition::default();
    assert_eq!(t.tick(1.0), None);
    assert_eq!(t.opacity(), 0.0);
}

#[test]
fn test_opacity_rises_then_falls() {
    let mut t = Transition::default();
    t.request(ScreenState::CharSelect);

    t.tick(transition::MENU / 2.0);
    assert_that(&(t.opacity() - 0.5).abs()).is_less_than(1e-4);

    t.tick(transition::MENU / 2.0);
    assert_that(&t.opacity()).is_greater_than(0.99);

    t.tick(transition::MENU / 4.0);
    assert_that(&t.opacity()).is_less_than(0.8);
}

#[test]
fn test_result_screens_flash() {
    let mut t = Transition::default();
    t.request(ScreenState::GameOver);
    t.tick(0.01);
    let (color, strength) = t.flash().expect("flash early in the fade");
    assert_eq!(color, Color::RED);
    assert_that(&strength).is_greater_than(0.5);

    t.tick(transition::RESULT * 0.5);
    assert_eq!(t.flash(), None);

    let mut menu = Transition::default();
    menu.request(ScreenState::StageSelect);
    menu.tick(0.01);
    assert_eq!(menu.flash(), None);
}

#[test]
fn test_machine_reports_commit() {
    let mut machine = ScreenMachine::new();
    assert_eq!(machine.current(), ScreenState::Title);
    assert!(machine.request(ScreenState::DifficultySelect));

    let commit = (0..60).find_map(|_| machine.tick(1.0 / 60.0));
    assert_eq!(
        commit,
        Some(Commit {
            from: ScreenState::Title,
            to: ScreenState::DifficultySelect
        })
    );
    assert_eq!(machine.current(), ScreenState::DifficultySelect);
}

#[test]
fn test_soundtracks() {
    assert_eq!(ScreenState::Title.soundtrack(), Some(Track::Title));
    assert_eq!(ScreenState::Playing.soundtrack(), Some(Track::Gameplay));
    assert_eq!(ScreenState::StageCleared.soundtrack(), Some(Track::Clear));
    assert_eq!(ScreenState::GameOver.soundtrack(), Some(Track::GameOver));
    assert_eq!(ScreenState::StageSelect.soundtrack(), None);
}

#[test]
fn test_every_state_has_a_fade() {
    for state in ScreenState::iter() {
        assert_that(&state.transition_duration()).is_greater_than(0.0);
    }
}
