mod common;

use common::{session, tick_session};
use moon_runner::audio::{AudioEvent, AudioQueue, Cue};
use moon_runner::constants::{player, scoring as points, NOMINAL_FRAME};
use moon_runner::stage::{Difficulty, STAGES};
use moon_runner::systems::pools::{Obstacle, Pickup, PickupKind};
use moon_runner::systems::collision::collect_center;
use moon_runner::systems::session::RunOutcome;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

fn played(audio: &AudioQueue, cue: Cue) -> bool {
    audio.contains(&AudioEvent::Play(cue))
}

#[test]
fn test_distance_grows_with_speed() {
    let mut run = session(0);
    tick_session(&mut run, 60);
    let expected = run.stage.speed * 0.5 * 60.0;
    assert_that(&run.run.distance).is_greater_than(expected * 0.99);
    assert_that(&run.layers[3]).is_greater_than(run.layers[0]);
}

#[test]
fn test_harder_difficulty_scrolls_faster() {
    let normal = session(0);
    let mut hell = session(0);
    hell.difficulty = Difficulty::Hell;
    assert_that(&hell.scroll_speed()).is_greater_than(normal.scroll_speed());
}

#[test]
fn test_reaching_target_clears_once() {
    let mut run = session(0);
    run.run.distance = run.stage.target_distance - 0.01;
    let mut audio = AudioQueue::new();

    assert_eq!(run.tick(NOMINAL_FRAME, &mut audio), Some(RunOutcome::Cleared));
    assert_eq!(run.outcome(), Some(RunOutcome::Cleared));

    let distance = run.run.distance;
    assert_eq!(run.tick(NOMINAL_FRAME, &mut audio), None);
    assert_eq!(run.run.distance, distance);
    assert_that(&run.final_score()).is_greater_than_or_equal_to(STAGES[0].target_distance as u32);
    assert_eq!(run.progress(), 1.0);
}

#[test]
fn test_hit_costs_a_life_and_grants_immunity() {
    let mut run = session(0);
    run.run.combo.extend();
    run.pools.obstacles.push(Obstacle::rock(player::X, 1.0));
    let mut audio = AudioQueue::new();

    assert_eq!(run.tick(NOMINAL_FRAME, &mut audio), None);
    assert_eq!(run.player.lives, player::LIVES - 1);
    assert_eq!(run.player.invincible, player::INVINCIBILITY);
    assert_eq!(run.run.combo.count, 0);
    assert!(run.pools.obstacles.is_empty());
    assert_that(&run.shake).is_greater_than(0.0);
    assert!(played(&audio, Cue::Hit));

    // Immune to a second rock right away
    run.pools.obstacles.push(Obstacle::rock(player::X, 1.0));
    run.tick(NOMINAL_FRAME, &mut audio);
    assert_eq!(run.player.lives, player::LIVES - 1);
}

#[test]
fn test_last_life_ends_run_once() {
    let mut run = session(0);
    run.player.lives = 1;
    run.pools.obstacles.push(Obstacle::rock(player::X, 1.0));
    run.pools.obstacles.push(Obstacle::rock(player::X + 4.0, 1.0));
    let mut audio = AudioQueue::new();

    assert_eq!(run.tick(NOMINAL_FRAME, &mut audio), Some(RunOutcome::GameOver));
    assert_eq!(run.player.lives, 0);
    assert!(played(&audio, Cue::Death));
    assert_eq!(audio.iter().filter(|e| **e == AudioEvent::Play(Cue::Hit)).count(), 1);

    assert_eq!(run.tick(NOMINAL_FRAME, &mut audio), None);
    assert!(run.is_finished());
}

#[test]
fn test_no_bonus_after_the_final_hit() {
    let mut run = session(0);
    run.player.lives = 1;
    run.player.y = 450.0;
    run.player.airborne = true;
    run.player.vy = -3.0;
    // Floating hazard in the runner's path, then a rock cleared high above
    run.pools.obstacles.push(Obstacle::floating(player::X, 80.0, 40.0, 40.0));
    run.pools.obstacles.push(Obstacle::rock(1.0, 1.0));
    let mut audio = AudioQueue::new();

    assert_eq!(run.tick(NOMINAL_FRAME, &mut audio), Some(RunOutcome::GameOver));
    assert_eq!(run.run.score, 0);
    assert_eq!(run.run.combo.count, 0);
    assert!(!played(&audio, Cue::Perfect));
}

#[test]
fn test_finished_run_ignores_input() {
    let mut run = session(0);
    run.run.distance = run.stage.target_distance;
    let mut audio = AudioQueue::new();
    run.tick(NOMINAL_FRAME, &mut audio);

    run.press(0.0, &mut audio);
    run.release(40.0, &mut audio);
    assert!(!run.player.airborne);
}

#[test]
fn test_jump_and_boost_cues() {
    let mut run = session(0);
    let mut audio = AudioQueue::new();

    run.press(0.0, &mut audio);
    assert!(audio.is_empty());
    run.release(50.0, &mut audio);
    assert!(played(&audio, Cue::Jump));
    assert!(run.player.airborne);

    run.tick(NOMINAL_FRAME, &mut audio);
    run.press(100.0, &mut audio);
    assert!(played(&audio, Cue::Boost));
    assert_eq!(run.player.booster, player::MAX_BOOSTER - 1);
}

#[test]
fn test_jump_lands_with_cue() {
    let mut run = session(0);
    let mut audio = AudioQueue::new();
    run.press(0.0, &mut audio);
    run.release(50.0, &mut audio);

    let audio = tick_session(&mut run, 120);
    assert!(!run.player.airborne);
    assert!(played(&audio, Cue::Land));
}

#[test]
fn test_coin_collected_once() {
    let mut run = session(0);
    let center = collect_center(&run.player);
    run.pools.pickups.push(Pickup::new(PickupKind::Coin, center));
    let mut audio = AudioQueue::new();

    run.tick(NOMINAL_FRAME, &mut audio);
    assert_eq!(run.run.coins, 1);
    assert_eq!(run.run.score, points::COIN_POINTS);
    assert!(played(&audio, Cue::Collect));
    assert!(run.pools.pickups.iter().all(|p| p.kind != PickupKind::Coin));
}

#[test]
fn test_energy_restores_booster_up_to_max() {
    let mut run = session(0);
    run.player.booster = player::MAX_BOOSTER - 1;
    let center = collect_center(&run.player);
    run.pools.pickups.push(Pickup::new(PickupKind::Energy, center));
    run.pools.pickups.push(Pickup::new(PickupKind::Energy, center));

    tick_session(&mut run, 1);
    assert_eq!(run.player.booster, player::MAX_BOOSTER);
}

#[test]
fn test_high_pass_scores_perfect() {
    let mut run = session(0);
    run.pools.obstacles.push(Obstacle::rock(1.0, 1.0));
    run.player.y = 450.0;
    run.player.airborne = true;
    run.player.vy = -3.0;
    let mut audio = AudioQueue::new();

    run.tick(NOMINAL_FRAME, &mut audio);
    assert_eq!(run.run.score, 50);
    assert_eq!(run.run.combo.count, 1);
    assert!(played(&audio, Cue::Perfect));
    assert!(run.pools.texts.iter().any(|t| t.text.starts_with("PERFECT")));
}

#[test]
fn test_grounded_pass_scores_nothing() {
    let mut run = session(0);
    // Already behind the runner, so it cannot touch them
    run.pools.obstacles.push(Obstacle::rock(1.0, 1.0));
    tick_session(&mut run, 1);
    assert_eq!(run.run.score, 0);
    assert!(run.pools.obstacles.iter().all(|o| o.scored));
}

#[test]
fn test_milestone_awarded_once() {
    let mut run = session(0);
    run.run.distance = 99.99;
    let audio = tick_session(&mut run, 3);
    assert_eq!(run.run.milestones.reached(), 1);
    assert_eq!(audio.iter().filter(|e| **e == AudioEvent::Play(Cue::Milestone)).count(), 1);
    assert_that(&run.run.score).is_greater_than_or_equal_to(points::MILESTONE_POINTS);
}

#[test]
fn test_pools_stay_bounded_over_a_long_run() {
    let mut run = session(4);
    run.player.invincible = f32::MAX;
    tick_session(&mut run, 60 * 12);

    assert!(!run.is_finished());
    assert_that(&run.pools.obstacles.len()).is_less_than(40);
    assert_that(&run.pools.pickups.len()).is_less_than(40);
    assert!(run.pools.obstacles.iter().all(|o| !o.is_retired()));
    assert_eq!(run.pools.ground.len(), 22);
}

#[test]
fn test_earth_only_on_first_stage() {
    use moon_runner::systems::pools::DecorationKind;
    let has_earth = |stage: usize| {
        session(stage)
            .pools
            .decorations
            .iter()
            .any(|d| matches!(d.kind, DecorationKind::Earth { .. }))
    };
    assert!(has_earth(0));
    assert!(!has_earth(1));
}
