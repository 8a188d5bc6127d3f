use moon_runner::constants::{player, GROUND_Y};
use moon_runner::systems::physics::{JumpKind, PhysicsEvent, Player};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

fn jumped(kind: JumpKind) -> Player {
    let mut p = Player::new(player::MAX_BOOSTER);
    p.press(0.0);
    let held = match kind {
        JumpKind::Short => 40.0,
        JumpKind::Long => 300.0,
    };
    assert_eq!(p.release(held), Some(PhysicsEvent::Jumped(kind)));
    p
}

#[test]
fn test_short_hold_is_short_jump() {
    let p = jumped(JumpKind::Short);
    assert!(p.airborne);
    assert_eq!(p.vy, player::SHORT_JUMP);
}

#[test]
fn test_boundary_hold_is_long_jump() {
    assert_eq!(JumpKind::from_hold(149.9), JumpKind::Short);
    assert_eq!(JumpKind::from_hold(player::LONG_PRESS_MS), JumpKind::Long);

    let mut p = Player::new(player::MAX_BOOSTER);
    p.press(1000.0);
    assert_eq!(p.release(1150.0), Some(PhysicsEvent::Jumped(JumpKind::Long)));
    assert_eq!(p.vy, player::LONG_JUMP);
}

#[test]
fn test_grounded_press_only_buffers() {
    let mut p = Player::new(player::MAX_BOOSTER);
    assert_eq!(p.press(10.0), None);
    assert!(!p.airborne);
    assert_eq!(p.pending_press, Some(10.0));

    // A second press does not restart the hold
    p.press(90.0);
    assert_eq!(p.pending_press, Some(10.0));
}

#[test]
fn test_release_without_press_does_nothing() {
    let mut p = Player::new(player::MAX_BOOSTER);
    assert_eq!(p.release(50.0), None);
    assert!(!p.airborne);
}

#[test]
fn test_release_in_air_does_not_jump_again() {
    let mut p = jumped(JumpKind::Short);
    p.integrate(3.0);
    let vy = p.vy;
    assert_eq!(p.release(500.0), None);
    assert_eq!(p.vy, vy);
}

#[test]
fn test_split_steps_match_single_step() {
    let mut whole = jumped(JumpKind::Long);
    let mut split = whole.clone();

    whole.integrate(4.0);
    for _ in 0..4 {
        split.integrate(1.0);
    }

    assert_that(&(whole.y - split.y).abs()).is_less_than(1e-3);
    assert_that(&(whole.vy - split.vy).abs()).is_less_than(1e-4);
}

#[test]
fn test_lands_exactly_once() {
    let mut p = jumped(JumpKind::Long);
    let landings = (0..200)
        .filter_map(|_| p.integrate(1.0))
        .filter(|e| *e == PhysicsEvent::Landed)
        .count();

    assert_eq!(landings, 1);
    assert!(!p.airborne);
    assert_eq!(p.y, GROUND_Y);
    assert_eq!(p.vy, 0.0);
}

#[test]
fn test_long_jump_goes_higher() {
    let apex = |kind| {
        let mut p = jumped(kind);
        let mut top = p.y;
        while p.integrate(1.0).is_none() {
            top = top.min(p.y);
        }
        top
    };
    assert_that(&apex(JumpKind::Long)).is_less_than(apex(JumpKind::Short));
}

#[test]
fn test_air_press_spends_booster() {
    let mut p = jumped(JumpKind::Short);
    p.integrate(5.0);

    assert_eq!(p.press(200.0), Some(PhysicsEvent::Boosted));
    assert_eq!(p.booster, player::MAX_BOOSTER - 1);
    assert_eq!(p.vy, player::BOOST_JUMP);
    assert!(p.boost_trail);
}

#[test]
fn test_empty_booster_ignores_air_press() {
    let mut p = jumped(JumpKind::Short);
    p.booster = 0;
    let vy = p.vy;
    assert_eq!(p.press(200.0), None);
    assert_eq!(p.vy, vy);
}

#[test]
fn test_booster_recharges_on_ground() {
    let mut p = Player::new(player::MAX_BOOSTER);
    p.booster = 1;

    assert_eq!(p.tick_timers(1.0), None);
    assert_eq!(p.tick_timers(1.0), None);
    assert_eq!(p.tick_timers(1.0), Some(PhysicsEvent::Recharged));
    assert_eq!(p.booster, 2);
    assert_eq!(p.booster_timer, 0.0);
}

#[test]
fn test_booster_does_not_recharge_in_air_or_at_max() {
    let mut p = jumped(JumpKind::Long);
    p.booster = 0;
    assert_eq!(p.tick_timers(5.0), None);
    assert_eq!(p.booster, 0);

    let mut full = Player::new(player::MAX_BOOSTER);
    assert_eq!(full.tick_timers(5.0), None);
    assert_eq!(full.booster_timer, 0.0);
}

#[test]
fn test_invincibility_counts_down_and_blinks() {
    let mut p = Player::new(player::MAX_BOOSTER);
    p.invincible = 0.15;
    assert!(p.is_invincible());
    assert!(!p.is_visible());

    p.tick_timers(0.1);
    assert!(p.is_visible());

    p.tick_timers(1.0);
    assert!(!p.is_invincible());
    assert_eq!(p.invincible, 0.0);
}
