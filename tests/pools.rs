use glam::Vec2;
use moon_runner::constants::{effects as fx, retire, spawn, GROUND_Y};
use moon_runner::render::Color;
use moon_runner::systems::effects::{decay_shake, hit_burst, shake_offset};
use moon_runner::systems::pools::{
    ground_tiles, starfield, update_ground, update_rings, update_texts, FloatingText, ImpactRing, Obstacle, ObstacleKind,
    Pickup, PickupKind, Pools,
};
use pretty_assertions::assert_eq;
use rand::{rngs::SmallRng, SeedableRng};
use speculoos::prelude::*;

#[test]
fn test_laser_holds_position_while_warning() {
    let mut laser = Obstacle::laser(430.0, 100.0);

    laser.advance(5.0, 0.5, 30.0);
    assert_eq!(laser.x, 430.0);
    assert!(!laser.is_armed());

    laser.advance(5.0, 0.6, 36.0);
    assert!(laser.is_armed());
    assert!(matches!(laser.kind, ObstacleKind::Laser { warning, active: true } if warning == 0.0));

    laser.advance(5.0, 0.1, 6.0);
    assert_eq!(laser.x, 425.0);
}

#[test]
fn test_obstacle_geometry() {
    let rock = Obstacle::rock(100.0, 1.0);
    assert_eq!(rock.bottom(), GROUND_Y);
    assert_that(&rock.top()).is_less_than(GROUND_Y);

    let crater = Obstacle::crater(100.0, 40.0);
    assert_that(&crater.bottom()).is_greater_than(GROUND_Y);

    let laser = Obstacle::laser(100.0, 100.0);
    assert_eq!(laser.height, spawn::LASER_THICKNESS);
    assert_eq!(laser.bottom(), GROUND_Y - 100.0);
}

#[test]
fn test_obstacles_retire_past_left_edge() {
    let mut rock = Obstacle::rock(-70.0, 1.0);
    assert!(!rock.is_retired());
    // Scrolls from just inside the line to past it
    rock.advance(15.0, 0.05, 3.0);
    assert!(rock.is_retired());
    assert_that(&rock.x).is_less_than(retire::OBSTACLE_X);
}

#[test]
fn test_obstacle_crosses_viewport_and_retires() {
    let mut rock = Obstacle::rock(430.0, 1.0);
    let ticks = (0..1000).take_while(|_| {
        rock.advance(5.0, 1.0 / 60.0, 1.0);
        !rock.is_retired()
    });
    assert_eq!(ticks.count(), 102);
}

#[test]
fn test_pickups_scroll_and_retire() {
    let mut coin = Pickup::new(PickupKind::Coin, Vec2::new(-30.0, 500.0));
    coin.advance(5.0, 1.0);
    assert!(!coin.is_retired());
    coin.advance(10.0, 1.0);
    assert!(coin.is_retired());
}

#[test]
fn test_ground_tiles_wrap() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut tiles = ground_tiles(&mut rng);
    let span = tiles.len() as f32 * fx::GROUND_TILE_WIDTH;
    assert_eq!(tiles.len(), 22);

    let first = tiles[0].x;
    update_ground(&mut tiles, 30.0);
    assert_eq!(tiles[0].x, first - 30.0 + span);
    assert!(tiles.iter().all(|t| t.x >= retire::GROUND_TILE_X));
}

#[test]
fn test_texts_rise_and_expire() {
    let mut texts = vec![FloatingText::new("CLOSE +20", Vec2::new(100.0, 300.0), Color::MINT)];
    update_texts(&mut texts, 10.0);
    assert_eq!(texts.len(), 1);
    assert_that(&texts[0].pos.y).is_less_than(300.0);

    update_texts(&mut texts, fx::TEXT_LIFE);
    assert!(texts.is_empty());
}

#[test]
fn test_rings_grow_then_expire() {
    let mut rings = vec![ImpactRing::new(Vec2::new(50.0, 50.0), Color::WHITE)];
    let start = rings[0].radius;
    update_rings(&mut rings, 1.0);
    assert_that(&rings[0].radius).is_greater_than(start);
    update_rings(&mut rings, fx::RING_LIFE);
    assert!(rings.is_empty());
}

#[test]
fn test_starfield_size() {
    let stars = starfield(&mut SmallRng::seed_from_u64(1));
    assert_eq!(stars.len(), fx::STAR_COUNT);
    assert!(stars.iter().all(|s| s.pos.y < GROUND_Y));
}

#[test]
fn test_hit_burst_shakes_camera() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut pools = Pools::default();
    let mut shake = 0.0;

    hit_burst(&mut pools, &mut rng, Vec2::new(80.0, 540.0), &mut shake);
    assert_eq!(shake, fx::SHAKE_ON_HIT);
    assert_that(&pools.particles.len()).is_greater_than(0);
    assert_eq!(pools.rings.len(), 1);

    let offset = shake_offset(shake, &mut rng);
    assert_that(&offset.x.abs()).is_less_than_or_equal_to(shake);
}

#[test]
fn test_shake_decays_to_zero() {
    assert_that(&(decay_shake(10.0, 1.0) - 8.5).abs()).is_less_than(1e-4);
    assert_eq!(decay_shake(0.55, 1.0), 0.0);
    assert_eq!(shake_offset(0.0, &mut SmallRng::seed_from_u64(0)), Vec2::ZERO);
}
