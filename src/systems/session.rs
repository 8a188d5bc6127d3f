//! A single run of one stage: the player, run counters, every pool, and the
//! fixed order they are updated in each tick.

use glam::Vec2;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::audio::{AudioEvent, AudioQueue, Cue};
use crate::constants::scoring as points;
use crate::constants::{player, retire, scroll, NOMINAL_FRAME};
use crate::render::Color;
use crate::stage::{BackdropEvent, Character, Difficulty, Stage};
use crate::systems::collision::{self, collect_center, collides};
use crate::systems::effects;
use crate::systems::physics::{PhysicsEvent, Player};
use crate::systems::pools::{self, Decoration, DecorationEffect, DecorationKind, FloatingText, ImpactRing, PickupKind, Pools};
use crate::systems::scoring::{self, Combo, Milestones, NearMiss};
use crate::systems::spawner::{self, Spawner};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Cleared,
    GameOver,
}

/// Per-run counters, reset when a run starts.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub distance: f32,
    /// Bonus points from coins, near-misses and milestones.
    pub score: u32,
    pub coins: u32,
    pub combo: Combo,
    pub milestones: Milestones,
    pub spawner: Spawner,
    /// Seconds spent in the run.
    pub elapsed: f32,
}

impl RunState {
    /// Bonus points plus the distance travelled.
    pub fn final_score(&self) -> u32 {
        self.score.saturating_add(self.distance.max(0.0).floor() as u32)
    }
}

pub struct Session {
    pub stage: &'static Stage,
    pub difficulty: Difficulty,
    pub character: &'static Character,
    pub player: Player,
    pub run: RunState,
    pub pools: Pools,
    /// Accumulated scroll offset of each parallax layer.
    pub layers: [f32; 4],
    /// Current screen-shake amplitude.
    pub shake: f32,
    /// Camera offset derived from the shake this tick.
    pub camera: Vec2,
    outcome: Option<RunOutcome>,
    rng: SmallRng,
}

impl Session {
    pub fn new(stage: &'static Stage, difficulty: Difficulty, character: &'static Character, mut rng: SmallRng) -> Self {
        let mut pools = Pools {
            ground: pools::ground_tiles(&mut rng),
            stars: pools::starfield(&mut rng),
            ..Default::default()
        };
        if stage.has_event(BackdropEvent::Earth) {
            pools.decorations.push(Decoration {
                kind: DecorationKind::Earth { size: 28.0 },
                pos: Vec2::new(300.0, 110.0),
            });
        }

        let run = RunState {
            distance: 0.0,
            score: 0,
            coins: 0,
            combo: Combo::default(),
            milestones: Milestones::default(),
            spawner: Spawner::new(&mut rng),
            elapsed: 0.0,
        };

        info!(stage = stage.name, %difficulty, character = character.id, "Run started");

        Self {
            stage,
            difficulty,
            character,
            player: Player::new(player::MAX_BOOSTER),
            run,
            pools,
            layers: [0.0; 4],
            shake: 0.0,
            camera: Vec2::ZERO,
            outcome: None,
            rng,
        }
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Current scroll speed: the stage base scaled by difficulty, growing slowly with distance.
    pub fn scroll_speed(&self) -> f32 {
        self.stage.speed * self.difficulty.speed_multiplier() * (1.0 + self.run.distance * scroll::DISTANCE_RAMP)
    }

    pub fn final_score(&self) -> u32 {
        self.run.final_score()
    }

    /// Fraction of the stage's target distance covered, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        (self.run.distance / self.stage.target_distance).clamp(0.0, 1.0)
    }

    pub fn press(&mut self, at_ms: f64, audio: &mut AudioQueue) {
        if self.is_finished() {
            return;
        }
        if let Some(PhysicsEvent::Boosted) = self.player.press(at_ms) {
            debug!(booster = self.player.booster, "Boost");
            audio.push(AudioEvent::Play(Cue::Boost));
        }
    }

    pub fn release(&mut self, at_ms: f64, audio: &mut AudioQueue) {
        if self.is_finished() {
            return;
        }
        if let Some(PhysicsEvent::Jumped(kind)) = self.player.release(at_ms) {
            debug!(?kind, "Jump");
            audio.push(AudioEvent::Play(Cue::Jump));
        }
    }

    /// Advances the run by `dt` seconds.
    ///
    /// # Returns
    /// The outcome on the tick the run ends, exactly once. A finished session no longer changes.
    pub fn tick(&mut self, dt: f32, audio: &mut AudioQueue) -> Option<RunOutcome> {
        if self.is_finished() {
            return None;
        }

        let frames = dt / NOMINAL_FRAME;
        let speed = self.scroll_speed();
        self.run.elapsed += dt;
        self.run.distance += speed * scroll::DISTANCE_FACTOR * frames;

        self.award_milestones(audio);

        if self.run.distance >= self.stage.target_distance {
            info!(distance = self.run.distance, score = self.final_score(), "Stage cleared");
            self.outcome = Some(RunOutcome::Cleared);
            return self.outcome;
        }

        for (offset, factor) in self.layers.iter_mut().zip(scroll::PARALLAX) {
            *offset += speed * factor * frames;
        }

        self.step_player(dt, frames, audio);

        let shift = speed * scroll::WORLD_FACTOR * frames;
        self.run
            .spawner
            .tick(self.stage, self.difficulty, shift, dt, &mut self.pools, &mut self.rng);
        spawner::maybe_spawn_energy(&mut self.pools, &mut self.rng, frames);
        spawner::spawn_backdrop(self.stage, &mut self.pools, &mut self.rng, frames);

        self.step_obstacles(shift, dt, frames, audio);
        self.step_pickups(shift, frames, audio);
        self.step_cosmetics(speed, shift, frames);

        if self.run.combo.tick(dt) {
            debug!("Combo expired");
        }

        self.shake = effects::decay_shake(self.shake, frames);
        self.camera = effects::shake_offset(self.shake, &mut self.rng);

        self.outcome
    }

    fn award_milestones(&mut self, audio: &mut AudioQueue) {
        for threshold in self.run.milestones.cross(self.run.distance) {
            self.run.score = self.run.score.saturating_add(points::MILESTONE_POINTS);
            debug!(threshold, "Milestone reached");
            self.pools.texts.push(FloatingText::new(
                format!("{}m!", threshold as u32),
                Vec2::new(200.0, 200.0),
                Color::GOLD,
            ));
            audio.push(AudioEvent::Play(Cue::Milestone));
        }
    }

    fn step_player(&mut self, dt: f32, frames: f32, audio: &mut AudioQueue) {
        if let Some(PhysicsEvent::Landed) = self.player.integrate(frames) {
            let feet = Vec2::new(self.player.x, self.player.y);
            effects::dust_burst(&mut self.pools, &mut self.rng, feet, 6, self.stage.theme.ground.shade(0.3));
            audio.push(AudioEvent::Play(Cue::Land));
        }

        if let Some(PhysicsEvent::Recharged) = self.player.tick_timers(dt) {
            debug!(booster = self.player.booster, "Booster recharged");
        }

        if std::mem::take(&mut self.player.boost_trail) {
            let exhaust = Vec2::new(self.player.x - 8.0, self.player.y - 6.0);
            effects::boost_trail(&mut self.pools, &mut self.rng, exhaust);
        }
    }

    fn step_obstacles(&mut self, shift: f32, dt: f32, frames: f32, audio: &mut AudioQueue) {
        let mut obstacles = std::mem::take(&mut self.pools.obstacles);
        obstacles.retain_mut(|obstacle| {
            obstacle.advance(shift, dt, frames);
            if obstacle.is_retired() {
                return false;
            }

            if !self.is_finished() && !self.player.is_invincible() && collides(&self.player, obstacle) {
                self.hit(audio);
                return false;
            }

            // A run that ended earlier in this pass earns nothing more
            if !self.is_finished() && !obstacle.scored && obstacle.x < retire::TRAILING_EDGE_X {
                obstacle.scored = true;
                if let Some(near_miss) = scoring::judge_near_miss(&self.player, obstacle, &mut self.run.combo) {
                    self.award_near_miss(near_miss, audio);
                }
            }
            true
        });
        self.pools.obstacles = obstacles;
    }

    fn hit(&mut self, audio: &mut AudioQueue) {
        let player = &mut self.player;
        player.lives = player.lives.saturating_sub(1);
        player.invincible = player::INVINCIBILITY;
        self.run.combo.reset();

        let center = Vec2::new(self.player.x, self.player.y - 16.0);
        effects::hit_burst(&mut self.pools, &mut self.rng, center, &mut self.shake);
        audio.push(AudioEvent::Play(Cue::Hit));
        info!(lives = self.player.lives, distance = self.run.distance, "Player hit");

        if self.player.lives == 0 {
            info!(distance = self.run.distance, score = self.final_score(), "Game over");
            audio.push(AudioEvent::Play(Cue::Death));
            self.outcome = Some(RunOutcome::GameOver);
        }
    }

    fn award_near_miss(&mut self, near_miss: NearMiss, audio: &mut AudioQueue) {
        self.run.score = self.run.score.saturating_add(near_miss.points());
        let at = Vec2::new(self.player.x + 20.0, self.player.y - 50.0);
        match near_miss {
            NearMiss::Perfect { points, combo } => {
                debug!(points, combo, "Perfect clear");
                self.pools.texts.push(FloatingText::new(format!("PERFECT +{points}"), at, Color::GOLD));
                audio.push(AudioEvent::Play(Cue::Perfect));
                if combo >= 2 {
                    let lifted = at - Vec2::new(0.0, 18.0);
                    self.pools.texts.push(FloatingText::new(format!("COMBO x{combo}"), lifted, Color::CYAN));
                    audio.push(AudioEvent::Play(Cue::Combo(combo)));
                }
            }
            NearMiss::Close { points } => {
                self.pools.texts.push(FloatingText::new(format!("CLOSE +{points}"), at, Color::MINT));
            }
        }
    }

    fn step_pickups(&mut self, shift: f32, frames: f32, audio: &mut AudioQueue) {
        let mut pickups = std::mem::take(&mut self.pools.pickups);
        pickups.retain_mut(|pickup| {
            pickup.advance(shift, frames);
            if pickup.is_retired() {
                return false;
            }
            if self.is_finished() || !collision::collects(&self.player, pickup) {
                return true;
            }

            match pickup.kind {
                PickupKind::Coin => {
                    self.run.coins += 1;
                    self.run.score = self.run.score.saturating_add(points::COIN_POINTS);
                    effects::sparkle(&mut self.pools, &mut self.rng, pickup.pos, Color::GOLD);
                }
                PickupKind::Energy => {
                    self.player.booster = (self.player.booster + 1).min(self.player.max_booster);
                    effects::sparkle(&mut self.pools, &mut self.rng, pickup.pos, Color::CYAN);
                    self.pools.texts.push(FloatingText::new("+BOOST", collect_center(&self.player), Color::CYAN));
                }
            }
            audio.push(AudioEvent::Play(Cue::Collect));
            false
        });
        self.pools.pickups = pickups;
    }

    fn step_cosmetics(&mut self, speed: f32, shift: f32, frames: f32) {
        for effect in pools::update_decorations(&mut self.pools.decorations, speed, frames) {
            match effect {
                DecorationEffect::Impact(at) => {
                    effects::dust_burst(&mut self.pools, &mut self.rng, at, 12, self.stage.theme.ground.shade(0.2));
                    self.pools.rings.push(ImpactRing::new(at, Color::hex(0xffaa66)));
                }
                DecorationEffect::Ember(at) => effects::ember(&mut self.pools, &mut self.rng, at),
            }
        }
        pools::update_particles(&mut self.pools.particles, frames);
        pools::update_texts(&mut self.pools.texts, frames);
        pools::update_rings(&mut self.pools.rings, frames);
        pools::update_ground(&mut self.pools.ground, shift);
        for star in &mut self.pools.stars {
            star.twinkle += 0.05 * frames;
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("stage", &self.stage.id)
            .field("difficulty", &self.difficulty)
            .field("character", &self.character.id)
            .field("distance", &self.run.distance)
            .field("lives", &self.player.lives)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
