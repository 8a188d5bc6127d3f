//! Plays every stage with a simple autopilot and no window, logging how each run ends.
//!
//! Useful for checking pacing and balance changes: a fixed `MOON_RUNNER_SEED`
//! replays the exact same runs.

use anyhow::{bail, Result};
use tracing::{info, warn};

use moon_runner::audio::RecordingAudio;
use moon_runner::config::Config;
use moon_runner::constants::NOMINAL_FRAME;
use moon_runner::events::{GameCommand, GameEvent};
use moon_runner::game::Game;
use moon_runner::platform;
use moon_runner::save::MemoryStore;
use moon_runner::stage::STAGE_COUNT;
use moon_runner::systems::pools::ObstacleKind;
use moon_runner::systems::state::ScreenState;

/// Attempts per stage before giving up on the rest of the course.
const ATTEMPTS: usize = 3;
/// Upper bound on a single run, in ticks.
const RUN_LIMIT: usize = 60 * 60 * 5;
/// Jump when the nearest ground hazard's leading edge is this close.
const JUMP_LEAD: f32 = 100.0;

struct Pilot {
    game: Game,
    audio: RecordingAudio,
    ticks: usize,
}

impl Pilot {
    fn now_ms(&self) -> f64 {
        self.ticks as f64 * f64::from(NOMINAL_FRAME) * 1000.0
    }

    fn step(&mut self) {
        self.game.tick(NOMINAL_FRAME);
        self.game.flush_audio(&mut self.audio);
        self.ticks += 1;
    }

    fn settle(&mut self) {
        while self.game.transition().in_flight() {
            self.step();
        }
    }

    fn command(&mut self, command: GameCommand) {
        self.game.handle_event(command.into());
        self.settle();
    }

    /// Whether a rock or crater is about to reach the runner.
    fn hazard_ahead(&self) -> bool {
        let Some(session) = self.game.session() else {
            return false;
        };
        let player = &session.player;
        session.pools.obstacles.iter().any(|o| {
            let ground = matches!(o.kind, ObstacleKind::Rock { .. } | ObstacleKind::Crater);
            let gap = (o.x - o.width / 2.0) - player.x;
            ground && gap > 0.0 && gap < JUMP_LEAD
        })
    }

    fn play(&mut self, stage: usize) -> Option<ScreenState> {
        if !self.game.start_stage(stage) {
            return None;
        }
        self.settle();

        for _ in 0..RUN_LIMIT {
            let grounded = self.game.session().is_some_and(|s| !s.player.airborne);
            if grounded && self.hazard_ahead() {
                let at_ms = self.now_ms();
                self.game.handle_event(GameEvent::Press { at_ms });
                self.game.handle_event(GameEvent::Release { at_ms: at_ms + 40.0 });
            }

            self.step();
            match self.game.screen() {
                ScreenState::StageCleared | ScreenState::GameOver if !self.game.transition().in_flight() => {
                    return Some(self.game.screen());
                }
                _ => {}
            }
        }
        None
    }
}

fn main() -> Result<()> {
    let config = Config::load()?;
    platform::init_logging(&config.log_filter);

    let seed = config.seed.unwrap_or(0x5eed);
    let mut pilot = Pilot {
        game: Game::new(Box::new(MemoryStore::new()), platform::rng(Some(seed))),
        audio: RecordingAudio::default(),
        ticks: 0,
    };

    pilot.command(GameCommand::Confirm);
    pilot.command(GameCommand::Confirm);
    pilot.command(GameCommand::Confirm);
    if pilot.game.screen() != ScreenState::StageSelect {
        bail!("Autopilot could not reach stage select, stuck on {}", pilot.game.screen());
    }

    for stage in 0..STAGE_COUNT {
        let mut cleared = false;
        for attempt in 1..=ATTEMPTS {
            let result = pilot.play(stage);
            let summary = pilot.game.last_run().copied();
            match (result, summary) {
                (Some(ScreenState::StageCleared), Some(run)) => {
                    info!(stage = stage + 1, attempt, score = run.score, coins = run.coins, "Cleared");
                    cleared = true;
                }
                (Some(ScreenState::GameOver), Some(run)) => {
                    info!(stage = stage + 1, attempt, score = run.score, distance = run.distance, "Game over");
                }
                _ => warn!(stage = stage + 1, attempt, "Run did not finish"),
            }
            pilot.command(GameCommand::Back);
            if cleared {
                break;
            }
        }
        if !cleared {
            warn!(stage = stage + 1, "Autopilot gave up");
            break;
        }
    }

    let save = pilot.game.save();
    info!(
        ticks = pilot.ticks,
        lifetime_distance = save.lifetime_distance,
        cleared = save.cleared_stages.len(),
        cues = pilot.audio.cues.len(),
        "Autopilot finished"
    );
    Ok(())
}
