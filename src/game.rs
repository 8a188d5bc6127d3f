//! The game root: screen flow, menu cursors, the active run and persistence.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, trace, warn};

use crate::audio::{AudioEvent, AudioQueue, AudioSink};
use crate::constants::{CANVAS_SIZE, MAX_DELTA, NOMINAL_FRAME};
use crate::events::{GameCommand, GameEvent};
use crate::formatter;
use crate::save::{SaveRecord, SaveStore};
use crate::stage::{character, unlocked_characters, Difficulty, CHARACTERS, MOON_FACTS, STAGES, STAGE_COUNT};
use crate::systems::session::{RunOutcome, Session};
use crate::systems::state::{ScreenMachine, ScreenState, Transition};

/// Cursor positions of the selection screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub difficulty: Difficulty,
    /// Index into [`CHARACTERS`].
    pub character: usize,
    /// Index into [`STAGES`].
    pub stage: usize,
}

/// What the result screens show about the run that just ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub stage: usize,
    pub score: u32,
    pub distance: f32,
    pub coins: u32,
    pub new_best: bool,
    /// Index into [`MOON_FACTS`] for the game-over card.
    pub fact: usize,
}

pub struct Game {
    screen: ScreenMachine,
    save: SaveRecord,
    store: Box<dyn SaveStore>,
    session: Option<Session>,
    menu: MenuState,
    /// Stage to start once the transition into `Playing` commits.
    pending_stage: Option<usize>,
    /// Result screen still waiting for a free transition slot.
    pending_result: Option<ScreenState>,
    last_run: Option<RunSummary>,
    audio: AudioQueue,
    muted: bool,
    rng: SmallRng,
    clock: f32,
    /// Position of the rover crossing the title screen.
    title_rover_x: f32,
}

impl Game {
    pub fn new(store: Box<dyn SaveStore>, rng: SmallRng) -> Self {
        let save = store.load();
        let character = CHARACTERS
            .iter()
            .position(|c| c.id == save.selected_character)
            .unwrap_or_default();
        let menu = MenuState {
            difficulty: save.difficulty(),
            character,
            stage: 0,
        };
        info!(
            lifetime_distance = save.lifetime_distance,
            cleared = save.cleared_stages.len(),
            "Save record loaded"
        );

        let mut audio = AudioQueue::new();
        if let Some(track) = ScreenState::Title.soundtrack() {
            audio.push(AudioEvent::Track(track));
        }

        Self {
            screen: ScreenMachine::new(),
            save,
            store,
            session: None,
            menu,
            pending_stage: None,
            pending_result: None,
            last_run: None,
            audio,
            muted: false,
            rng,
            clock: 0.0,
            title_rover_x: -40.0,
        }
    }

    pub fn screen(&self) -> ScreenState {
        self.screen.current()
    }

    pub fn transition(&self) -> &Transition {
        self.screen.transition()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    pub fn save(&self) -> &SaveRecord {
        &self.save
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn last_run(&self) -> Option<&RunSummary> {
        self.last_run.as_ref()
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn title_rover_x(&self) -> f32 {
        self.title_rover_x
    }

    pub fn set_muted(&mut self, muted: bool) {
        if self.muted != muted {
            self.muted = muted;
            self.audio.push(AudioEvent::Mute(muted));
        }
    }

    /// Audio events queued since the last flush.
    pub fn pending_audio(&self) -> &[AudioEvent] {
        &self.audio
    }

    /// Hands every queued audio event to `sink` and clears the queue.
    pub fn flush_audio(&mut self, sink: &mut dyn AudioSink) {
        sink.dispatch(&self.audio);
        self.audio.clear();
    }

    pub fn handle_event(&mut self, event: GameEvent) {
        trace!(?event, "Handling event");
        let playing = self.screen() == ScreenState::Playing;
        match event {
            GameEvent::Command(GameCommand::ToggleMute) => self.set_muted(!self.muted),
            GameEvent::Press { at_ms } if playing => {
                if let Some(session) = self.session.as_mut() {
                    session.press(at_ms, &mut self.audio);
                }
            }
            GameEvent::Release { at_ms } if playing => {
                if let Some(session) = self.session.as_mut() {
                    session.release(at_ms, &mut self.audio);
                }
            }
            GameEvent::Press { .. } => self.command(GameCommand::Confirm),
            GameEvent::Release { .. } => {}
            GameEvent::Command(command) => self.command(command),
        }
    }

    fn command(&mut self, command: GameCommand) {
        if self.screen.transition().in_flight() {
            trace!(?command, "Ignoring command during transition");
            return;
        }

        match self.screen() {
            ScreenState::Title => {
                if command == GameCommand::Confirm {
                    self.screen.request(ScreenState::DifficultySelect);
                }
            }
            ScreenState::DifficultySelect => self.difficulty_command(command),
            ScreenState::CharSelect => self.character_command(command),
            ScreenState::StageSelect => self.stage_command(command),
            ScreenState::Playing => {
                if command == GameCommand::Back {
                    info!("Run abandoned");
                    self.screen.request(ScreenState::StageSelect);
                }
            }
            ScreenState::StageCleared => match command {
                GameCommand::Confirm | GameCommand::Back => {
                    self.screen.request(ScreenState::StageSelect);
                }
                GameCommand::Right => {
                    let next = self.last_run.map_or(0, |r| r.stage + 1);
                    if next < STAGE_COUNT {
                        self.start_stage(next);
                    }
                }
                _ => {}
            },
            ScreenState::GameOver => match command {
                GameCommand::Confirm => {
                    let stage = self.last_run.map_or(self.menu.stage, |r| r.stage);
                    self.start_stage(stage);
                }
                GameCommand::Back => {
                    self.screen.request(ScreenState::StageSelect);
                }
                _ => {}
            },
        }
    }

    fn difficulty_command(&mut self, command: GameCommand) {
        let count = Difficulty::ALL.len();
        let index = self.menu.difficulty.index();
        match command {
            GameCommand::Left => self.menu.difficulty = Difficulty::from_index((index + count - 1) % count),
            GameCommand::Right => self.menu.difficulty = Difficulty::from_index((index + 1) % count),
            GameCommand::Choose(n @ 1..=4) => self.menu.difficulty = Difficulty::from_index(usize::from(n) - 1),
            GameCommand::Confirm => {
                self.save.last_difficulty = self.menu.difficulty.index();
                self.store.save(&self.save);
                self.screen.request(ScreenState::CharSelect);
            }
            GameCommand::Back => {
                self.screen.request(ScreenState::Title);
            }
            _ => {}
        }
    }

    fn character_command(&mut self, command: GameCommand) {
        let unlocked: Vec<usize> = unlocked_characters(self.save.lifetime_distance)
            .filter_map(|c| CHARACTERS.iter().position(|other| other.id == c.id))
            .collect();
        let position = unlocked.iter().position(|&i| i == self.menu.character).unwrap_or(0);

        match command {
            GameCommand::Left | GameCommand::Right if !unlocked.is_empty() => {
                let len = unlocked.len();
                let next = if command == GameCommand::Left { (position + len - 1) % len } else { (position + 1) % len };
                self.menu.character = unlocked[next];
            }
            GameCommand::Confirm => {
                let Some(&index) = unlocked.get(position) else {
                    return;
                };
                self.menu.character = index;
                self.save.selected_character = CHARACTERS[index].id.to_string();
                self.store.save(&self.save);
                self.screen.request(ScreenState::StageSelect);
            }
            GameCommand::Back => {
                self.screen.request(ScreenState::DifficultySelect);
            }
            _ => {}
        }
    }

    fn stage_command(&mut self, command: GameCommand) {
        match command {
            GameCommand::Left => self.menu.stage = self.menu.stage.saturating_sub(1),
            GameCommand::Right => self.menu.stage = (self.menu.stage + 1).min(STAGE_COUNT - 1),
            GameCommand::Choose(n @ 1..=5) => {
                self.start_stage(usize::from(n) - 1);
            }
            GameCommand::Confirm => {
                self.start_stage(self.menu.stage);
            }
            GameCommand::Back => {
                self.screen.request(ScreenState::CharSelect);
            }
            _ => {}
        }
    }

    /// Requests a run of stage `index`.
    ///
    /// # Returns
    /// `false` if the stage is locked, out of range, or a transition is already in flight.
    pub fn start_stage(&mut self, index: usize) -> bool {
        if index >= STAGE_COUNT || !self.save.is_unlocked(index) {
            debug!(index, "Rejected locked stage");
            return false;
        }
        if !self.screen.request(ScreenState::Playing) {
            return false;
        }
        self.menu.stage = index;
        self.pending_stage = Some(index);
        true
    }

    /// Advances the game by `dt` seconds of wall time.
    ///
    /// Deltas are clamped to [`MAX_DELTA`]; non-finite or negative deltas count as zero.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DELTA) } else { 0.0 };
        formatter::increment_tick();
        self.clock += dt;

        // An abandoned run freezes while the screen fades out to the menus
        let transition = self.screen.transition();
        let leaving = transition.in_flight() && transition.target() != ScreenState::Playing;
        if self.screen() == ScreenState::Playing && !leaving {
            let outcome = self.session.as_mut().and_then(|s| s.tick(dt, &mut self.audio));
            if let Some(outcome) = outcome {
                self.finish_run(outcome);
            }
        }

        if let Some(target) = self.pending_result {
            if self.screen.request(target) {
                self.pending_result = None;
            }
        }

        if let Some(commit) = self.screen.tick(dt) {
            self.on_enter(commit.to);
        }

        if self.screen() == ScreenState::Title {
            self.title_rover_x += 0.6 * dt / NOMINAL_FRAME;
            if self.title_rover_x > CANVAS_SIZE.x + 40.0 {
                self.title_rover_x = -40.0;
            }
        }
    }

    #[instrument(level = "debug", skip(self))]
    fn finish_run(&mut self, outcome: RunOutcome) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let stage = session.stage.index();
        let score = session.final_score();
        let distance = session.run.distance;
        let coins = session.run.coins;

        let (new_best, target) = match outcome {
            RunOutcome::Cleared => (self.save.record_clear(stage, score, distance, coins), ScreenState::StageCleared),
            RunOutcome::GameOver => (self.save.record_game_over(stage, score, distance, coins), ScreenState::GameOver),
        };
        self.store.save(&self.save);
        info!(score, new_best, lifetime_distance = self.save.lifetime_distance, "Run finished");

        self.last_run = Some(RunSummary {
            outcome,
            stage,
            score,
            distance,
            coins,
            new_best,
            fact: self.rng.random_range(0..MOON_FACTS.len()),
        });
        self.pending_result = Some(target);
    }

    fn on_enter(&mut self, state: ScreenState) {
        if let Some(track) = state.soundtrack() {
            self.audio.push(AudioEvent::Track(track));
        }

        match state {
            ScreenState::Playing => {
                let Some(index) = self.pending_stage.take() else {
                    warn!("Entered Playing without a pending stage");
                    return;
                };
                self.session = Some(self.new_session(index));
            }
            ScreenState::StageCleared | ScreenState::GameOver => {}
            ScreenState::Title | ScreenState::DifficultySelect | ScreenState::CharSelect | ScreenState::StageSelect => {
                self.session = None;
                self.pending_result = None;
            }
        }
    }

    fn new_session(&mut self, index: usize) -> Session {
        let stage = &STAGES[index];
        let character = character(&self.save.selected_character).unwrap_or(&CHARACTERS[0]);
        Session::new(stage, self.menu.difficulty, character, SmallRng::from_rng(&mut self.rng))
    }
}
