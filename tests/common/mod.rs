#![allow(dead_code)]

use moon_runner::{
    audio::AudioQueue,
    constants::NOMINAL_FRAME,
    events::GameCommand,
    game::Game,
    render::{Color, Renderer, TextAlign},
    save::MemoryStore,
    stage::{Difficulty, CHARACTERS, STAGES},
    systems::session::Session,
    systems::state::ScreenState,
};
use rand::{rngs::SmallRng, SeedableRng};

pub fn rng() -> SmallRng {
    SmallRng::seed_from_u64(7)
}

pub fn game() -> Game {
    Game::new(Box::new(MemoryStore::new()), rng())
}

pub fn game_with_save(payload: &str) -> Game {
    Game::new(Box::new(MemoryStore::with_payload(payload)), rng())
}

/// Ticks nominal frames until no transition is in flight.
pub fn settle(game: &mut Game) {
    for _ in 0..600 {
        if !game.transition().in_flight() {
            return;
        }
        game.tick(NOMINAL_FRAME);
    }
    panic!("transition never settled");
}

pub fn command(game: &mut Game, command: GameCommand) {
    game.handle_event(command.into());
    settle(game);
}

/// Confirms through the title, difficulty and character screens.
pub fn to_stage_select(game: &mut Game) {
    command(game, GameCommand::Confirm);
    command(game, GameCommand::Confirm);
    command(game, GameCommand::Confirm);
    assert_eq!(game.screen(), ScreenState::StageSelect);
}

/// Starts the first stage and waits for the fade to finish.
pub fn playing(game: &mut Game) {
    to_stage_select(game);
    assert!(game.start_stage(0));
    settle(game);
    assert_eq!(game.screen(), ScreenState::Playing);
}

pub fn session(stage: usize) -> Session {
    Session::new(&STAGES[stage], Difficulty::Normal, &CHARACTERS[0], rng())
}

pub fn tick_session(session: &mut Session, ticks: usize) -> AudioQueue {
    let mut audio = AudioQueue::new();
    for _ in 0..ticks {
        session.tick(NOMINAL_FRAME, &mut audio);
    }
    audio
}

/// Counts primitive calls instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub clears: usize,
    pub rects: usize,
    pub circles: usize,
    pub texts: Vec<String>,
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, _color: Color) {
        self.clears += 1;
    }

    fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _color: Color) {
        self.rects += 1;
    }

    fn fill_circle(&mut self, _cx: f32, _cy: f32, _radius: f32, _color: Color) {
        self.circles += 1;
    }

    fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _size: f32, _color: Color, _align: TextAlign) {
        self.texts.push(text.to_string());
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        moon_runner::render::font::text_width(text, size)
    }
}
