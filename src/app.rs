use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::EventPump;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::{CANVAS_SIZE, LOOP_TIME};
use crate::events::{GameCommand, GameEvent};
use crate::game::Game;
use crate::platform::canvas::SdlRenderer;
use crate::platform::mixer::Mixer;
use crate::save::FileStore;

pub struct App {
    game: Game,
    renderer: SdlRenderer,
    event_pump: EventPump,
    mixer: Mixer,
    epoch: Instant,
    last_tick: Instant,
    focused: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
        let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;

        let window = video_subsystem
            .window(
                "Moon Runner",
                (CANVAS_SIZE.x * config.scale).round() as u32,
                (CANVAS_SIZE.y * config.scale).round() as u32,
            )
            .resizable()
            .position_centered()
            .build()?;

        let mut canvas = window.into_canvas().accelerated().build()?;
        canvas.set_logical_size(CANVAS_SIZE.x as u32, CANVAS_SIZE.y as u32)?;

        // No audio device is not fatal
        let mixer = match sdl_context.audio() {
            Ok(audio) => Mixer::new(&audio),
            Err(error) => {
                warn!(%error, "Audio subsystem unavailable");
                Mixer::Disabled(Default::default())
            }
        };

        let store = FileStore::new(config.save_path.clone());
        let mut game = Game::new(Box::new(store), crate::platform::rng(config.seed));
        game.set_muted(config.muted);

        let event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;

        Ok(Self {
            game,
            renderer: SdlRenderer::new(canvas),
            event_pump,
            mixer,
            epoch: Instant::now(),
            last_tick: Instant::now(),
            focused: true,
        })
    }

    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Translates one SDL event. Returns `false` when the app should quit.
    fn handle(&mut self, event: Event) -> bool {
        let at_ms = self.now_ms();
        let translated = match event {
            Event::Quit { .. } => {
                info!("Exit requested. Exiting...");
                return false;
            }
            Event::Window { win_event, .. } => {
                match win_event {
                    WindowEvent::FocusGained => self.focused = true,
                    WindowEvent::FocusLost => self.focused = false,
                    _ => {}
                }
                None
            }
            Event::KeyDown {
                keycode: Some(Keycode::Space | Keycode::Up),
                repeat: false,
                ..
            } => Some(GameEvent::Press { at_ms }),
            Event::KeyUp {
                keycode: Some(Keycode::Space | Keycode::Up),
                ..
            } => Some(GameEvent::Release { at_ms }),
            Event::KeyDown {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => command_for(keycode).map(GameEvent::from),
            Event::MouseButtonDown { .. } | Event::FingerDown { .. } => Some(GameEvent::Press { at_ms }),
            Event::MouseButtonUp { .. } | Event::FingerUp { .. } => Some(GameEvent::Release { at_ms }),
            _ => None,
        };

        if let Some(event) = translated {
            self.game.handle_event(event);
        }
        true
    }

    /// Runs a single frame. Returns `false` once the app should exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let events: Vec<Event> = self.event_pump.poll_iter().collect();
        for event in events {
            if !self.handle(event) {
                return false;
            }
        }

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = Instant::now();

        self.game.tick(dt);
        self.game.flush_audio(&mut self.mixer);
        crate::render::draw(&self.game, &mut self.renderer);
        self.renderer.present();

        let elapsed = start.elapsed();
        if elapsed < LOOP_TIME {
            let remaining = LOOP_TIME.saturating_sub(elapsed);
            if remaining != Duration::ZERO {
                if self.focused {
                    spin_sleep::sleep(remaining);
                } else {
                    std::thread::sleep(remaining);
                }
            }
        } else {
            debug!(behind = ?(elapsed - LOOP_TIME), "Game loop behind schedule");
        }

        true
    }
}

fn command_for(keycode: Keycode) -> Option<GameCommand> {
    let command = match keycode {
        Keycode::Return | Keycode::KpEnter => GameCommand::Confirm,
        Keycode::Escape | Keycode::Backspace => GameCommand::Back,
        Keycode::Left | Keycode::A => GameCommand::Left,
        Keycode::Right | Keycode::D => GameCommand::Right,
        Keycode::M => GameCommand::ToggleMute,
        Keycode::Num1 => GameCommand::Choose(1),
        Keycode::Num2 => GameCommand::Choose(2),
        Keycode::Num3 => GameCommand::Choose(3),
        Keycode::Num4 => GameCommand::Choose(4),
        Keycode::Num5 => GameCommand::Choose(5),
        _ => return None,
    };
    Some(command)
}
