use strum_macros::{Display, EnumIter};
use tracing::debug;

use crate::audio::Track;
use crate::constants::transition;
use crate::render::Color;

/// The screens the game moves between. `Title` is initial; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
pub enum ScreenState {
    #[default]
    Title,
    DifficultySelect,
    CharSelect,
    StageSelect,
    Playing,
    StageCleared,
    GameOver,
}

impl ScreenState {
    /// Length of each half of a transition into this state, in seconds.
    pub fn transition_duration(self) -> f32 {
        match self {
            ScreenState::Title => transition::TITLE,
            ScreenState::DifficultySelect | ScreenState::CharSelect | ScreenState::StageSelect => transition::MENU,
            ScreenState::Playing => transition::PLAYING,
            ScreenState::StageCleared | ScreenState::GameOver => transition::RESULT,
        }
    }

    /// The flash shown early in a transition into this state, if any.
    pub fn flash_color(self) -> Option<Color> {
        match self {
            ScreenState::StageCleared => Some(Color::GOLD),
            ScreenState::GameOver => Some(Color::RED),
            _ => None,
        }
    }

    /// The background track bound to this state. Selection screens keep whatever is playing.
    pub fn soundtrack(self) -> Option<Track> {
        match self {
            ScreenState::Title => Some(Track::Title),
            ScreenState::Playing => Some(Track::Gameplay),
            ScreenState::StageCleared => Some(Track::Clear),
            ScreenState::GameOver => Some(Track::GameOver),
            ScreenState::DifficultySelect | ScreenState::CharSelect | ScreenState::StageSelect => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionPhase {
    /// No transition in flight.
    Idle,
    /// The overlay is fading in; the target is committed when it is opaque.
    Out { elapsed: f32 },
    /// The overlay is fading back out over the new state.
    In { elapsed: f32 },
}

/// A two-phase timed cross-fade gating screen changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    phase: TransitionPhase,
    target: ScreenState,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            phase: TransitionPhase::Idle,
            target: ScreenState::Title,
        }
    }
}

impl Transition {
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn target(&self) -> ScreenState {
        self.target
    }

    pub fn in_flight(&self) -> bool {
        !matches!(self.phase, TransitionPhase::Idle)
    }

    /// Begins a transition towards `target`.
    ///
    /// Returns `false` without changing anything if a transition is already in flight.
    pub fn request(&mut self, target: ScreenState) -> bool {
        if self.in_flight() {
            debug!(?target, pending = ?self.target, "Dropping transition request while one is in flight");
            return false;
        }

        self.target = target;
        self.phase = TransitionPhase::Out { elapsed: 0.0 };
        true
    }

    /// Advances the transition.
    ///
    /// # Returns
    /// The target state on the tick the overlay becomes fully opaque, exactly once per request.
    pub fn tick(&mut self, dt: f32) -> Option<ScreenState> {
        let duration = self.target.transition_duration();
        match self.phase {
            TransitionPhase::Idle => None,
            TransitionPhase::Out { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= duration {
                    self.phase = TransitionPhase::In {
                        elapsed: (elapsed - duration).min(duration),
                    };
                    Some(self.target)
                } else {
                    self.phase = TransitionPhase::Out { elapsed };
                    None
                }
            }
            TransitionPhase::In { elapsed } => {
                let elapsed = elapsed + dt;
                self.phase = if elapsed >= duration {
                    TransitionPhase::Idle
                } else {
                    TransitionPhase::In { elapsed }
                };
                None
            }
        }
    }

    /// Overlay opacity in `0.0..=1.0`.
    pub fn opacity(&self) -> f32 {
        let duration = self.target.transition_duration();
        match self.phase {
            TransitionPhase::Idle => 0.0,
            TransitionPhase::Out { elapsed } => (elapsed / duration).clamp(0.0, 1.0),
            TransitionPhase::In { elapsed } => (1.0 - elapsed / duration).clamp(0.0, 1.0),
        }
    }

    /// The flash color and its strength, during the first part of the out phase of result screens.
    pub fn flash(&self) -> Option<(Color, f32)> {
        let TransitionPhase::Out { elapsed } = self.phase else {
            return None;
        };
        let color = self.target.flash_color()?;
        let progress = elapsed / self.target.transition_duration();
        (progress < transition::FLASH_FRACTION).then(|| (color, 1.0 - progress / transition::FLASH_FRACTION))
    }
}

/// A committed state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub from: ScreenState,
    pub to: ScreenState,
}

/// The active screen plus the transition that gates changing it.
#[derive(Debug, Clone, Default)]
pub struct ScreenMachine {
    current: ScreenState,
    transition: Transition,
}

impl ScreenMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ScreenState {
        self.current
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    pub fn request(&mut self, target: ScreenState) -> bool {
        self.transition.request(target)
    }

    /// Advances the transition, committing the pending state when its out phase completes.
    pub fn tick(&mut self, dt: f32) -> Option<Commit> {
        let to = self.transition.tick(dt)?;
        let from = std::mem::replace(&mut self.current, to);
        debug!(?from, ?to, "Screen committed");
        Some(Commit { from, to })
    }
}
